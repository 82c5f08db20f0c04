use serde::{Deserialize, Serialize};

/// Error codes reported by the auth service. Codes this client does not know
/// about are kept as [`ErrorCode::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ErrorCode {
    EmailExists,
    RateLimit,
    Validation,
    Unauthorized,
    NetworkError,
    Internal,
    Unknown,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EmailExists => "EMAIL_EXISTS",
            Self::RateLimit => "RATE_LIMIT",
            Self::Validation => "VALIDATION_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NetworkError => "NETWORK_ERROR",
            Self::Internal => "INTERNAL_ERROR",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl From<&str> for ErrorCode {
    fn from(value: &str) -> Self {
        match value {
            "EMAIL_EXISTS" => Self::EmailExists,
            "RATE_LIMIT" => Self::RateLimit,
            "VALIDATION_ERROR" => Self::Validation,
            "UNAUTHORIZED" => Self::Unauthorized,
            "NETWORK_ERROR" => Self::NetworkError,
            "INTERNAL_ERROR" => Self::Internal,
            _ => Self::Unknown,
        }
    }
}

impl From<String> for ErrorCode {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<ErrorCode> for String {
    fn from(value: ErrorCode) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    #[serde(default)]
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}
