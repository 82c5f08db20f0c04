use shared::error::{ApiError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{code}: {message}")]
    Api { code: ErrorCode, message: String },
    #[error("failed to reach auth service: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid auth service response: {0}")]
    Decode(String),
    #[error("invalid auth service url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("a registration is already in progress")]
    Busy,
}

impl AuthError {
    pub fn api(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Api {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Api { code, .. } => *code,
            Self::Transport(_) => ErrorCode::NetworkError,
            Self::Decode(_) => ErrorCode::Internal,
            Self::InvalidBaseUrl { .. } | Self::Busy => ErrorCode::Unknown,
        }
    }

    /// Message meant for display. Server-provided messages are passed through
    /// verbatim, possibly empty.
    pub fn message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn to_api_error(&self) -> ApiError {
        ApiError::new(self.code(), self.message())
    }
}

impl From<ApiError> for AuthError {
    fn from(value: ApiError) -> Self {
        Self::Api {
            code: value.code,
            message: value.message,
        }
    }
}
