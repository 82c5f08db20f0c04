//! UI events emitted by the registration controller and error modeling for
//! what the user gets to see.

use shared::error::{ApiError, ErrorCode};

use crate::{form::ValidationError, routes::Route};

pub const EMAIL_EXISTS_MESSAGE: &str = "An account with this email already exists";
pub const RATE_LIMIT_MESSAGE: &str = "Too many registration attempts. Please try again later.";
pub const DEFAULT_FAILURE_MESSAGE: &str = "Registration failed. Please try again.";
pub const VERIFY_EMAIL_MESSAGE: &str =
    "Account created! Please check your email to verify your account.";
pub const REGISTERED_MESSAGE: &str = "Account created successfully!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Toast(Toast),
    Navigate(Route),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastSeverity {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub severity: ToastSeverity,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: ToastSeverity::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: ToastSeverity::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: ToastSeverity::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Conflict,
    RateLimit,
    Auth,
    Transport,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    FormValidation,
    Registration,
}

pub fn classify_registration_failure(err: &ApiError) -> String {
    match err.code {
        ErrorCode::EmailExists => EMAIL_EXISTS_MESSAGE.to_string(),
        ErrorCode::RateLimit => RATE_LIMIT_MESSAGE.to_string(),
        _ if err.message.trim().is_empty() => DEFAULT_FAILURE_MESSAGE.to_string(),
        _ => err.message.clone(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_validation(err: ValidationError) -> Self {
        Self {
            category: UiErrorCategory::Validation,
            context: UiErrorContext::FormValidation,
            message: err.to_string(),
        }
    }

    pub fn from_api_error(err: &ApiError) -> Self {
        let category = match err.code {
            ErrorCode::EmailExists => UiErrorCategory::Conflict,
            ErrorCode::RateLimit => UiErrorCategory::RateLimit,
            ErrorCode::Validation => UiErrorCategory::Validation,
            ErrorCode::Unauthorized => UiErrorCategory::Auth,
            ErrorCode::NetworkError => UiErrorCategory::Transport,
            ErrorCode::Internal | ErrorCode::Unknown => UiErrorCategory::Unknown,
        };

        Self {
            category,
            context: UiErrorContext::Registration,
            message: classify_registration_failure(err),
        }
    }

    /// Whether resubmitting the same form unchanged could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category,
            UiErrorCategory::RateLimit | UiErrorCategory::Transport | UiErrorCategory::Unknown
        )
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
