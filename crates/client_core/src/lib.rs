use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{AuthResult, RegistrationRequest, REGISTER_PATH},
};
use tracing::{info, warn};
use url::Url;

pub mod error;
mod store;

pub use error::AuthError;
pub use store::{AuthSnapshot, AuthStore};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn register(&self, request: &RegistrationRequest) -> Result<AuthResult, AuthError>;
}

pub struct HttpAuthService {
    http: Client,
    base_url: String,
}

impl HttpAuthService {
    pub fn new(base_url: &str) -> Result<Self, AuthError> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, AuthError> {
        let base_url = normalize_base_url(base_url)?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn register_url(&self) -> String {
        format!("{}{}", self.base_url, REGISTER_PATH)
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    async fn register(&self, request: &RegistrationRequest) -> Result<AuthResult, AuthError> {
        let response = self
            .http
            .post(self.register_url())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let result: AuthResult = response
                .json()
                .await
                .map_err(|err| AuthError::Decode(err.to_string()))?;
            info!(
                account_id = %result.user.id,
                verification_pending = result.requires_verification(),
                "auth service accepted registration"
            );
            return Ok(result);
        }

        let body = response.text().await?;
        let err = error_from_response(status, &body);
        warn!(status = status.as_u16(), code = %err.code(), "auth service rejected registration");
        Err(err)
    }
}

fn normalize_base_url(raw: &str) -> Result<String, AuthError> {
    let trimmed = raw.trim().trim_end_matches('/');
    Url::parse(trimmed).map_err(|source| AuthError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })?;
    Ok(trimmed.to_string())
}

fn error_from_response(status: StatusCode, body: &str) -> AuthError {
    if let Ok(api) = serde_json::from_str::<ApiError>(body) {
        return api.into();
    }

    let code = match status {
        StatusCode::CONFLICT => ErrorCode::EmailExists,
        StatusCode::TOO_MANY_REQUESTS => ErrorCode::RateLimit,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ErrorCode::Unauthorized,
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ErrorCode::Validation,
        _ => ErrorCode::Unknown,
    };
    AuthError::api(code, status.canonical_reason().unwrap_or("request failed"))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
