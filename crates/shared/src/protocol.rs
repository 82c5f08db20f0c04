use serde::{Deserialize, Serialize};

use crate::domain::{AccountSummary, SessionTokens};

pub const REGISTER_PATH: &str = "/auth/register";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub accept_terms: bool,
    pub marketing_consent: bool,
}

/// Outcome of a successful registration. `tokens` is absent when the
/// account still has to confirm its email address before signing in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResult {
    pub user: AccountSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<SessionTokens>,
}

impl AuthResult {
    pub fn requires_verification(&self) -> bool {
        self.tokens.is_none()
    }
}
