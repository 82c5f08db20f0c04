//! Shared auth state observed by the registration UI.

use std::sync::Arc;

use shared::{
    domain::{AccountSummary, SessionTokens},
    error::ApiError,
    protocol::{AuthResult, RegistrationRequest},
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{AuthError, AuthService};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSnapshot {
    pub is_loading: bool,
    pub error: Option<ApiError>,
    pub tokens: Option<SessionTokens>,
    pub user: Option<AccountSummary>,
}

/// Single-writer auth state. Every mutation is published to subscribers,
/// which is how views learn they need to re-render.
#[derive(Clone)]
pub struct AuthStore {
    service: Arc<dyn AuthService>,
    state: Arc<watch::Sender<AuthSnapshot>>,
}

impl AuthStore {
    pub fn new(service: Arc<dyn AuthService>) -> Self {
        let (state, _) = watch::channel(AuthSnapshot::default());
        Self {
            service,
            state: Arc::new(state),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        self.state.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    pub fn error(&self) -> Option<ApiError> {
        self.state.borrow().error.clone()
    }

    pub fn tokens(&self) -> Option<SessionTokens> {
        self.state.borrow().tokens.clone()
    }

    pub fn user(&self) -> Option<AccountSummary> {
        self.state.borrow().user.clone()
    }

    pub fn clear_error(&self) {
        self.state.send_if_modified(|state| state.error.take().is_some());
    }

    /// Runs a registration against the backing service. A call made while
    /// another one is still in flight is refused with [`AuthError::Busy`].
    pub async fn register(&self, request: &RegistrationRequest) -> Result<AuthResult, AuthError> {
        let started = self.state.send_if_modified(|state| {
            if state.is_loading {
                return false;
            }
            state.is_loading = true;
            state.error = None;
            true
        });
        if !started {
            debug!("registration refused: another one is in flight");
            return Err(AuthError::Busy);
        }

        let outcome = self.service.register(request).await;

        match &outcome {
            Ok(result) => {
                info!(
                    account_id = %result.user.id,
                    session_issued = result.tokens.is_some(),
                    "registration stored"
                );
                self.state.send_modify(|state| {
                    state.is_loading = false;
                    state.error = None;
                    state.tokens = result.tokens.clone();
                    state.user = Some(result.user.clone());
                });
            }
            Err(err) => {
                warn!(code = %err.code(), "registration failed: {err}");
                let api_error = err.to_api_error();
                self.state.send_modify(|state| {
                    state.is_loading = false;
                    state.error = Some(api_error);
                });
            }
        }

        outcome
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
