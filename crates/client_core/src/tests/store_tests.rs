use super::*;
use async_trait::async_trait;
use shared::{domain::AccountId, error::ErrorCode};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

struct ScriptedAuthService {
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
    outcome: Result<Option<SessionTokens>, ApiError>,
}

impl ScriptedAuthService {
    fn succeeding(tokens: Option<SessionTokens>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            gate: None,
            outcome: Ok(tokens),
        }
    }

    fn failing(code: ErrorCode, message: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            gate: None,
            outcome: Err(ApiError::new(code, message)),
        }
    }

    fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }
}

#[async_trait]
impl AuthService for ScriptedAuthService {
    async fn register(&self, request: &RegistrationRequest) -> Result<AuthResult, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.outcome {
            Ok(tokens) => Ok(AuthResult {
                user: AccountSummary {
                    id: AccountId::new(),
                    email: request.email.clone(),
                    name: request.name.clone(),
                    email_verified: false,
                },
                tokens: tokens.clone(),
            }),
            Err(err) => Err(err.clone().into()),
        }
    }
}

fn request() -> RegistrationRequest {
    RegistrationRequest {
        email: "grace@example.com".into(),
        password: "Cobol1959!".into(),
        name: "Grace Hopper".into(),
        accept_terms: true,
        marketing_consent: false,
    }
}

fn session() -> SessionTokens {
    SessionTokens {
        access_token: "access".into(),
        refresh_token: None,
        expires_at: None,
    }
}

#[tokio::test]
async fn successful_registration_stores_tokens_and_user() {
    let store = AuthStore::new(Arc::new(ScriptedAuthService::succeeding(Some(session()))));

    store.register(&request()).await.expect("register");

    let snapshot = store.snapshot();
    assert!(!snapshot.is_loading);
    assert!(snapshot.error.is_none());
    assert_eq!(snapshot.tokens, Some(session()));
    assert_eq!(
        snapshot.user.map(|user| user.email),
        Some("grace@example.com".to_string())
    );
}

#[tokio::test]
async fn registration_without_session_leaves_tokens_empty() {
    let store = AuthStore::new(Arc::new(ScriptedAuthService::succeeding(None)));

    let result = store.register(&request()).await.expect("register");

    assert!(result.requires_verification());
    assert!(store.tokens().is_none());
    assert!(store.user().is_some());
}

#[tokio::test]
async fn failed_registration_keeps_error_until_cleared() {
    let store = AuthStore::new(Arc::new(ScriptedAuthService::failing(
        ErrorCode::EmailExists,
        "taken",
    )));

    let err = store.register(&request()).await.expect_err("email exists");
    assert_eq!(err.code(), ErrorCode::EmailExists);
    assert!(!store.is_loading());
    assert_eq!(
        store.error(),
        Some(ApiError::new(ErrorCode::EmailExists, "taken"))
    );

    store.clear_error();
    assert!(store.error().is_none());
}

#[tokio::test]
async fn loading_flag_is_published_while_in_flight_and_second_call_is_refused() {
    let gate = Arc::new(Notify::new());
    let service = Arc::new(ScriptedAuthService::succeeding(None).gated(gate.clone()));
    let store = AuthStore::new(service.clone());
    let mut updates = store.subscribe();

    let in_flight = {
        let store = store.clone();
        tokio::spawn(async move { store.register(&request()).await })
    };

    updates.changed().await.expect("loading published");
    assert!(updates.borrow_and_update().is_loading);
    assert!(store.is_loading());

    let refused = store.register(&request()).await.expect_err("busy");
    assert!(matches!(refused, AuthError::Busy));

    gate.notify_one();
    in_flight
        .await
        .expect("join")
        .expect("first registration succeeds");

    assert!(!store.is_loading());
    assert_eq!(service.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn clear_error_without_error_does_not_notify() {
    let store = AuthStore::new(Arc::new(ScriptedAuthService::succeeding(None)));
    let mut updates = store.subscribe();

    store.clear_error();

    assert!(!updates.has_changed().expect("sender alive"));
    assert!(updates.borrow_and_update().error.is_none());
}
