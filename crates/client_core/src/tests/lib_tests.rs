use super::*;
use axum::{extract::State, http::StatusCode as HttpStatus, routing::post, Json, Router};
use shared::domain::{AccountId, AccountSummary, SessionTokens};
use std::sync::Arc;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone)]
struct RegisterServerState {
    received: Arc<Mutex<Vec<serde_json::Value>>>,
    reply: Arc<(HttpStatus, String)>,
}

async fn handle_register(
    State(state): State<RegisterServerState>,
    Json(body): Json<serde_json::Value>,
) -> (HttpStatus, String) {
    state.received.lock().await.push(body);
    (state.reply.0, state.reply.1.clone())
}

async fn spawn_register_server(
    status: HttpStatus,
    body: String,
) -> anyhow::Result<(String, RegisterServerState)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = RegisterServerState {
        received: Arc::new(Mutex::new(Vec::new())),
        reply: Arc::new((status, body)),
    };
    let app = Router::new()
        .route(REGISTER_PATH, post(handle_register))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), state))
}

fn sample_request() -> RegistrationRequest {
    RegistrationRequest {
        email: "ada@example.com".into(),
        password: "Analytical1!".into(),
        name: "Ada Lovelace".into(),
        accept_terms: true,
        marketing_consent: true,
    }
}

fn sample_result(tokens: Option<SessionTokens>) -> AuthResult {
    AuthResult {
        user: AccountSummary {
            id: AccountId::new(),
            email: "ada@example.com".into(),
            name: "Ada Lovelace".into(),
            email_verified: tokens.is_some(),
        },
        tokens,
    }
}

#[tokio::test]
async fn register_posts_camel_case_request_and_returns_session() {
    let expected = sample_result(Some(SessionTokens {
        access_token: "access".into(),
        refresh_token: Some("refresh".into()),
        expires_at: None,
    }));
    let (base_url, state) = spawn_register_server(
        HttpStatus::CREATED,
        serde_json::to_string(&expected).expect("json"),
    )
    .await
    .expect("server");

    let service = HttpAuthService::new(&base_url).expect("service");
    let result = service.register(&sample_request()).await.expect("register");

    assert_eq!(result, expected);
    let received = state.received.lock().await;
    assert_eq!(received.len(), 1);
    assert_eq!(received[0]["email"], "ada@example.com");
    assert_eq!(received[0]["acceptTerms"], true);
    assert_eq!(received[0]["marketingConsent"], true);
}

#[tokio::test]
async fn register_without_tokens_reports_pending_verification() {
    let (base_url, _state) = spawn_register_server(
        HttpStatus::OK,
        serde_json::to_string(&sample_result(None)).expect("json"),
    )
    .await
    .expect("server");

    let service = HttpAuthService::new(&format!("{base_url}/")).expect("service");
    let result = service.register(&sample_request()).await.expect("register");
    assert!(result.requires_verification());
}

#[tokio::test]
async fn json_error_body_maps_to_api_error_code() {
    let (base_url, _state) = spawn_register_server(
        HttpStatus::CONFLICT,
        r#"{"code":"EMAIL_EXISTS","message":"email already registered"}"#.to_string(),
    )
    .await
    .expect("server");

    let service = HttpAuthService::new(&base_url).expect("service");
    let err = service
        .register(&sample_request())
        .await
        .expect_err("conflict");
    assert_eq!(err.code(), ErrorCode::EmailExists);
    assert_eq!(err.message(), "email already registered");
}

#[tokio::test]
async fn plain_text_error_body_falls_back_to_status_mapping() {
    let (base_url, _state) =
        spawn_register_server(HttpStatus::TOO_MANY_REQUESTS, "slow down".to_string())
            .await
            .expect("server");

    let service = HttpAuthService::new(&base_url).expect("service");
    let err = service
        .register(&sample_request())
        .await
        .expect_err("rate limited");
    assert_eq!(err.code(), ErrorCode::RateLimit);
    assert_eq!(err.message(), "Too Many Requests");
}

#[tokio::test]
async fn unexpected_status_without_json_is_unknown() {
    let (base_url, _state) =
        spawn_register_server(HttpStatus::INTERNAL_SERVER_ERROR, "<html>".to_string())
            .await
            .expect("server");

    let service = HttpAuthService::new(&base_url).expect("service");
    let err = service
        .register(&sample_request())
        .await
        .expect_err("server error");
    assert_eq!(err.code(), ErrorCode::Unknown);
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let service = HttpAuthService::with_timeout(&format!("http://{addr}"), Duration::from_secs(2))
        .expect("service");
    let err = service
        .register(&sample_request())
        .await
        .expect_err("connection refused");
    assert!(matches!(err, AuthError::Transport(_)));
    assert_eq!(err.code(), ErrorCode::NetworkError);
}

#[test]
fn base_url_is_validated_and_trimmed() {
    let service = HttpAuthService::new(" http://auth.example.test/api/ ").expect("service");
    assert_eq!(service.base_url(), "http://auth.example.test/api");
    assert_eq!(
        service.register_url(),
        "http://auth.example.test/api/auth/register"
    );

    let err = HttpAuthService::new("not a url").err().expect("invalid url");
    assert!(matches!(err, AuthError::InvalidBaseUrl { .. }));
}
