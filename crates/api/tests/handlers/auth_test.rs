use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use parkeasy_api::{session::SessionStore, ApiState};
use parkeasy_core::booking::WELCOME_MESSAGE;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::{sync::mpsc, time::Instant};
use uuid::Uuid;

use crate::test_utils::{server, with_token, StalledMessaging, TestContext};

#[tokio::test]
async fn test_request_code_sends_otp() {
    let mut ctx = TestContext::new();
    ctx.messaging
        .expect_request_verification_code()
        .withf(|destination| destination == "9876543210")
        .times(1)
        .returning(|_| Ok(true));
    let server = server(ctx.build_state());

    let response = server
        .post("/api/auth/otp")
        .json(&json!({ "phone": "9876543210" }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "sent": true }));
}

#[tokio::test]
async fn test_request_code_reports_unavailable_service() {
    let mut ctx = TestContext::new();
    ctx.messaging
        .expect_request_verification_code()
        .returning(|_| Ok(false));
    let server = server(ctx.build_state());

    let response = server
        .post("/api/auth/otp")
        .json(&json!({ "phone": "9876543210" }))
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_request_code_rejects_short_phone() {
    let mut ctx = TestContext::new();
    ctx.messaging.expect_request_verification_code().times(0);
    let server = server(ctx.build_state());

    let response = server
        .post("/api/auth/otp")
        .json(&json!({ "phone": "12345" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_code_is_rejected_locally() {
    let mut ctx = TestContext::new();
    ctx.messaging.expect_confirm_verification_code().times(0);
    let server = server(ctx.build_state());

    let response = server
        .post("/api/auth/verify")
        .json(&json!({ "phone": "9876543210", "code": "12ab" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_wrong_code_is_unauthorized() {
    let mut ctx = TestContext::new();
    ctx.messaging
        .expect_confirm_verification_code()
        .returning(|_, _| Ok(false));
    ctx.messaging.expect_send_message().times(0);
    let server = server(ctx.build_state());

    let response = server
        .post("/api/auth/verify")
        .json(&json!({ "phone": "9876543210", "code": "123456" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_survives_undelivered_welcome() {
    let mut ctx = TestContext::new();
    let (sent_tx, mut sent_rx) = mpsc::unbounded_channel();
    ctx.messaging
        .expect_confirm_verification_code()
        .withf(|destination, code| destination == "9876543210" && code == "123456")
        .returning(|_, _| Ok(true));
    ctx.messaging
        .expect_send_message()
        .withf(|_, body| body == WELCOME_MESSAGE)
        .times(1)
        .returning(move |destination, _| {
            let _ = sent_tx.send(destination.to_string());
            Ok(false)
        });
    let state = ctx.build_state();
    let server = server(state.clone());

    let response = server
        .post("/api/auth/verify")
        .json(&json!({ "phone": "9876543210", "code": "123456" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["phone"], json!("9876543210"));
    let token = Uuid::parse_str(body["token"].as_str().unwrap()).unwrap();
    assert!(state.sessions.get(token).await.is_some());

    // The welcome SMS goes out in the background
    let destination = tokio::time::timeout(Duration::from_secs(5), sent_rx.recv())
        .await
        .unwrap();
    assert_eq!(destination.as_deref(), Some("9876543210"));
}

#[tokio::test(start_paused = true)]
async fn test_login_does_not_wait_for_welcome_sms() {
    let state = TestContext::new().build_state_with_messaging(Arc::new(StalledMessaging {
        delay: Duration::from_secs(54),
    }));
    let server = server(state.clone());

    let started = Instant::now();
    let response = server
        .post("/api/auth/verify")
        .json(&json!({ "phone": "9876543210", "code": "123456" }))
        .await;

    response.assert_status_ok();
    assert!(started.elapsed() < Duration::from_secs(1));
    let body: Value = response.json();
    let token = Uuid::parse_str(body["token"].as_str().unwrap()).unwrap();
    assert!(state.sessions.get(token).await.is_some());
}

#[tokio::test]
async fn test_expired_session_is_unauthorized() {
    let ctx = TestContext::new();
    let state = Arc::new(
        ApiState::new(
            Arc::new(ctx.inventory),
            Arc::new(ctx.bookings),
            Arc::new(ctx.occupancy),
            Arc::new(ctx.messaging),
            ctx.estimator,
        )
        .with_sessions(SessionStore::with_ttl(chrono::Duration::zero())),
    );
    let session = state.sessions.open("9876543210").await;
    let server = server(state.clone());

    let response = with_token(server.get("/api/notifications"), session.token).await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let response = with_token(server.get("/api/bookings"), session.token).await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    assert_eq!(state.sessions.get(session.token).await, None);
}

#[tokio::test]
async fn test_session_notifications_and_logout() {
    let state = TestContext::new().build_state();
    let session = state.sessions.open("9876543210").await;
    state
        .sessions
        .push_notification(session.token, "Booking PK1 confirmed!")
        .await;
    let server = server(state.clone());

    let response = with_token(server.get("/api/notifications"), session.token).await;
    response.assert_status_ok();
    response.assert_json(&json!({ "notifications": ["Booking PK1 confirmed!"] }));

    let response = with_token(server.delete("/api/notifications/0"), session.token).await;
    response.assert_status(StatusCode::NO_CONTENT);

    let response = with_token(server.delete("/api/notifications/0"), session.token).await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = with_token(server.post("/api/auth/logout"), session.token).await;
    response.assert_status(StatusCode::NO_CONTENT);

    let response = with_token(server.get("/api/notifications"), session.token).await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_token_is_unauthorized() {
    let server = server(TestContext::new().build_state());

    let response = with_token(server.get("/api/notifications"), Uuid::new_v4()).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}
