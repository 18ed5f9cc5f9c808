//! # Login Handlers
//!
//! Phone login in two steps: request a one-time code, then confirm it. A
//! confirmed code opens a session and triggers a welcome text in the
//! background; the token is returned without waiting for it.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use parkeasy_core::{
    booking::WELCOME_MESSAGE,
    errors::ParkError,
    models::auth::{RequestCodeRequest, RequestCodeResponse, VerifyCodeRequest, VerifyCodeResponse},
    phone::{validate_local_phone, validate_verification_code},
};
use tracing::{info, warn};

use crate::{
    middleware::{auth::CurrentSession, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn request_code(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RequestCodeRequest>,
) -> Result<Json<RequestCodeResponse>, AppError> {
    validate_local_phone(&payload.phone)?;

    let sent = state.messaging.request_verification_code(&payload.phone).await?;
    if !sent {
        return Err(AppError(ParkError::ServiceUnavailable(
            "Failed to send OTP. Please try again later.".to_string(),
        )));
    }

    Ok(Json(RequestCodeResponse { sent }))
}

#[axum::debug_handler]
pub async fn verify_code(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<VerifyCodeRequest>,
) -> Result<Json<VerifyCodeResponse>, AppError> {
    validate_local_phone(&payload.phone)?;
    validate_verification_code(&payload.code)?;

    let valid = state
        .messaging
        .confirm_verification_code(&payload.phone, &payload.code)
        .await?;
    if !valid {
        return Err(AppError(ParkError::Authentication(
            "Invalid OTP. Please try again.".to_string(),
        )));
    }

    let session = state.sessions.open(&payload.phone).await;
    info!("Session opened for {}", payload.phone);

    // Login stands even if the welcome text does not go out
    let messaging = Arc::clone(&state.messaging);
    let phone = payload.phone.clone();
    tokio::spawn(async move {
        match messaging.send_message(&phone, WELCOME_MESSAGE).await {
            Ok(true) => {}
            Ok(false) => warn!("Welcome SMS to {} was not delivered", phone),
            Err(err) => warn!("Welcome SMS to {} failed: {}", phone, err),
        }
    });

    Ok(Json(VerifyCodeResponse {
        token: session.token,
        phone: session.phone,
        created_at: session.created_at,
    }))
}

#[axum::debug_handler]
pub async fn logout(
    State(state): State<Arc<ApiState>>,
    CurrentSession(session): CurrentSession,
) -> StatusCode {
    state.sessions.close(session.token).await;
    StatusCode::NO_CONTENT
}
