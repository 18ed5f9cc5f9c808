use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use parkeasy_core::{errors::ParkError, models::auth::NotificationsResponse};
use std::sync::Arc;

use crate::{
    middleware::{auth::CurrentSession, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn list_notifications(
    State(state): State<Arc<ApiState>>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<NotificationsResponse>, AppError> {
    let notifications = state
        .sessions
        .notifications(session.token)
        .await
        .ok_or_else(|| ParkError::Authentication("Unknown or expired session".to_string()))?;

    Ok(Json(NotificationsResponse { notifications }))
}

#[axum::debug_handler]
pub async fn clear_notification(
    State(state): State<Arc<ApiState>>,
    CurrentSession(session): CurrentSession,
    Path(index): Path<usize>,
) -> Result<StatusCode, AppError> {
    state
        .sessions
        .clear_notification(session.token, index)
        .await
        .ok_or_else(|| ParkError::NotFound(format!("Notification {} not found", index)))?;

    Ok(StatusCode::NO_CONTENT)
}
