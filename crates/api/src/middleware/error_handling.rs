//! # Error Handling Middleware
//!
//! This module provides a standardized way to handle errors in the ParkEasy API.
//! It maps domain-specific errors to appropriate HTTP status codes and JSON
//! error responses of the form `{"error": "..."}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use parkeasy_core::errors::{ParkError, ValidationError};
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps domain-specific `ParkError` instances and implements
/// `IntoResponse` to convert them into HTTP responses.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use parkeasy_api::middleware::error_handling::AppError;
/// use parkeasy_core::errors::ParkError;
///
/// async fn handler(id: String) -> Result<Json<String>, AppError> {
///     if id.is_empty() {
///         return Err(AppError(ParkError::NotFound("Booking not found".to_string())));
///     }
///     Ok(Json(id))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub ParkError);

pub fn status_for(err: &ParkError) -> StatusCode {
    match err {
        ParkError::NotFound(_) => StatusCode::NOT_FOUND,
        ParkError::Validation(ValidationError::TimeSlotUnavailable(_))
        | ParkError::Validation(ValidationError::InvalidStatusTransition { .. }) => {
            StatusCode::CONFLICT
        }
        ParkError::Validation(_) => StatusCode::BAD_REQUEST,
        ParkError::Authentication(_) => StatusCode::UNAUTHORIZED,
        ParkError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        ParkError::Fetch(_) => StatusCode::BAD_GATEWAY,
        ParkError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ParkError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            error!("Request failed: {:?}", self.0);
        }

        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

/// Allows using `?` on `ParkResult` inside handlers.
impl From<ParkError> for AppError {
    fn from(err: ParkError) -> Self {
        AppError(err)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError(ParkError::Validation(err))
    }
}

/// Infrastructure failures surface as database errors.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(ParkError::Database(err))
    }
}

/// Maps a ParkError to an HTTP response
pub fn map_error(err: ParkError) -> Response {
    AppError(err).into_response()
}
