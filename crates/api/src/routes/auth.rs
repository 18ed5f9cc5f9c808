use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/auth/otp", post(handlers::auth::request_code))
        .route("/api/auth/verify", post(handlers::auth::verify_code))
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route(
            "/api/notifications",
            get(handlers::notifications::list_notifications),
        )
        .route(
            "/api/notifications/:index",
            delete(handlers::notifications::clear_notification),
        )
}
