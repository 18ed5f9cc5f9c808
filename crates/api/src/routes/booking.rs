use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/bookings",
            post(handlers::booking::create_booking).get(handlers::booking::list_my_bookings),
        )
        .route("/api/bookings/:id", get(handlers::booking::get_booking))
        .route(
            "/api/bookings/:id/status",
            post(handlers::booking::update_booking_status),
        )
}
