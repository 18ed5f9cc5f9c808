use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/locations", get(handlers::inventory::list_locations))
        .route(
            "/api/locations/:id/slots",
            get(handlers::inventory::list_location_slots),
        )
        .route(
            "/api/slots/:id/time-slots",
            get(handlers::inventory::get_time_slots),
        )
}
