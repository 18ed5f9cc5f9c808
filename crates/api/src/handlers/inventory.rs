use axum::{
    extract::{Path, State},
    Json,
};
use parkeasy_core::{
    errors::ParkError,
    models::parking::{Location, ParkingSlot, TimeSlot},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn list_locations(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Location>>, AppError> {
    let locations = state.inventory.list_locations().await?;
    Ok(Json(locations))
}

#[axum::debug_handler]
pub async fn list_location_slots(
    State(state): State<Arc<ApiState>>,
    Path(location_id): Path<Uuid>,
) -> Result<Json<Vec<ParkingSlot>>, AppError> {
    // Distinguish an unknown location from one without slots
    state
        .inventory
        .get_location(location_id)
        .await?
        .ok_or_else(|| ParkError::NotFound(format!("Location with ID {} not found", location_id)))?;

    let slots = state.inventory.list_slots(location_id).await?;
    Ok(Json(slots))
}

#[axum::debug_handler]
pub async fn get_time_slots(
    State(state): State<Arc<ApiState>>,
    Path(slot_id): Path<Uuid>,
) -> Result<Json<Vec<TimeSlot>>, AppError> {
    let slot = state
        .inventory
        .get_slot(slot_id)
        .await?
        .ok_or_else(|| ParkError::NotFound(format!("Parking slot {} not found", slot_id)))?;

    Ok(Json(slot.available_time_slots))
}
