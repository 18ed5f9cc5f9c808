//! # Availability Prediction Handler
//!
//! Answers "how likely is this slot to be occupied?" from the slot's recent
//! occupancy history. See [`parkeasy_core::estimator`] for the estimate
//! itself; this module only fetches history and shapes the HTTP contract.

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use parkeasy_core::{
    errors::{ParkError, ParkResult, ValidationError},
    estimator::estimate,
    models::prediction::{PredictAvailabilityRequest, Prediction},
};
use tracing::debug;

use crate::{middleware::error_handling::AppError, ApiState};

/// Fetches recent history for the slot and estimates occupancy.
///
/// # Errors
///
/// * `ParkError::Fetch` - The occupancy history could not be read
pub async fn predict(state: &ApiState, request: &PredictAvailabilityRequest) -> ParkResult<Prediction> {
    let observations = state
        .occupancy
        .recent_observations(request.slot_id, state.estimator.history_limit)
        .await
        .map_err(ParkError::into_fetch)?;

    debug!(
        "Estimating slot {} at location {} from {} observations",
        request.slot_id,
        request.location_id,
        observations.len()
    );

    Ok(estimate(&observations, request.predict_for, &state.estimator))
}

#[axum::debug_handler]
pub async fn predict_availability(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<PredictAvailabilityRequest>, JsonRejection>,
) -> Result<Json<Prediction>, AppError> {
    let Json(request) =
        payload.map_err(|rejection| ValidationError::MalformedRequest(rejection.body_text()))?;

    let prediction = predict(&state, &request).await?;
    Ok(Json(prediction))
}
