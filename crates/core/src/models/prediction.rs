use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A historical row recording whether a slot was occupied at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupancyObservation {
    pub slot_id: Uuid,
    pub is_occupied: bool,
    pub observed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictAvailabilityRequest {
    pub location_id: Uuid,
    pub slot_id: Uuid,
    pub predict_for: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub probability: f64,
    pub confidence: f64,
    pub recommended_time: Option<DateTime<Utc>>,
}
