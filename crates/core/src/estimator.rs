//! Historical occupancy ratio for a single slot.
//!
//! The estimate is the share of recent observations in which the slot was
//! occupied. When that share exceeds the configured threshold the caller is
//! pointed at a later time.

use chrono::{DateTime, Duration, Utc};

use crate::models::prediction::{OccupancyObservation, Prediction};

#[derive(Debug, Clone, PartialEq)]
pub struct EstimatorConfig {
    pub confidence: f64,
    pub high_occupancy_threshold: f64,
    pub recommendation_offset: Duration,
    pub history_limit: i64,
    pub empty_history_probability: f64,
    pub empty_history_confidence: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            confidence: 0.7,
            high_occupancy_threshold: 0.8,
            recommendation_offset: Duration::hours(2),
            history_limit: 100,
            empty_history_probability: 0.5,
            empty_history_confidence: 0.0,
        }
    }
}

/// `observations` are expected most recent first; anything past
/// `history_limit` is ignored.
pub fn estimate(
    observations: &[OccupancyObservation],
    target_time: DateTime<Utc>,
    config: &EstimatorConfig,
) -> Prediction {
    let limit = usize::try_from(config.history_limit.max(0)).unwrap_or(usize::MAX);
    let window = &observations[..observations.len().min(limit)];

    if window.is_empty() {
        return Prediction {
            probability: config.empty_history_probability,
            confidence: config.empty_history_confidence,
            recommended_time: None,
        };
    }

    let occupied = window.iter().filter(|o| o.is_occupied).count();
    let probability = occupied as f64 / window.len() as f64;

    let recommended_time = (probability > config.high_occupancy_threshold)
        .then(|| target_time + config.recommendation_offset);

    Prediction {
        probability,
        confidence: config.confidence,
        recommended_time,
    }
}
