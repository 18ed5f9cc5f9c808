use axum::http::StatusCode;
use chrono::Duration;
use eyre::eyre;
use mockall::predicate::eq;
use parkeasy_api::handlers::prediction::predict;
use parkeasy_core::{
    errors::ParkError,
    models::prediction::{OccupancyObservation, PredictAvailabilityRequest},
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{fixed_now, server, TestContext};

fn history(slot_id: Uuid, occupied: usize, total: usize) -> Vec<OccupancyObservation> {
    (0..total)
        .map(|i| OccupancyObservation {
            slot_id,
            is_occupied: i < occupied,
            observed_at: fixed_now() - Duration::hours(i as i64),
        })
        .collect()
}

fn request(slot_id: Uuid) -> PredictAvailabilityRequest {
    PredictAvailabilityRequest {
        location_id: Uuid::new_v4(),
        slot_id,
        predict_for: fixed_now(),
    }
}

#[rstest]
#[case(9, 10, 0.9, true)]
#[case(8, 10, 0.8, false)]
#[case(1, 4, 0.25, false)]
#[case(0, 3, 0.0, false)]
#[tokio::test]
async fn test_prediction_from_history(
    #[case] occupied: usize,
    #[case] total: usize,
    #[case] probability: f64,
    #[case] recommends_later: bool,
) {
    let mut ctx = TestContext::new();
    let slot_id = Uuid::new_v4();
    let observations = history(slot_id, occupied, total);
    ctx.occupancy
        .expect_recent_observations()
        .with(eq(slot_id), eq(100))
        .times(1)
        .returning(move |_, _| Ok(observations.clone()));
    let state = ctx.build_state();

    let prediction = predict(&state, &request(slot_id)).await.unwrap();

    assert_eq!(prediction.probability, probability);
    assert_eq!(prediction.confidence, 0.7);
    let expected_time = recommends_later.then(|| fixed_now() + Duration::hours(2));
    assert_eq!(prediction.recommended_time, expected_time);
}

#[tokio::test]
async fn test_empty_history_is_neutral() {
    let mut ctx = TestContext::new();
    ctx.occupancy
        .expect_recent_observations()
        .returning(|_, _| Ok(Vec::new()));
    let state = ctx.build_state();

    let prediction = predict(&state, &request(Uuid::new_v4())).await.unwrap();

    assert!(!prediction.probability.is_nan());
    assert_eq!(prediction.probability, 0.5);
    assert_eq!(prediction.confidence, 0.0);
    assert_eq!(prediction.recommended_time, None);
}

#[tokio::test]
async fn test_repeated_requests_agree() {
    let mut ctx = TestContext::new();
    let slot_id = Uuid::new_v4();
    let observations = history(slot_id, 3, 7);
    ctx.occupancy
        .expect_recent_observations()
        .times(2)
        .returning(move |_, _| Ok(observations.clone()));
    let state = ctx.build_state();

    let first = predict(&state, &request(slot_id)).await.unwrap();
    let second = predict(&state, &request(slot_id)).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_history_failure_is_a_fetch_error() {
    let mut ctx = TestContext::new();
    ctx.occupancy
        .expect_recent_observations()
        .returning(|_, _| Err(ParkError::Database(eyre!("connection reset"))));
    let state = ctx.build_state();

    let err = predict(&state, &request(Uuid::new_v4())).await.unwrap_err();

    assert!(matches!(err, ParkError::Fetch(_)));
}

#[tokio::test]
async fn test_predict_endpoint_uses_camel_case() {
    let mut ctx = TestContext::new();
    let slot_id = Uuid::new_v4();
    let observations = history(slot_id, 9, 10);
    ctx.occupancy
        .expect_recent_observations()
        .returning(move |_, _| Ok(observations.clone()));
    let server = server(ctx.build_state());

    let response = server
        .post("/api/predict-availability")
        .json(&json!({
            "locationId": Uuid::new_v4(),
            "slotId": slot_id,
            "predictFor": "2024-03-20T10:00:00Z",
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["confidence"], json!(0.7));
    assert_eq!(body["recommendedTime"], json!("2024-03-20T12:00:00Z"));
    assert!(body.get("probability").is_some());
}

#[tokio::test]
async fn test_predict_endpoint_reports_bad_gateway() {
    let mut ctx = TestContext::new();
    ctx.occupancy
        .expect_recent_observations()
        .returning(|_, _| Err(ParkError::Database(eyre!("connection reset"))));
    let server = server(ctx.build_state());

    let response = server
        .post("/api/predict-availability")
        .json(&json!({
            "locationId": Uuid::new_v4(),
            "slotId": Uuid::new_v4(),
            "predictFor": "2024-03-20T10:00:00Z",
        }))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("connection reset"));
}

#[tokio::test]
async fn test_predict_endpoint_rejects_missing_fields() {
    let mut ctx = TestContext::new();
    ctx.occupancy.expect_recent_observations().times(0);
    let server = server(ctx.build_state());

    let response = server
        .post("/api/predict-availability")
        .json(&json!({ "slotId": Uuid::new_v4() }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Validation error: Malformed request"));
}
