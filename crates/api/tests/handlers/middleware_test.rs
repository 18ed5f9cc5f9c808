use axum::http::StatusCode;
use parkeasy_api::middleware::error_handling::{map_error, status_for};
use parkeasy_core::errors::{ParkError, ValidationError};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case(ParkError::NotFound("Booking PK1 not found".to_string()), StatusCode::NOT_FOUND)]
#[case(ParkError::Validation(ValidationError::InvalidPhone), StatusCode::BAD_REQUEST)]
#[case(ParkError::Validation(ValidationError::MissingTimeSlot), StatusCode::BAD_REQUEST)]
#[case(
    ParkError::Validation(ValidationError::UnknownTimeSlot("ts".to_string())),
    StatusCode::BAD_REQUEST
)]
#[case(
    ParkError::Validation(ValidationError::TimeSlotUnavailable("ts".to_string())),
    StatusCode::CONFLICT
)]
#[case(
    ParkError::Validation(ValidationError::InvalidStatusTransition {
        from: "completed".to_string(),
        to: "active".to_string(),
    }),
    StatusCode::CONFLICT
)]
#[case(ParkError::Authentication("Invalid OTP".to_string()), StatusCode::UNAUTHORIZED)]
#[case(ParkError::ServiceUnavailable("SMS down".to_string()), StatusCode::SERVICE_UNAVAILABLE)]
#[case(ParkError::Fetch(eyre::eyre!("history unavailable")), StatusCode::BAD_GATEWAY)]
#[case(ParkError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: ParkError, #[case] expected: StatusCode) {
    assert_eq!(status_for(&error), expected);
}

#[tokio::test]
async fn test_error_handling_internal() {
    let error = ParkError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    let response = map_error(error);

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_error_body_carries_message() {
    let response = map_error(ParkError::NotFound("Booking PK1 not found".to_string()));
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(
        body,
        serde_json::json!({ "error": "Resource not found: Booking PK1 not found" })
    );
}
