use thiserror::Error;

/// Rejections of user input. These are resolved at the request boundary and
/// never reach storage or the messaging channel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Phone number must be exactly 10 digits")]
    InvalidPhone,

    #[error("No time slot selected")]
    MissingTimeSlot,

    #[error("Time slot {0} does not belong to this parking slot")]
    UnknownTimeSlot(String),

    #[error("Time slot {0} is no longer available")]
    TimeSlotUnavailable(String),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Verification code must be exactly 6 digits")]
    InvalidVerificationCode,

    #[error("Cannot move booking from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },
}

#[derive(Error, Debug)]
pub enum ParkError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Fetch error: {0}")]
    Fetch(eyre::Report),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ParkError {
    /// Re-labels a storage failure as a failed history lookup.
    pub fn into_fetch(self) -> Self {
        match self {
            ParkError::Database(report) => ParkError::Fetch(report),
            other => other,
        }
    }
}

pub type ParkResult<T> = Result<T, ParkError>;
