use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::parking::WallClock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Active,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Active => "active",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Completed and cancelled bookings are terminal.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Pending, BookingStatus::Active)
                | (BookingStatus::Pending, BookingStatus::Cancelled)
                | (BookingStatus::Active, BookingStatus::Completed)
                | (BookingStatus::Active, BookingStatus::Cancelled)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "active" => Ok(BookingStatus::Active),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(format!("unknown booking status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub slot_id: Uuid,
    pub time_slot_id: Uuid,
    pub location_name: String,
    pub slot_number: i32,
    pub customer_name: String,
    pub customer_phone: String,
    pub start_time: WallClock,
    pub end_time: WallClock,
    pub total_price: i32,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub customer_name: String,
    pub phone: String,
    pub slot_id: Uuid,
    pub time_slot_id: Option<Uuid>,
}

/// What happened to the confirmation message after the booking was stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum NotificationStatus {
    Sent,
    NotDelivered,
    Failed(String),
}

impl NotificationStatus {
    pub fn warning(&self) -> Option<String> {
        match self {
            NotificationStatus::Sent => None,
            NotificationStatus::NotDelivered => {
                Some("Booking confirmed, but the SMS could not be delivered. Please save your booking ID.".to_string())
            }
            NotificationStatus::Failed(reason) => Some(format!(
                "Booking confirmed, but sending the SMS failed ({}). Please save your booking ID.",
                reason
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBookingResponse {
    pub booking: Booking,
    pub notification: NotificationStatus,
    pub warning: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}
