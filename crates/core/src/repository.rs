//! Seams between the booking core and its collaborators.
//!
//! Storage and messaging sit behind these traits so the workflows can run
//! against Postgres and the SMS provider in production and against mocks in
//! tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::ParkResult;
use crate::models::booking::{Booking, BookingStatus};
use crate::models::parking::{Location, ParkingSlot, TimeSlot};
use crate::models::prediction::OccupancyObservation;

#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn list_locations(&self) -> ParkResult<Vec<Location>>;

    async fn get_location(&self, location_id: Uuid) -> ParkResult<Option<Location>>;

    /// Slots of a location, each carrying its time slots ordered by start.
    async fn list_slots(&self, location_id: Uuid) -> ParkResult<Vec<ParkingSlot>>;

    async fn get_slot(&self, slot_id: Uuid) -> ParkResult<Option<ParkingSlot>>;

    async fn get_time_slots(&self, slot_id: Uuid) -> ParkResult<Vec<TimeSlot>>;

    /// Flips a time slot from available to taken. Returns `false` if it was
    /// already taken or does not belong to `slot_id`.
    async fn claim_time_slot(&self, slot_id: Uuid, time_slot_id: Uuid) -> ParkResult<bool>;

    async fn release_time_slot(&self, slot_id: Uuid, time_slot_id: Uuid) -> ParkResult<()>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create_booking(&self, booking: &Booking) -> ParkResult<Booking>;

    async fn get_booking(&self, id: &str) -> ParkResult<Option<Booking>>;

    /// Most recent first.
    async fn list_bookings_by_phone(&self, phone: &str) -> ParkResult<Vec<Booking>>;

    /// Moves the booking from `from` to `to` in one conditional write.
    /// Returns `None` if the booking is missing or no longer in `from`.
    async fn update_status(
        &self,
        id: &str,
        from: BookingStatus,
        to: BookingStatus,
    ) -> ParkResult<Option<Booking>>;
}

#[async_trait]
pub trait OccupancyRepository: Send + Sync {
    /// Up to `limit` observations for the slot, most recent first.
    async fn recent_observations(
        &self,
        slot_id: Uuid,
        limit: i64,
    ) -> ParkResult<Vec<OccupancyObservation>>;
}

/// Outbound SMS and one-time-code verification.
///
/// Implementations normalize the destination and check upstream health
/// before each call. Exhausted retries surface as
/// [`ParkError::ServiceUnavailable`](crate::errors::ParkError::ServiceUnavailable).
#[async_trait]
pub trait MessagingChannel: Send + Sync {
    async fn send_message(&self, destination: &str, body: &str) -> ParkResult<bool>;

    async fn request_verification_code(&self, destination: &str) -> ParkResult<bool>;

    async fn confirm_verification_code(&self, destination: &str, code: &str) -> ParkResult<bool>;
}
