use async_trait::async_trait;
use mockall::mock;
use parkeasy_core::{
    errors::ParkResult,
    models::{
        booking::{Booking, BookingStatus},
        parking::{Location, ParkingSlot, TimeSlot},
        prediction::OccupancyObservation,
    },
    repository::{BookingRepository, InventoryRepository, MessagingChannel, OccupancyRepository},
};
use uuid::Uuid;

// Mock repositories for testing
mock! {
    pub InventoryRepo {}

    #[async_trait]
    impl InventoryRepository for InventoryRepo {
        async fn list_locations(&self) -> ParkResult<Vec<Location>>;
        async fn get_location(&self, location_id: Uuid) -> ParkResult<Option<Location>>;
        async fn list_slots(&self, location_id: Uuid) -> ParkResult<Vec<ParkingSlot>>;
        async fn get_slot(&self, slot_id: Uuid) -> ParkResult<Option<ParkingSlot>>;
        async fn get_time_slots(&self, slot_id: Uuid) -> ParkResult<Vec<TimeSlot>>;
        async fn claim_time_slot(&self, slot_id: Uuid, time_slot_id: Uuid) -> ParkResult<bool>;
        async fn release_time_slot(&self, slot_id: Uuid, time_slot_id: Uuid) -> ParkResult<()>;
    }
}

mock! {
    pub BookingRepo {}

    #[async_trait]
    impl BookingRepository for BookingRepo {
        async fn create_booking(&self, booking: &Booking) -> ParkResult<Booking>;
        async fn get_booking(&self, id: &str) -> ParkResult<Option<Booking>>;
        async fn list_bookings_by_phone(&self, phone: &str) -> ParkResult<Vec<Booking>>;
        async fn update_status(
            &self,
            id: &str,
            from: BookingStatus,
            to: BookingStatus,
        ) -> ParkResult<Option<Booking>>;
    }
}

mock! {
    pub OccupancyRepo {}

    #[async_trait]
    impl OccupancyRepository for OccupancyRepo {
        async fn recent_observations(
            &self,
            slot_id: Uuid,
            limit: i64,
        ) -> ParkResult<Vec<OccupancyObservation>>;
    }
}

mock! {
    pub Messaging {}

    #[async_trait]
    impl MessagingChannel for Messaging {
        async fn send_message(&self, destination: &str, body: &str) -> ParkResult<bool>;
        async fn request_verification_code(&self, destination: &str) -> ParkResult<bool>;
        async fn confirm_verification_code(&self, destination: &str, code: &str) -> ParkResult<bool>;
    }
}
