//! Postgres-backed implementation of the core storage traits.

use std::collections::HashMap;

use async_trait::async_trait;
use parkeasy_core::{
    errors::ParkResult,
    models::{
        booking::{Booking, BookingStatus},
        parking::{Location, ParkingSlot, TimeSlot},
        prediction::OccupancyObservation,
    },
    repository::{BookingRepository, InventoryRepository, OccupancyRepository},
};
use uuid::Uuid;

use crate::{repositories, DbPool};

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryRepository for PgStore {
    async fn list_locations(&self) -> ParkResult<Vec<Location>> {
        let rows = repositories::location::list_locations(&self.pool).await?;
        Ok(rows.into_iter().map(Location::from).collect())
    }

    async fn get_location(&self, location_id: Uuid) -> ParkResult<Option<Location>> {
        let row = repositories::location::get_location_by_id(&self.pool, location_id).await?;
        Ok(row.map(Location::from))
    }

    async fn list_slots(&self, location_id: Uuid) -> ParkResult<Vec<ParkingSlot>> {
        let slots = repositories::slot::get_slots_by_location_id(&self.pool, location_id).await?;
        let slot_ids: Vec<Uuid> = slots.iter().map(|s| s.id).collect();
        let time_slot_rows =
            repositories::time_slot::get_time_slots_by_slot_ids(&self.pool, &slot_ids).await?;

        let mut by_slot: HashMap<Uuid, Vec<TimeSlot>> = HashMap::new();
        for row in time_slot_rows {
            let slot_id = row.slot_id;
            by_slot.entry(slot_id).or_default().push(TimeSlot::try_from(row)?);
        }

        let mut result = Vec::with_capacity(slots.len());
        for slot in slots {
            let time_slots = by_slot.remove(&slot.id).unwrap_or_default();
            result.push(slot.into_slot(time_slots)?);
        }
        Ok(result)
    }

    async fn get_slot(&self, slot_id: Uuid) -> ParkResult<Option<ParkingSlot>> {
        let Some(row) = repositories::slot::get_slot_by_id(&self.pool, slot_id).await? else {
            return Ok(None);
        };
        let time_slots = self.get_time_slots(slot_id).await?;
        Ok(Some(row.into_slot(time_slots)?))
    }

    async fn get_time_slots(&self, slot_id: Uuid) -> ParkResult<Vec<TimeSlot>> {
        let rows = repositories::time_slot::get_time_slots_by_slot_id(&self.pool, slot_id).await?;
        let time_slots = rows
            .into_iter()
            .map(TimeSlot::try_from)
            .collect::<eyre::Result<Vec<_>>>()?;
        Ok(time_slots)
    }

    async fn claim_time_slot(&self, slot_id: Uuid, time_slot_id: Uuid) -> ParkResult<bool> {
        Ok(repositories::time_slot::claim_time_slot(&self.pool, slot_id, time_slot_id).await?)
    }

    async fn release_time_slot(&self, slot_id: Uuid, time_slot_id: Uuid) -> ParkResult<()> {
        Ok(repositories::time_slot::release_time_slot(&self.pool, slot_id, time_slot_id).await?)
    }
}

#[async_trait]
impl BookingRepository for PgStore {
    async fn create_booking(&self, booking: &Booking) -> ParkResult<Booking> {
        let row = repositories::booking::create_booking(&self.pool, booking).await?;
        Ok(Booking::try_from(row)?)
    }

    async fn get_booking(&self, id: &str) -> ParkResult<Option<Booking>> {
        let row = repositories::booking::get_booking_by_id(&self.pool, id).await?;
        Ok(row.map(Booking::try_from).transpose()?)
    }

    async fn list_bookings_by_phone(&self, phone: &str) -> ParkResult<Vec<Booking>> {
        let rows = repositories::booking::get_bookings_by_phone(&self.pool, phone).await?;
        let bookings = rows
            .into_iter()
            .map(Booking::try_from)
            .collect::<eyre::Result<Vec<_>>>()?;
        Ok(bookings)
    }

    async fn update_status(
        &self,
        id: &str,
        from: BookingStatus,
        to: BookingStatus,
    ) -> ParkResult<Option<Booking>> {
        let row = repositories::booking::update_booking_status(&self.pool, id, from, to).await?;
        Ok(row.map(Booking::try_from).transpose()?)
    }
}

#[async_trait]
impl OccupancyRepository for PgStore {
    async fn recent_observations(
        &self,
        slot_id: Uuid,
        limit: i64,
    ) -> ParkResult<Vec<OccupancyObservation>> {
        let rows =
            repositories::occupancy::get_recent_observations(&self.pool, slot_id, limit).await?;
        Ok(rows.into_iter().map(OccupancyObservation::from).collect())
    }
}
