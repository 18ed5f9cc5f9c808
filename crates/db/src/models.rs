use chrono::{DateTime, Utc};
use eyre::{eyre, Result};
use parkeasy_core::models::{
    booking::Booking,
    parking::{Coordinates, Location, ParkingSlot, TimeSlot, WallClock},
    prediction::OccupancyObservation,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbLocation {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: String,
    pub lat: f64,
    pub lng: f64,
    pub total_spots: i32,
}

/// A parking slot joined with the name and coordinates of its location.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbParkingSlot {
    pub id: Uuid,
    pub location_id: Uuid,
    pub number: i32,
    pub is_occupied: bool,
    pub category: String,
    pub price: i32,
    pub location_name: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTimeSlot {
    pub id: Uuid,
    pub slot_id: Uuid,
    pub start_minute: i32,
    pub end_minute: i32,
    pub is_available: bool,
    pub price: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: String,
    pub slot_id: Uuid,
    pub time_slot_id: Uuid,
    pub location_name: String,
    pub slot_number: i32,
    pub customer_name: String,
    pub customer_phone: String,
    pub start_minute: i32,
    pub end_minute: i32,
    pub total_price: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSlotObservation {
    pub slot_id: Uuid,
    pub is_occupied: bool,
    pub last_updated: DateTime<Utc>,
}

fn wall_clock(minutes: i32) -> Result<WallClock> {
    u16::try_from(minutes)
        .ok()
        .and_then(WallClock::from_minutes)
        .ok_or_else(|| eyre!("stored minute value {} is outside a day", minutes))
}

impl From<DbLocation> for Location {
    fn from(row: DbLocation) -> Self {
        Location {
            id: row.id,
            code: row.code,
            name: row.name,
            description: row.description,
            coordinates: Coordinates {
                lat: row.lat,
                lng: row.lng,
            },
            total_spots: row.total_spots,
        }
    }
}

impl TryFrom<DbTimeSlot> for TimeSlot {
    type Error = eyre::Report;

    fn try_from(row: DbTimeSlot) -> Result<Self> {
        let time_slot = TimeSlot {
            id: row.id,
            start_time: wall_clock(row.start_minute)?,
            end_time: wall_clock(row.end_minute)?,
            is_available: row.is_available,
            price: row.price,
        };
        time_slot.validate().map_err(|e| eyre!(e))?;
        Ok(time_slot)
    }
}

impl DbParkingSlot {
    pub fn into_slot(self, time_slots: Vec<TimeSlot>) -> Result<ParkingSlot> {
        Ok(ParkingSlot {
            id: self.id,
            location_id: self.location_id,
            number: self.number,
            is_occupied: self.is_occupied,
            category: self.category.parse().map_err(|e: String| eyre!(e))?,
            price: self.price,
            location_name: self.location_name,
            coordinates: Coordinates {
                lat: self.lat,
                lng: self.lng,
            },
            available_time_slots: time_slots,
        })
    }
}

impl TryFrom<DbBooking> for Booking {
    type Error = eyre::Report;

    fn try_from(row: DbBooking) -> Result<Self> {
        Ok(Booking {
            id: row.id,
            slot_id: row.slot_id,
            time_slot_id: row.time_slot_id,
            location_name: row.location_name,
            slot_number: row.slot_number,
            customer_name: row.customer_name,
            customer_phone: row.customer_phone,
            start_time: wall_clock(row.start_minute)?,
            end_time: wall_clock(row.end_minute)?,
            total_price: row.total_price,
            status: row.status.parse().map_err(|e: String| eyre!(e))?,
            created_at: row.created_at,
        })
    }
}

impl From<DbSlotObservation> for OccupancyObservation {
    fn from(row: DbSlotObservation) -> Self {
        OccupancyObservation {
            slot_id: row.slot_id,
            is_occupied: row.is_occupied,
            observed_at: row.last_updated,
        }
    }
}
