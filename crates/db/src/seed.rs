//! Demo inventory for a fresh database: three Vizag locations with hourly
//! time slots for every spot.

use chrono::Utc;
use eyre::Result;
use parkeasy_core::models::parking::SlotCategory;
use rand::Rng;
use sqlx::{Pool, Postgres};
use tracing::info;
use uuid::Uuid;

use crate::repositories;

pub struct DemoLocation {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub total_spots: i32,
}

pub const DEMO_LOCATIONS: [DemoLocation; 3] = [
    DemoLocation {
        code: "beach-road",
        name: "RK Beach Road",
        description: "Prime parking near beach front",
        lat: 17.7209,
        lng: 83.3435,
        total_spots: 15,
    },
    DemoLocation {
        code: "jagadamba",
        name: "Jagadamba Junction",
        description: "Central shopping district parking",
        lat: 17.7127,
        lng: 83.3047,
        total_spots: 20,
    },
    DemoLocation {
        code: "dwaraka",
        name: "Dwaraka Nagar",
        description: "Commercial hub parking",
        lat: 17.7277,
        lng: 83.3051,
        total_spots: 25,
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct SeedTimeSlot {
    pub start_minute: i32,
    pub end_minute: i32,
    pub is_available: bool,
    pub price: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeedSlot {
    pub number: i32,
    pub is_occupied: bool,
    pub category: SlotCategory,
    pub price: i32,
    pub time_slots: Vec<SeedTimeSlot>,
}

/// Category by zero-based spot index.
pub fn category_for(index: i32) -> SlotCategory {
    if index % 5 == 0 {
        SlotCategory::Accessible
    } else if index % 3 == 0 {
        SlotCategory::Electric
    } else {
        SlotCategory::Standard
    }
}

/// Rupees per hour, 20 to 49 inclusive.
fn demo_price<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    rng.gen_range(20..50)
}

pub fn generate_time_slots<R: Rng + ?Sized>(rng: &mut R) -> Vec<SeedTimeSlot> {
    (0..24)
        .map(|hour| SeedTimeSlot {
            start_minute: hour * 60,
            end_minute: (hour + 1) * 60,
            is_available: rng.gen_bool(0.7),
            price: demo_price(rng),
        })
        .collect()
}

pub fn generate_slots<R: Rng + ?Sized>(total_spots: i32, rng: &mut R) -> Vec<SeedSlot> {
    (0..total_spots)
        .map(|i| SeedSlot {
            number: i + 1,
            is_occupied: rng.gen_bool(0.3),
            category: category_for(i),
            price: demo_price(rng),
            time_slots: generate_time_slots(rng),
        })
        .collect()
}

/// Inserts the demo inventory unless locations already exist. Returns the
/// number of slots written.
///
/// Everything is written in one transaction, so a failed run leaves the
/// database empty and the next run seeds again.
pub async fn seed_demo_inventory<R: Rng + Send + ?Sized>(
    pool: &Pool<Postgres>,
    rng: &mut R,
) -> Result<usize> {
    let mut tx = pool.begin().await?;

    if repositories::location::count_locations(&mut *tx).await? > 0 {
        info!("Inventory already present, skipping demo seed");
        return Ok(0);
    }

    let mut written = 0;
    for demo in &DEMO_LOCATIONS {
        let location = repositories::location::create_location(
            &mut *tx,
            demo.code,
            demo.name,
            demo.description,
            demo.lat,
            demo.lng,
            demo.total_spots,
        )
        .await?;

        for slot in generate_slots(demo.total_spots, rng) {
            let slot_id = Uuid::new_v4();
            repositories::slot::create_slot(
                &mut *tx,
                slot_id,
                location.id,
                slot.number,
                slot.is_occupied,
                slot.category.as_str(),
                slot.price,
            )
            .await?;
            // First history row, so estimates have something to work from
            repositories::occupancy::record_observation(
                &mut *tx,
                slot_id,
                slot.is_occupied,
                Utc::now(),
            )
            .await?;

            for ts in &slot.time_slots {
                repositories::time_slot::create_time_slot(
                    &mut *tx,
                    slot_id,
                    ts.start_minute,
                    ts.end_minute,
                    ts.is_available,
                    ts.price,
                )
                .await?;
            }
            written += 1;
        }
        info!("Seeded {} slots for {}", demo.total_spots, demo.name);
    }

    tx.commit().await?;
    Ok(written)
}
