use eyre::Result;
use sqlx::{Executor, Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");
    
    // Create locations table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS locations (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            code VARCHAR(64) NOT NULL UNIQUE,
            name VARCHAR(255) NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            lat DOUBLE PRECISION NOT NULL,
            lng DOUBLE PRECISION NOT NULL,
            total_spots INTEGER NOT NULL CHECK (total_spots >= 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create parking_slots table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS parking_slots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            location_id UUID NOT NULL REFERENCES locations(id),
            number INTEGER NOT NULL,
            is_occupied BOOLEAN NOT NULL DEFAULT FALSE,
            category VARCHAR(16) NOT NULL,
            price INTEGER NOT NULL,
            CONSTRAINT valid_category CHECK (category IN ('standard', 'accessible', 'electric')),
            CONSTRAINT positive_slot_price CHECK (price > 0),
            CONSTRAINT unique_slot_number UNIQUE (location_id, number)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create time_slots table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS time_slots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            slot_id UUID NOT NULL REFERENCES parking_slots(id),
            start_minute INTEGER NOT NULL,
            end_minute INTEGER NOT NULL,
            is_available BOOLEAN NOT NULL DEFAULT TRUE,
            price INTEGER NOT NULL,
            CONSTRAINT valid_time_range CHECK (start_minute >= 0 AND end_minute <= 1440 AND end_minute > start_minute),
            CONSTRAINT positive_time_slot_price CHECK (price > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create bookings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id VARCHAR(32) PRIMARY KEY,
            slot_id UUID NOT NULL REFERENCES parking_slots(id),
            time_slot_id UUID NOT NULL REFERENCES time_slots(id),
            location_name VARCHAR(255) NOT NULL,
            slot_number INTEGER NOT NULL,
            customer_name VARCHAR(255) NOT NULL,
            customer_phone VARCHAR(16) NOT NULL,
            start_minute INTEGER NOT NULL,
            end_minute INTEGER NOT NULL,
            total_price INTEGER NOT NULL,
            status VARCHAR(16) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_status CHECK (status IN ('pending', 'active', 'completed', 'cancelled'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create slot_availability table (occupancy history)
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS slot_availability (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            slot_id UUID NOT NULL REFERENCES parking_slots(id),
            is_occupied BOOLEAN NOT NULL,
            last_updated TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes (several statements, so sent as a simple query)
    pool.execute(
        r#"
        CREATE INDEX IF NOT EXISTS idx_parking_slots_location_id ON parking_slots(location_id);
        CREATE INDEX IF NOT EXISTS idx_time_slots_slot_id ON time_slots(slot_id);
        CREATE INDEX IF NOT EXISTS idx_bookings_customer_phone ON bookings(customer_phone);
        CREATE INDEX IF NOT EXISTS idx_slot_availability_slot_id_last_updated ON slot_availability(slot_id, last_updated DESC);
        "#,
    )
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
