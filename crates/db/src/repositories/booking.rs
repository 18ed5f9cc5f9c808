use crate::models::DbBooking;
use eyre::Result;
use parkeasy_core::models::booking::{Booking, BookingStatus};
use sqlx::{Pool, Postgres};

pub async fn create_booking(pool: &Pool<Postgres>, booking: &Booking) -> Result<DbBooking> {
    let row = sqlx::query_as::<_, DbBooking>(
        r#"
        INSERT INTO bookings (
            id, slot_id, time_slot_id, location_name, slot_number, customer_name,
            customer_phone, start_minute, end_minute, total_price, status, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING id, slot_id, time_slot_id, location_name, slot_number, customer_name,
                  customer_phone, start_minute, end_minute, total_price, status, created_at
        "#,
    )
    .bind(&booking.id)
    .bind(booking.slot_id)
    .bind(booking.time_slot_id)
    .bind(&booking.location_name)
    .bind(booking.slot_number)
    .bind(&booking.customer_name)
    .bind(&booking.customer_phone)
    .bind(i32::from(booking.start_time.minutes()))
    .bind(i32::from(booking.end_time.minutes()))
    .bind(booking.total_price)
    .bind(booking.status.as_str())
    .bind(booking.created_at)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_booking_by_id(pool: &Pool<Postgres>, id: &str) -> Result<Option<DbBooking>> {
    let row = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, slot_id, time_slot_id, location_name, slot_number, customer_name,
               customer_phone, start_minute, end_minute, total_price, status, created_at
        FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn get_bookings_by_phone(pool: &Pool<Postgres>, phone: &str) -> Result<Vec<DbBooking>> {
    let rows = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, slot_id, time_slot_id, location_name, slot_number, customer_name,
               customer_phone, start_minute, end_minute, total_price, status, created_at
        FROM bookings
        WHERE customer_phone = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(phone)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Only applies when the stored status still equals `from`, so concurrent
/// transitions on the same booking cannot both succeed.
pub async fn update_booking_status(
    pool: &Pool<Postgres>,
    id: &str,
    from: BookingStatus,
    to: BookingStatus,
) -> Result<Option<DbBooking>> {
    let row = sqlx::query_as::<_, DbBooking>(
        r#"
        UPDATE bookings
        SET status = $2
        WHERE id = $1 AND status = $3
        RETURNING id, slot_id, time_slot_id, location_name, slot_number, customer_name,
                  customer_phone, start_minute, end_minute, total_price, status, created_at
        "#,
    )
    .bind(id)
    .bind(to.as_str())
    .bind(from.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
