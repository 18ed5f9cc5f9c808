use crate::models::DbTimeSlot;
use eyre::Result;
use sqlx::{PgExecutor, Pool, Postgres};
use uuid::Uuid;

pub async fn create_time_slot<'e, E: PgExecutor<'e>>(
    executor: E,
    slot_id: Uuid,
    start_minute: i32,
    end_minute: i32,
    is_available: bool,
    price: i32,
) -> Result<DbTimeSlot> {
    let id = Uuid::new_v4();

    let time_slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        INSERT INTO time_slots (id, slot_id, start_minute, end_minute, is_available, price)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, slot_id, start_minute, end_minute, is_available, price
        "#,
    )
    .bind(id)
    .bind(slot_id)
    .bind(start_minute)
    .bind(end_minute)
    .bind(is_available)
    .bind(price)
    .fetch_one(executor)
    .await?;

    Ok(time_slot)
}

pub async fn get_time_slots_by_slot_id(
    pool: &Pool<Postgres>,
    slot_id: Uuid,
) -> Result<Vec<DbTimeSlot>> {
    let time_slots = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, slot_id, start_minute, end_minute, is_available, price
        FROM time_slots
        WHERE slot_id = $1
        ORDER BY start_minute ASC
        "#,
    )
    .bind(slot_id)
    .fetch_all(pool)
    .await?;

    Ok(time_slots)
}

/// Time slots for several parking slots at once, ordered by slot then start.
pub async fn get_time_slots_by_slot_ids(
    pool: &Pool<Postgres>,
    slot_ids: &[Uuid],
) -> Result<Vec<DbTimeSlot>> {
    let time_slots = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, slot_id, start_minute, end_minute, is_available, price
        FROM time_slots
        WHERE slot_id = ANY($1)
        ORDER BY slot_id, start_minute ASC
        "#,
    )
    .bind(slot_ids)
    .fetch_all(pool)
    .await?;

    Ok(time_slots)
}

/// Conditional update so two concurrent bookings cannot both take the slot.
pub async fn claim_time_slot(
    pool: &Pool<Postgres>,
    slot_id: Uuid,
    time_slot_id: Uuid,
) -> Result<bool> {
    let claimed = sqlx::query_scalar::<_, Uuid>(
        r#"
        UPDATE time_slots
        SET is_available = FALSE
        WHERE id = $1 AND slot_id = $2 AND is_available = TRUE
        RETURNING id
        "#,
    )
    .bind(time_slot_id)
    .bind(slot_id)
    .fetch_optional(pool)
    .await?;

    Ok(claimed.is_some())
}

pub async fn release_time_slot(
    pool: &Pool<Postgres>,
    slot_id: Uuid,
    time_slot_id: Uuid,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE time_slots
        SET is_available = TRUE
        WHERE id = $1 AND slot_id = $2
        "#,
    )
    .bind(time_slot_id)
    .bind(slot_id)
    .execute(pool)
    .await?;

    Ok(())
}
