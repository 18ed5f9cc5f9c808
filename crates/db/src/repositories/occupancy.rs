use crate::models::DbSlotObservation;
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{PgExecutor, Pool, Postgres};
use uuid::Uuid;

pub async fn get_recent_observations(
    pool: &Pool<Postgres>,
    slot_id: Uuid,
    limit: i64,
) -> Result<Vec<DbSlotObservation>> {
    let rows = sqlx::query_as::<_, DbSlotObservation>(
        r#"
        SELECT slot_id, is_occupied, last_updated
        FROM slot_availability
        WHERE slot_id = $1
        ORDER BY last_updated DESC
        LIMIT $2
        "#,
    )
    .bind(slot_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn record_observation<'e, E: PgExecutor<'e>>(
    executor: E,
    slot_id: Uuid,
    is_occupied: bool,
    observed_at: DateTime<Utc>,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO slot_availability (id, slot_id, is_occupied, last_updated)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(slot_id)
    .bind(is_occupied)
    .bind(observed_at)
    .execute(executor)
    .await?;

    Ok(())
}
