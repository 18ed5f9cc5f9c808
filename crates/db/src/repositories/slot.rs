use crate::models::DbParkingSlot;
use eyre::Result;
use sqlx::{PgExecutor, Pool, Postgres};
use uuid::Uuid;

pub async fn create_slot<'e, E: PgExecutor<'e>>(
    executor: E,
    id: Uuid,
    location_id: Uuid,
    number: i32,
    is_occupied: bool,
    category: &str,
    price: i32,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO parking_slots (id, location_id, number, is_occupied, category, price)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(id)
    .bind(location_id)
    .bind(number)
    .bind(is_occupied)
    .bind(category)
    .bind(price)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn get_slots_by_location_id(
    pool: &Pool<Postgres>,
    location_id: Uuid,
) -> Result<Vec<DbParkingSlot>> {
    let slots = sqlx::query_as::<_, DbParkingSlot>(
        r#"
        SELECT s.id, s.location_id, s.number, s.is_occupied, s.category, s.price,
               l.name AS location_name, l.lat, l.lng
        FROM parking_slots s
        JOIN locations l ON l.id = s.location_id
        WHERE s.location_id = $1
        ORDER BY s.number ASC
        "#,
    )
    .bind(location_id)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

pub async fn get_slot_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbParkingSlot>> {
    let slot = sqlx::query_as::<_, DbParkingSlot>(
        r#"
        SELECT s.id, s.location_id, s.number, s.is_occupied, s.category, s.price,
               l.name AS location_name, l.lat, l.lng
        FROM parking_slots s
        JOIN locations l ON l.id = s.location_id
        WHERE s.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(slot)
}
