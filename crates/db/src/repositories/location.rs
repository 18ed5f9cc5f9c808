use crate::models::DbLocation;
use eyre::Result;
use sqlx::{PgExecutor, Pool, Postgres};
use uuid::Uuid;

pub async fn create_location<'e, E: PgExecutor<'e>>(
    executor: E,
    code: &str,
    name: &str,
    description: &str,
    lat: f64,
    lng: f64,
    total_spots: i32,
) -> Result<DbLocation> {
    let id = Uuid::new_v4();

    let location = sqlx::query_as::<_, DbLocation>(
        r#"
        INSERT INTO locations (id, code, name, description, lat, lng, total_spots)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, code, name, description, lat, lng, total_spots
        "#,
    )
    .bind(id)
    .bind(code)
    .bind(name)
    .bind(description)
    .bind(lat)
    .bind(lng)
    .bind(total_spots)
    .fetch_one(executor)
    .await?;

    Ok(location)
}

pub async fn list_locations(pool: &Pool<Postgres>) -> Result<Vec<DbLocation>> {
    let locations = sqlx::query_as::<_, DbLocation>(
        r#"
        SELECT id, code, name, description, lat, lng, total_spots
        FROM locations
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(locations)
}

pub async fn get_location_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbLocation>> {
    let location = sqlx::query_as::<_, DbLocation>(
        r#"
        SELECT id, code, name, description, lat, lng, total_spots
        FROM locations
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(location)
}

pub async fn count_locations<'e, E: PgExecutor<'e>>(executor: E) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM locations")
        .fetch_one(executor)
        .await?;

    Ok(count)
}
