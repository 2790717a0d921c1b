use sqlx::PgPool;
use uuid::Uuid;

use super::models::Color;

pub async fn insert(
    pool: &PgPool,
    store_id: Uuid,
    name: &str,
    value: &str,
) -> Result<Color, sqlx::Error> {
    sqlx::query_as::<_, Color>(
        "INSERT INTO colors (id, store_id, name, value) VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(store_id)
    .bind(name)
    .bind(value)
    .fetch_one(pool)
    .await
}

pub async fn list_for_store(pool: &PgPool, store_id: Uuid) -> Result<Vec<Color>, sqlx::Error> {
    sqlx::query_as::<_, Color>("SELECT * FROM colors WHERE store_id = $1 ORDER BY created_at DESC")
        .bind(store_id)
        .fetch_all(pool)
        .await
}

pub async fn find_in_store(
    pool: &PgPool,
    color_id: Uuid,
    store_id: Uuid,
) -> Result<Option<Color>, sqlx::Error> {
    sqlx::query_as::<_, Color>("SELECT * FROM colors WHERE id = $1 AND store_id = $2")
        .bind(color_id)
        .bind(store_id)
        .fetch_optional(pool)
        .await
}

pub async fn update(
    pool: &PgPool,
    color_id: Uuid,
    store_id: Uuid,
    name: &str,
    value: &str,
) -> Result<Option<Color>, sqlx::Error> {
    sqlx::query_as::<_, Color>(
        "UPDATE colors SET name = $3, value = $4, updated_at = now() \
         WHERE id = $1 AND store_id = $2 RETURNING *",
    )
    .bind(color_id)
    .bind(store_id)
    .bind(name)
    .bind(value)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, color_id: Uuid, store_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM colors WHERE id = $1 AND store_id = $2")
        .bind(color_id)
        .bind(store_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
