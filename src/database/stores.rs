use sqlx::PgPool;
use uuid::Uuid;

use super::models::Store;

pub async fn insert(pool: &PgPool, user_id: Uuid, name: &str) -> Result<Store, sqlx::Error> {
    sqlx::query_as::<_, Store>(
        "INSERT INTO stores (id, user_id, name) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(name)
    .fetch_one(pool)
    .await
}

pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Store>, sqlx::Error> {
    sqlx::query_as::<_, Store>(
        "SELECT * FROM stores WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// The ownership check: a store is only visible through the user that owns it.
pub async fn find_owned(
    pool: &PgPool,
    store_id: Uuid,
    user_id: Uuid,
) -> Result<Option<Store>, sqlx::Error> {
    sqlx::query_as::<_, Store>("SELECT * FROM stores WHERE id = $1 AND user_id = $2")
        .bind(store_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn rename(
    pool: &PgPool,
    store_id: Uuid,
    user_id: Uuid,
    name: &str,
) -> Result<Option<Store>, sqlx::Error> {
    sqlx::query_as::<_, Store>(
        "UPDATE stores SET name = $3, updated_at = now() WHERE id = $1 AND user_id = $2 RETURNING *",
    )
    .bind(store_id)
    .bind(user_id)
    .bind(name)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, store_id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM stores WHERE id = $1 AND user_id = $2")
        .bind(store_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
