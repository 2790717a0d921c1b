use sqlx::PgPool;
use uuid::Uuid;

use super::models::Billboard;

pub async fn insert(
    pool: &PgPool,
    store_id: Uuid,
    label: &str,
    image_urls: &[String],
    cover_url: &str,
) -> Result<Billboard, sqlx::Error> {
    sqlx::query_as::<_, Billboard>(
        "INSERT INTO billboards (id, store_id, label, image_urls, cover_url) \
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(store_id)
    .bind(label)
    .bind(image_urls)
    .bind(cover_url)
    .fetch_one(pool)
    .await
}

pub async fn list_for_store(pool: &PgPool, store_id: Uuid) -> Result<Vec<Billboard>, sqlx::Error> {
    sqlx::query_as::<_, Billboard>(
        "SELECT * FROM billboards WHERE store_id = $1 ORDER BY created_at DESC",
    )
    .bind(store_id)
    .fetch_all(pool)
    .await
}

pub async fn find_in_store(
    pool: &PgPool,
    billboard_id: Uuid,
    store_id: Uuid,
) -> Result<Option<Billboard>, sqlx::Error> {
    sqlx::query_as::<_, Billboard>("SELECT * FROM billboards WHERE id = $1 AND store_id = $2")
        .bind(billboard_id)
        .bind(store_id)
        .fetch_optional(pool)
        .await
}

pub async fn update(
    pool: &PgPool,
    billboard_id: Uuid,
    store_id: Uuid,
    label: &str,
    image_urls: &[String],
    cover_url: &str,
) -> Result<Option<Billboard>, sqlx::Error> {
    sqlx::query_as::<_, Billboard>(
        "UPDATE billboards SET label = $3, image_urls = $4, cover_url = $5, updated_at = now() \
         WHERE id = $1 AND store_id = $2 RETURNING *",
    )
    .bind(billboard_id)
    .bind(store_id)
    .bind(label)
    .bind(image_urls)
    .bind(cover_url)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, billboard_id: Uuid, store_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM billboards WHERE id = $1 AND store_id = $2")
        .bind(billboard_id)
        .bind(store_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
