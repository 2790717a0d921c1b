use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{Billboard, Category, CategoryDetail};

pub async fn insert(
    pool: &PgPool,
    store_id: Uuid,
    billboard_id: Uuid,
    name: &str,
) -> Result<Category, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        "INSERT INTO categories (id, store_id, billboard_id, name) \
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(store_id)
    .bind(billboard_id)
    .bind(name)
    .fetch_one(pool)
    .await
}

pub async fn list_for_store(
    pool: &PgPool,
    store_id: Uuid,
) -> Result<Vec<CategoryDetail>, DatabaseError> {
    let categories = sqlx::query_as::<_, Category>(
        "SELECT * FROM categories WHERE store_id = $1 ORDER BY created_at DESC",
    )
    .bind(store_id)
    .fetch_all(pool)
    .await?;

    attach_billboards(pool, categories).await
}

pub async fn find_in_store(
    pool: &PgPool,
    category_id: Uuid,
    store_id: Uuid,
) -> Result<Option<CategoryDetail>, DatabaseError> {
    let category = sqlx::query_as::<_, Category>(
        "SELECT * FROM categories WHERE id = $1 AND store_id = $2",
    )
    .bind(category_id)
    .bind(store_id)
    .fetch_optional(pool)
    .await?;

    match category {
        Some(category) => Ok(attach_billboards(pool, vec![category]).await?.pop()),
        None => Ok(None),
    }
}

pub async fn update(
    pool: &PgPool,
    category_id: Uuid,
    store_id: Uuid,
    billboard_id: Uuid,
    name: &str,
) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        "UPDATE categories SET billboard_id = $3, name = $4, updated_at = now() \
         WHERE id = $1 AND store_id = $2 RETURNING *",
    )
    .bind(category_id)
    .bind(store_id)
    .bind(billboard_id)
    .bind(name)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, category_id: Uuid, store_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM categories WHERE id = $1 AND store_id = $2")
        .bind(category_id)
        .bind(store_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Batch-load the referenced billboards and embed them.
async fn attach_billboards(
    pool: &PgPool,
    categories: Vec<Category>,
) -> Result<Vec<CategoryDetail>, DatabaseError> {
    if categories.is_empty() {
        return Ok(vec![]);
    }

    let billboard_ids: Vec<Uuid> = categories.iter().map(|c| c.billboard_id).collect();
    let billboards = sqlx::query_as::<_, Billboard>("SELECT * FROM billboards WHERE id = ANY($1)")
        .bind(&billboard_ids)
        .fetch_all(pool)
        .await?;

    let by_id: HashMap<Uuid, Billboard> = billboards.into_iter().map(|b| (b.id, b)).collect();

    categories
        .into_iter()
        .map(|category| {
            let billboard = by_id.get(&category.billboard_id).cloned().ok_or_else(|| {
                DatabaseError::QueryError(format!(
                    "category {} references missing billboard {}",
                    category.id, category.billboard_id
                ))
            })?;
            Ok(CategoryDetail { category, billboard })
        })
        .collect()
}
