use axum::{extract::Path, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use super::guard::{ensure_store_owner, require_id, require_string};
use crate::database::models::{Category, CategoryDetail};
use crate::database::{billboards, categories, DatabaseManager};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: Option<String>,
    pub billboard_id: Option<Uuid>,
}

impl CategoryRequest {
    fn validate(self) -> Result<(String, Uuid), ApiError> {
        let name = require_string(self.name, "name")?;
        let billboard_id = require_id(self.billboard_id, "billboard_id")?;
        Ok((name, billboard_id))
    }
}

/// The cascading child check: a category may only point at a billboard in
/// the same store.
async fn ensure_billboard_in_store(
    pool: &sqlx::PgPool,
    billboard_id: Uuid,
    store_id: Uuid,
) -> Result<(), ApiError> {
    billboards::find_in_store(pool, billboard_id, store_id)
        .await?
        .ok_or_else(|| {
            ApiError::validation_error("Billboard does not belong to this store", None)
        })?;
    Ok(())
}

/// POST /api/:store_id/categories
pub async fn create(
    Extension(user): Extension<CurrentUser>,
    Path(store_id): Path<Uuid>,
    Json(payload): Json<CategoryRequest>,
) -> ApiResult<Category> {
    let pool = DatabaseManager::pool()?;
    ensure_store_owner(&pool, store_id, user.id).await?;

    let (name, billboard_id) = payload.validate()?;
    ensure_billboard_in_store(&pool, billboard_id, store_id).await?;

    let category = categories::insert(&pool, store_id, billboard_id, &name).await?;

    tracing::info!("Created category {} in store {}", category.id, store_id);
    Ok(ApiResponse::created(category))
}

/// GET /api/:store_id/categories
pub async fn list(
    Extension(user): Extension<CurrentUser>,
    Path(store_id): Path<Uuid>,
) -> ApiResult<Vec<CategoryDetail>> {
    let pool = DatabaseManager::pool()?;
    ensure_store_owner(&pool, store_id, user.id).await?;

    let categories = categories::list_for_store(&pool, store_id).await?;
    Ok(ApiResponse::success(categories))
}

/// GET /api/:store_id/categories/:category_id
pub async fn get(
    Extension(user): Extension<CurrentUser>,
    Path((store_id, category_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<CategoryDetail> {
    let pool = DatabaseManager::pool()?;
    ensure_store_owner(&pool, store_id, user.id).await?;

    let category = categories::find_in_store(&pool, category_id, store_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Category not found"))?;
    Ok(ApiResponse::success(category))
}

/// PATCH /api/:store_id/categories/:category_id
pub async fn update(
    Extension(user): Extension<CurrentUser>,
    Path((store_id, category_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<CategoryRequest>,
) -> ApiResult<Category> {
    let pool = DatabaseManager::pool()?;
    ensure_store_owner(&pool, store_id, user.id).await?;

    let (name, billboard_id) = payload.validate()?;
    ensure_billboard_in_store(&pool, billboard_id, store_id).await?;

    let category = categories::update(&pool, category_id, store_id, billboard_id, &name)
        .await?
        .ok_or_else(|| ApiError::not_found("Category not found"))?;
    Ok(ApiResponse::success(category))
}

/// DELETE /api/:store_id/categories/:category_id
///
/// Fails with 409 while a product still references the category.
pub async fn delete(
    Extension(user): Extension<CurrentUser>,
    Path((store_id, category_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Value> {
    let pool = DatabaseManager::pool()?;
    ensure_store_owner(&pool, store_id, user.id).await?;

    let deleted = categories::delete(&pool, category_id, store_id).await?;
    if deleted == 0 {
        return Err(ApiError::not_found("Category not found"));
    }

    tracing::info!("Deleted category {} in store {}", category_id, store_id);
    Ok(ApiResponse::success(json!({ "deleted": true })))
}
