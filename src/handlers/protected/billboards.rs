use axum::{extract::Path, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use super::guard::{ensure_store_owner, require_image_urls, require_string};
use crate::database::models::Billboard;
use crate::database::{billboards, DatabaseManager};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};

#[derive(Debug, Deserialize)]
pub struct BillboardRequest {
    pub label: Option<String>,
    pub image_urls: Option<Vec<String>>,
}

impl BillboardRequest {
    /// Label plus at least one image URL; the first URL doubles as the cover.
    fn validate(self) -> Result<(String, Vec<String>), ApiError> {
        let label = require_string(self.label, "label")?;
        let image_urls = require_image_urls(self.image_urls, "image URL")?;
        Ok((label, image_urls))
    }
}

/// POST /api/:store_id/billboards
pub async fn create(
    Extension(user): Extension<CurrentUser>,
    Path(store_id): Path<Uuid>,
    Json(payload): Json<BillboardRequest>,
) -> ApiResult<Billboard> {
    let pool = DatabaseManager::pool()?;
    ensure_store_owner(&pool, store_id, user.id).await?;

    let (label, image_urls) = payload.validate()?;
    let cover_url = image_urls[0].clone();
    let billboard = billboards::insert(&pool, store_id, &label, &image_urls, &cover_url).await?;

    tracing::info!("Created billboard {} in store {}", billboard.id, store_id);
    Ok(ApiResponse::created(billboard))
}

/// GET /api/:store_id/billboards
pub async fn list(
    Extension(user): Extension<CurrentUser>,
    Path(store_id): Path<Uuid>,
) -> ApiResult<Vec<Billboard>> {
    let pool = DatabaseManager::pool()?;
    ensure_store_owner(&pool, store_id, user.id).await?;

    let billboards = billboards::list_for_store(&pool, store_id).await?;
    Ok(ApiResponse::success(billboards))
}

/// GET /api/:store_id/billboards/:billboard_id
pub async fn get(
    Extension(user): Extension<CurrentUser>,
    Path((store_id, billboard_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Billboard> {
    let pool = DatabaseManager::pool()?;
    ensure_store_owner(&pool, store_id, user.id).await?;

    let billboard = billboards::find_in_store(&pool, billboard_id, store_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Billboard not found"))?;
    Ok(ApiResponse::success(billboard))
}

/// PATCH /api/:store_id/billboards/:billboard_id
pub async fn update(
    Extension(user): Extension<CurrentUser>,
    Path((store_id, billboard_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<BillboardRequest>,
) -> ApiResult<Billboard> {
    let pool = DatabaseManager::pool()?;
    ensure_store_owner(&pool, store_id, user.id).await?;

    let (label, image_urls) = payload.validate()?;
    let cover_url = image_urls[0].clone();
    let billboard =
        billboards::update(&pool, billboard_id, store_id, &label, &image_urls, &cover_url)
            .await?
            .ok_or_else(|| ApiError::not_found("Billboard not found"))?;
    Ok(ApiResponse::success(billboard))
}

/// DELETE /api/:store_id/billboards/:billboard_id
///
/// Fails with 409 while a category still references the billboard.
pub async fn delete(
    Extension(user): Extension<CurrentUser>,
    Path((store_id, billboard_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Value> {
    let pool = DatabaseManager::pool()?;
    ensure_store_owner(&pool, store_id, user.id).await?;

    let deleted = billboards::delete(&pool, billboard_id, store_id).await?;
    if deleted == 0 {
        return Err(ApiError::not_found("Billboard not found"));
    }

    tracing::info!("Deleted billboard {} in store {}", billboard_id, store_id);
    Ok(ApiResponse::success(json!({ "deleted": true })))
}
