use axum::{extract::Path, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use super::guard::{ensure_store_owner, require_string};
use crate::database::models::Size;
use crate::database::{sizes, DatabaseManager};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};

#[derive(Debug, Deserialize)]
pub struct SizeRequest {
    pub name: Option<String>,
    pub value: Option<String>,
}

impl SizeRequest {
    fn validate(self) -> Result<(String, String), ApiError> {
        let name = require_string(self.name, "name")?;
        let value = require_string(self.value, "value")?;
        Ok((name, value))
    }
}

/// POST /api/:store_id/sizes
pub async fn create(
    Extension(user): Extension<CurrentUser>,
    Path(store_id): Path<Uuid>,
    Json(payload): Json<SizeRequest>,
) -> ApiResult<Size> {
    let pool = DatabaseManager::pool()?;
    ensure_store_owner(&pool, store_id, user.id).await?;

    let (name, value) = payload.validate()?;
    let size = sizes::insert(&pool, store_id, &name, &value).await?;

    tracing::info!("Created size {} in store {}", size.id, store_id);
    Ok(ApiResponse::created(size))
}

/// GET /api/:store_id/sizes
pub async fn list(
    Extension(user): Extension<CurrentUser>,
    Path(store_id): Path<Uuid>,
) -> ApiResult<Vec<Size>> {
    let pool = DatabaseManager::pool()?;
    ensure_store_owner(&pool, store_id, user.id).await?;

    let sizes = sizes::list_for_store(&pool, store_id).await?;
    Ok(ApiResponse::success(sizes))
}

/// GET /api/:store_id/sizes/:size_id
pub async fn get(
    Extension(user): Extension<CurrentUser>,
    Path((store_id, size_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Size> {
    let pool = DatabaseManager::pool()?;
    ensure_store_owner(&pool, store_id, user.id).await?;

    let size = sizes::find_in_store(&pool, size_id, store_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Size not found"))?;
    Ok(ApiResponse::success(size))
}

/// PATCH /api/:store_id/sizes/:size_id
pub async fn update(
    Extension(user): Extension<CurrentUser>,
    Path((store_id, size_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<SizeRequest>,
) -> ApiResult<Size> {
    let pool = DatabaseManager::pool()?;
    ensure_store_owner(&pool, store_id, user.id).await?;

    let (name, value) = payload.validate()?;
    let size = sizes::update(&pool, size_id, store_id, &name, &value)
        .await?
        .ok_or_else(|| ApiError::not_found("Size not found"))?;
    Ok(ApiResponse::success(size))
}

/// DELETE /api/:store_id/sizes/:size_id
///
/// Fails with 409 while a product still references the size.
pub async fn delete(
    Extension(user): Extension<CurrentUser>,
    Path((store_id, size_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Value> {
    let pool = DatabaseManager::pool()?;
    ensure_store_owner(&pool, store_id, user.id).await?;

    let deleted = sizes::delete(&pool, size_id, store_id).await?;
    if deleted == 0 {
        return Err(ApiError::not_found("Size not found"));
    }

    tracing::info!("Deleted size {} in store {}", size_id, store_id);
    Ok(ApiResponse::success(json!({ "deleted": true })))
}
