use axum::{extract::Path, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use super::guard::{ensure_store_owner, require_string};
use crate::database::models::Color;
use crate::database::{colors, DatabaseManager};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};

#[derive(Debug, Deserialize)]
pub struct ColorRequest {
    pub name: Option<String>,
    pub value: Option<String>,
}

impl ColorRequest {
    fn validate(self) -> Result<(String, String), ApiError> {
        let name = require_string(self.name, "name")?;
        let value = require_string(self.value, "value")?;
        Ok((name, value))
    }
}

/// POST /api/:store_id/colors
pub async fn create(
    Extension(user): Extension<CurrentUser>,
    Path(store_id): Path<Uuid>,
    Json(payload): Json<ColorRequest>,
) -> ApiResult<Color> {
    let pool = DatabaseManager::pool()?;
    ensure_store_owner(&pool, store_id, user.id).await?;

    let (name, value) = payload.validate()?;
    let color = colors::insert(&pool, store_id, &name, &value).await?;

    tracing::info!("Created color {} in store {}", color.id, store_id);
    Ok(ApiResponse::created(color))
}

/// GET /api/:store_id/colors
pub async fn list(
    Extension(user): Extension<CurrentUser>,
    Path(store_id): Path<Uuid>,
) -> ApiResult<Vec<Color>> {
    let pool = DatabaseManager::pool()?;
    ensure_store_owner(&pool, store_id, user.id).await?;

    let colors = colors::list_for_store(&pool, store_id).await?;
    Ok(ApiResponse::success(colors))
}

/// GET /api/:store_id/colors/:color_id
pub async fn get(
    Extension(user): Extension<CurrentUser>,
    Path((store_id, color_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Color> {
    let pool = DatabaseManager::pool()?;
    ensure_store_owner(&pool, store_id, user.id).await?;

    let color = colors::find_in_store(&pool, color_id, store_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Color not found"))?;
    Ok(ApiResponse::success(color))
}

/// PATCH /api/:store_id/colors/:color_id
pub async fn update(
    Extension(user): Extension<CurrentUser>,
    Path((store_id, color_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<ColorRequest>,
) -> ApiResult<Color> {
    let pool = DatabaseManager::pool()?;
    ensure_store_owner(&pool, store_id, user.id).await?;

    let (name, value) = payload.validate()?;
    let color = colors::update(&pool, color_id, store_id, &name, &value)
        .await?
        .ok_or_else(|| ApiError::not_found("Color not found"))?;
    Ok(ApiResponse::success(color))
}

/// DELETE /api/:store_id/colors/:color_id
///
/// Fails with 409 while a product still references the color.
pub async fn delete(
    Extension(user): Extension<CurrentUser>,
    Path((store_id, color_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Value> {
    let pool = DatabaseManager::pool()?;
    ensure_store_owner(&pool, store_id, user.id).await?;

    let deleted = colors::delete(&pool, color_id, store_id).await?;
    if deleted == 0 {
        return Err(ApiError::not_found("Color not found"));
    }

    tracing::info!("Deleted color {} in store {}", color_id, store_id);
    Ok(ApiResponse::success(json!({ "deleted": true })))
}
