use axum::{extract::Path, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use super::guard::require_string;
use crate::database::models::Store;
use crate::database::{stores, DatabaseManager};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};

#[derive(Debug, Deserialize)]
pub struct StoreRequest {
    pub name: Option<String>,
}

/// POST /api/stores - Create a store owned by the session user
pub async fn create(
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<StoreRequest>,
) -> ApiResult<Store> {
    let name = require_string(payload.name, "name")?;

    let pool = DatabaseManager::pool()?;
    let store = stores::insert(&pool, user.id, &name).await?;

    tracing::info!("Created store {} for user {}", store.id, user.id);
    Ok(ApiResponse::created(store))
}

/// GET /api/stores - List stores owned by the session user
pub async fn list(Extension(user): Extension<CurrentUser>) -> ApiResult<Vec<Store>> {
    let pool = DatabaseManager::pool()?;
    let stores = stores::list_for_user(&pool, user.id).await?;
    Ok(ApiResponse::success(stores))
}

/// GET /api/stores/:store_id - Fetch one owned store
pub async fn get(
    Extension(user): Extension<CurrentUser>,
    Path(store_id): Path<Uuid>,
) -> ApiResult<Store> {
    let pool = DatabaseManager::pool()?;
    let store = stores::find_owned(&pool, store_id, user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Store not found"))?;
    Ok(ApiResponse::success(store))
}

/// PATCH /api/stores/:store_id - Rename an owned store
pub async fn update(
    Extension(user): Extension<CurrentUser>,
    Path(store_id): Path<Uuid>,
    Json(payload): Json<StoreRequest>,
) -> ApiResult<Store> {
    let name = require_string(payload.name, "name")?;

    let pool = DatabaseManager::pool()?;
    let store = stores::rename(&pool, store_id, user.id, &name)
        .await?
        .ok_or_else(|| ApiError::not_found("Store not found"))?;
    Ok(ApiResponse::success(store))
}

/// DELETE /api/stores/:store_id - Delete an owned store (children cascade)
pub async fn delete(
    Extension(user): Extension<CurrentUser>,
    Path(store_id): Path<Uuid>,
) -> ApiResult<Value> {
    let pool = DatabaseManager::pool()?;
    let deleted = stores::delete(&pool, store_id, user.id).await?;
    if deleted == 0 {
        return Err(ApiError::not_found("Store not found"));
    }

    tracing::info!("Deleted store {} for user {}", store_id, user.id);
    Ok(ApiResponse::success(json!({ "deleted": true })))
}
