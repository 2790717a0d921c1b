use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use super::guard::{ensure_store_owner, require_id, require_image_urls, require_string};
use crate::database::products::{ProductFilters, ProductInput};
use crate::database::models::ProductDetail;
use crate::database::{categories, colors, products, sizes, DatabaseManager};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};

#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub category_id: Option<Uuid>,
    pub size_id: Option<Uuid>,
    pub color_id: Option<Uuid>,
    pub image_urls: Option<Vec<String>>,
    pub is_featured: Option<bool>,
    pub is_archived: Option<bool>,
}

impl ProductRequest {
    fn validate(self) -> Result<ProductInput, ApiError> {
        let name = require_string(self.name, "name")?;
        let price = self.price.ok_or_else(|| ApiError::missing_field("price"))?;
        if price <= Decimal::ZERO {
            return Err(ApiError::validation_error("Price must be positive", None));
        }

        Ok(ProductInput {
            name,
            price,
            category_id: require_id(self.category_id, "category_id")?,
            size_id: require_id(self.size_id, "size_id")?,
            color_id: require_id(self.color_id, "color_id")?,
            image_urls: require_image_urls(self.image_urls, "image URL")?,
            is_featured: self.is_featured.unwrap_or(false),
            is_archived: self.is_archived.unwrap_or(false),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    pub category_id: Option<Uuid>,
    pub size_id: Option<Uuid>,
    pub color_id: Option<Uuid>,
    pub is_featured: Option<bool>,
}

/// The cascading child checks: a product's category, size, and color must
/// each belong to the store the product lives in.
async fn ensure_refs_in_store(
    pool: &PgPool,
    input: &ProductInput,
    store_id: Uuid,
) -> Result<(), ApiError> {
    categories::find_in_store(pool, input.category_id, store_id)
        .await?
        .ok_or_else(|| ApiError::validation_error("Category does not belong to this store", None))?;
    sizes::find_in_store(pool, input.size_id, store_id)
        .await?
        .ok_or_else(|| ApiError::validation_error("Size does not belong to this store", None))?;
    colors::find_in_store(pool, input.color_id, store_id)
        .await?
        .ok_or_else(|| ApiError::validation_error("Color does not belong to this store", None))?;
    Ok(())
}

/// POST /api/:store_id/products
pub async fn create(
    Extension(user): Extension<CurrentUser>,
    Path(store_id): Path<Uuid>,
    Json(payload): Json<ProductRequest>,
) -> ApiResult<ProductDetail> {
    let pool = DatabaseManager::pool()?;
    ensure_store_owner(&pool, store_id, user.id).await?;

    let input = payload.validate()?;
    ensure_refs_in_store(&pool, &input, store_id).await?;

    let product = products::insert(&pool, store_id, &input).await?;
    let detail = products::find_in_store(&pool, product.id, store_id)
        .await?
        .ok_or_else(|| ApiError::internal_server_error("Failed to load created product"))?;

    tracing::info!("Created product {} in store {}", detail.product.id, store_id);
    Ok(ApiResponse::created(detail))
}

/// GET /api/:store_id/products - List with optional variant filters
///
/// Archived products never show up in lists; they stay reachable by id so
/// the edit form can un-archive them.
pub async fn list(
    Extension(user): Extension<CurrentUser>,
    Path(store_id): Path<Uuid>,
    Query(query): Query<ProductListQuery>,
) -> ApiResult<Vec<ProductDetail>> {
    let pool = DatabaseManager::pool()?;
    ensure_store_owner(&pool, store_id, user.id).await?;

    let filters = ProductFilters {
        category_id: query.category_id,
        size_id: query.size_id,
        color_id: query.color_id,
        is_featured: query.is_featured,
    };
    let products = products::list_for_store(&pool, store_id, &filters).await?;
    Ok(ApiResponse::success(products))
}

/// GET /api/:store_id/products/:product_id
pub async fn get(
    Extension(user): Extension<CurrentUser>,
    Path((store_id, product_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<ProductDetail> {
    let pool = DatabaseManager::pool()?;
    ensure_store_owner(&pool, store_id, user.id).await?;

    let product = products::find_in_store(&pool, product_id, store_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;
    Ok(ApiResponse::success(product))
}

/// PATCH /api/:store_id/products/:product_id - Full-field update
///
/// Replaces the image set wholesale, matching how the edit form submits.
pub async fn update(
    Extension(user): Extension<CurrentUser>,
    Path((store_id, product_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<ProductRequest>,
) -> ApiResult<ProductDetail> {
    let pool = DatabaseManager::pool()?;
    ensure_store_owner(&pool, store_id, user.id).await?;

    let input = payload.validate()?;
    ensure_refs_in_store(&pool, &input, store_id).await?;

    let product = products::update(&pool, product_id, store_id, &input)
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;
    let detail = products::find_in_store(&pool, product.id, store_id)
        .await?
        .ok_or_else(|| ApiError::internal_server_error("Failed to load updated product"))?;
    Ok(ApiResponse::success(detail))
}

/// DELETE /api/:store_id/products/:product_id
///
/// Fails with 409 while an order item still references the product.
pub async fn delete(
    Extension(user): Extension<CurrentUser>,
    Path((store_id, product_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Value> {
    let pool = DatabaseManager::pool()?;
    ensure_store_owner(&pool, store_id, user.id).await?;

    let deleted = products::delete(&pool, product_id, store_id).await?;
    if deleted == 0 {
        return Err(ApiError::not_found("Product not found"));
    }

    tracing::info!("Deleted product {} in store {}", product_id, store_id);
    Ok(ApiResponse::success(json!({ "deleted": true })))
}
