use axum::{extract::Path, Extension};
use uuid::Uuid;

use super::guard::ensure_store_owner;
use crate::database::models::OrderDetail;
use crate::database::{orders, DatabaseManager};
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};

/// GET /api/:store_id/orders - Orders placed against the store
///
/// Read-only: rows come from the storefront checkout. Each order embeds its
/// items and the summed product price.
pub async fn list(
    Extension(user): Extension<CurrentUser>,
    Path(store_id): Path<Uuid>,
) -> ApiResult<Vec<OrderDetail>> {
    let pool = DatabaseManager::pool()?;
    ensure_store_owner(&pool, store_id, user.id).await?;

    let orders = orders::list_for_store(&pool, store_id).await?;
    Ok(ApiResponse::success(orders))
}
