use axum::Extension;
use serde_json::{json, Value};

use crate::middleware::{ApiResponse, ApiResult, CurrentUser};

/// GET /api/auth/whoami - Current authenticated user
pub async fn whoami(Extension(user): Extension<CurrentUser>) -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({
        "id": user.id,
        "email": user.email,
        "name": user.name,
    })))
}
