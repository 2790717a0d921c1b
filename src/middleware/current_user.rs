use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use super::auth::AuthUser;
use crate::database::{users, DatabaseManager};
use crate::error::ApiError;

/// The session's user row, re-validated against the database. A token for a
/// deleted account is worthless no matter how long it has left to live.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

/// Middleware that resolves the JWT claims to a live user record and injects
/// it for handlers. Runs after `jwt_auth_middleware`.
pub async fn current_user_middleware(
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| ApiError::unauthorized("JWT authentication required"))?;

    let pool = DatabaseManager::pool()?;
    let user = users::find_by_id(&pool, auth_user.user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token presented for missing user {}", auth_user.user_id);
            ApiError::unauthorized("User not found")
        })?;

    request.extensions_mut().insert(CurrentUser {
        id: user.id,
        email: user.email,
        name: user.name,
    });

    Ok(next.run(request).await)
}
