use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::{self, Claims, MIN_PASSWORD_LENGTH};
use crate::config;
use crate::database::models::User;
use crate::database::{users, DatabaseManager};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
    pub expires_in: u64,
}

/// POST /auth/register - Create an account
///
/// Validates the payload, refuses duplicate emails, stores an Argon2id hash
/// of the password, and returns the new user (the hash never serializes).
pub async fn register(Json(payload): Json<RegisterRequest>) -> ApiResult<User> {
    let email = validate_email(payload.email)?;
    let name = payload
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::missing_field("name"))?;
    let password = payload.password.unwrap_or_default();
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::validation_error(
            format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH),
            None,
        ));
    }

    let pool = DatabaseManager::pool()?;

    if users::find_by_email(&pool, &email).await?.is_some() {
        return Err(ApiError::conflict("Email is already taken"));
    }

    let password_hash = auth::hash_password(&password)?;
    let user = users::insert(&pool, &email, &name, &password_hash).await?;

    tracing::info!("Registered user {}", user.id);
    Ok(ApiResponse::created(user))
}

/// POST /auth/login - Authenticate and receive a JWT
///
/// Unknown email and wrong password are deliberately indistinguishable.
pub async fn login(Json(payload): Json<LoginRequest>) -> ApiResult<LoginResponse> {
    let email = validate_email(payload.email)?;
    let password = payload.password.ok_or_else(|| ApiError::missing_field("password"))?;

    let pool = DatabaseManager::pool()?;

    let user = users::find_by_email(&pool, &email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    auth::verify_password(&password, &user.password_hash)?;

    let claims = Claims::new(user.id, user.email.clone());
    let token = auth::generate_jwt(&claims)?;
    let expires_in = config::config().security.jwt_expiry_hours * 3600;

    tracing::info!("User {} logged in", user.id);
    Ok(ApiResponse::success(LoginResponse { token, user, expires_in }))
}

fn validate_email(email: Option<String>) -> Result<String, ApiError> {
    let email = email
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::missing_field("email"))?;

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || !parts[1].contains('.') {
        return Err(ApiError::validation_error("Invalid email format", None));
    }

    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_normalized() {
        let email = validate_email(Some("  Owner@Example.COM ".to_string())).unwrap();
        assert_eq!(email, "owner@example.com");
    }

    #[test]
    fn email_shape_is_checked() {
        assert!(validate_email(None).is_err());
        assert!(validate_email(Some("".to_string())).is_err());
        assert!(validate_email(Some("not-an-email".to_string())).is_err());
        assert!(validate_email(Some("a@b".to_string())).is_err());
        assert!(validate_email(Some("a@b@c.com".to_string())).is_err());
        assert!(validate_email(Some("owner@example.com".to_string())).is_ok());
    }
}
