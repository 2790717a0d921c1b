use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::Store;
use crate::database::stores;
use crate::error::ApiError;

/// The ownership check every store-scoped handler runs first: the requested
/// store must belong to the session user. Child-resource routes treat a
/// failure as 403; direct store routes use `stores::find_owned` and 404
/// instead, so non-owners cannot probe which store ids exist.
pub async fn ensure_store_owner(
    pool: &PgPool,
    store_id: Uuid,
    user_id: Uuid,
) -> Result<Store, ApiError> {
    stores::find_owned(pool, store_id, user_id)
        .await?
        .ok_or_else(|| ApiError::forbidden("Store does not belong to the current user"))
}

/// Require a non-empty string field.
pub fn require_string(value: Option<String>, field: &str) -> Result<String, ApiError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::missing_field(field))
}

/// Require a reference field.
pub fn require_id(value: Option<Uuid>, field: &str) -> Result<Uuid, ApiError> {
    value.ok_or_else(|| ApiError::missing_field(field))
}

/// Require at least one image URL.
pub fn require_image_urls(value: Option<Vec<String>>, field: &str) -> Result<Vec<String>, ApiError> {
    let urls: Vec<String> = value
        .unwrap_or_default()
        .into_iter()
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .collect();

    if urls.is_empty() {
        return Err(ApiError::validation_error(
            format!("At least one {} is required", field),
            None,
        ));
    }
    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_string_rejects_blank() {
        assert!(require_string(None, "name").is_err());
        assert!(require_string(Some("   ".to_string()), "name").is_err());
        assert_eq!(require_string(Some(" ok ".to_string()), "name").unwrap(), "ok");
    }

    #[test]
    fn require_image_urls_rejects_empty_sets() {
        assert!(require_image_urls(None, "image URL").is_err());
        assert!(require_image_urls(Some(vec![]), "image URL").is_err());
        assert!(require_image_urls(Some(vec!["  ".to_string()]), "image URL").is_err());

        let urls = require_image_urls(
            Some(vec!["https://img.example/a.png".to_string(), " ".to_string()]),
            "image URL",
        )
        .unwrap();
        assert_eq!(urls, vec!["https://img.example/a.png".to_string()]);
    }
}
