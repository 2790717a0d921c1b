use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Labeled banner image set; `cover_url` is always the first entry of
/// `image_urls`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Billboard {
    pub id: Uuid,
    pub store_id: Uuid,
    pub label: String,
    pub image_urls: Vec<String>,
    pub cover_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
