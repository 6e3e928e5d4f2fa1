use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SecretBook {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    // never leaves the server
    #[serde(skip_serializing)]
    pub unlock_key: String,
    pub enabled: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SecretPage {
    pub id: i32,
    pub book_id: i32,
    pub page_number: i32,
    pub line_uuid: Uuid,
    pub line_extension: String,
    pub colored_uuid: Uuid,
    pub colored_extension: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct UnlockRequest {
    pub key: String,
}

#[derive(Debug, Serialize)]
pub struct PagePairResponse {
    pub page_number: i32,
    pub line_url: String,
    pub colored_url: String,
}

#[derive(Debug, Serialize)]
pub struct UnlockResponse {
    #[serde(flatten)]
    pub book: SecretBook,
    pub pages: Vec<PagePairResponse>,
}

#[derive(Debug, Deserialize)]
pub struct SecretBookRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub unlock_key: Option<String>,
    pub enabled: Option<bool>,
    pub display_order: Option<i32>,
}
