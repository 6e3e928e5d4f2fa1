use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Subscriber;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Admin {
    pub id: i32,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct ImageUploadRequest {
    pub is_primary: bool,
    pub content_type: String,
}

#[derive(Debug, Deserialize)]
pub struct ProductImageUrlRequest {
    pub images: Vec<ImageUploadRequest>,
}

#[derive(Debug, Serialize)]
pub struct ImageUploadUrl {
    pub image_uuid: Uuid,
    pub upload_url: String,
    pub public_url: String,
}

#[derive(Debug, Serialize)]
pub struct ProductImageUrlResponse {
    pub images: Vec<ImageUploadUrl>,
}

#[derive(Debug, Deserialize)]
pub struct CoverUploadRequest {
    pub content_type: String,
}

/// Two folders' worth of filenames, matched into page pairs by the numeric
/// part of each name.
#[derive(Debug, Deserialize)]
pub struct BatchPagesRequest {
    pub line_files: Vec<String>,
    pub colored_files: Vec<String>,
    pub content_type: String,
}

/// Upload slot for one half of a page pair; `file` echoes the submitted
/// filename so the client knows which scan to PUT where.
#[derive(Debug, Serialize)]
pub struct PageFileUpload {
    pub file: String,
    pub image_uuid: Uuid,
    pub upload_url: String,
    pub public_url: String,
}

#[derive(Debug, Serialize)]
pub struct PageUploadUrls {
    pub page_number: i32,
    pub line: PageFileUpload,
    pub colored: PageFileUpload,
}

#[derive(Debug, Serialize)]
pub struct BatchPagesResponse {
    pub pages: Vec<PageUploadUrls>,
}

#[derive(Debug, Deserialize)]
pub struct SubscriberQuery {
    pub email: Option<String>,
    pub source: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SubscriberSearchResponse {
    pub subscribers: Vec<Subscriber>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}
