use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a subscriber signed up from. "gift" is the only source that
/// requires a verification code first.
pub const SOURCE_GIFT: &str = "gift";

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Subscriber {
    pub id: i32,
    pub email: String,
    pub source: String,
    pub downloaded_pages: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
    pub source: String,
    pub code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub message: String,
    pub subscriber: Subscriber,
    #[serde(rename = "isNew")]
    pub is_new: bool,
}

#[derive(Debug, Deserialize)]
pub struct SubscriptionStatusQuery {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionStatusResponse {
    pub subscribed: bool,
    pub subscriber: Option<Subscriber>,
}

#[derive(Debug, Deserialize)]
pub struct RecordDownloadRequest {
    pub email: String,
    pub page_id: String,
}
