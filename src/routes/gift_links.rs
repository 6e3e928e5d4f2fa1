use axum::{Json, extract::State};

use crate::{AppState, error::Result, models::GiftLink, queries::gift_link_queries};

/// Public directory of downloadable gifts; inactive links are hidden here
/// and only visible through the admin listing.
pub async fn list_gift_links(State(state): State<AppState>) -> Result<Json<Vec<GiftLink>>> {
    let links = gift_link_queries::get_all(&state.db, true).await?;

    Ok(Json(links))
}
