use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{PagePairResponse, SecretBook, UnlockRequest, UnlockResponse},
    queries::secret_book_queries,
};

/// Listing never exposes keys or pages; `unlock_key` is skipped at the
/// serialization layer.
pub async fn list_secret_books(State(state): State<AppState>) -> Result<Json<Vec<SecretBook>>> {
    let books = secret_book_queries::get_all(&state.db, true).await?;

    Ok(Json(books))
}

/// The server is the only judge of whether a book is unlocked; clients may
/// cache the outcome but cannot derive it without the key.
pub async fn unlock_secret_book(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<UnlockRequest>,
) -> Result<Json<UnlockResponse>> {
    let key = payload.key.trim().to_uppercase();

    let book = secret_book_queries::find_by_slug(&state.db, &slug)
        .await?
        .filter(|b| b.enabled)
        .ok_or_else(|| AppError::NotFound("Secret book not found".to_string()))?;

    if book.unlock_key != key {
        return Err(AppError::BadRequest("Invalid key".to_string()));
    }

    let pages = secret_book_queries::get_pages_for_book(&state.db, book.id).await?;

    let env_prefix = state.environment.prefix("secret");
    let pages = pages
        .into_iter()
        .map(|page| PagePairResponse {
            page_number: page.page_number,
            line_url: format!(
                "{}/{}/{}/{}.{}",
                state.assets_url, env_prefix, book.id, page.line_uuid, page.line_extension
            ),
            colored_url: format!(
                "{}/{}/{}/{}.{}",
                state.assets_url, env_prefix, book.id, page.colored_uuid, page.colored_extension
            ),
        })
        .collect();

    tracing::info!("Secret book {} unlocked", book.slug);

    Ok(Json(UnlockResponse { book, pages }))
}
