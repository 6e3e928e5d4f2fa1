use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{Post, PostResponse},
    queries::post_queries,
};

fn cover_url(state: &AppState, post: &Post) -> Option<String> {
    let env_prefix = state.environment.prefix("posts");

    match (&post.cover_uuid, &post.cover_extension) {
        (Some(uuid), Some(ext)) => Some(format!(
            "{}/{}/{}/{}.{}",
            state.assets_url, env_prefix, post.id, uuid, ext
        )),
        _ => None,
    }
}

pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<PostResponse>>> {
    let posts = post_queries::get_all(&state.db, true).await?;

    let response = posts
        .into_iter()
        .map(|post| PostResponse {
            cover_url: cover_url(&state, &post),
            post,
        })
        .collect();

    Ok(Json(response))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PostResponse>> {
    let post = post_queries::find_by_slug(&state.db, &slug)
        .await?
        .filter(|p| p.published)
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok(Json(PostResponse {
        cover_url: cover_url(&state, &post),
        post,
    }))
}
