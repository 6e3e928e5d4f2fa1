use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    AppState,
    error::{AppError, Result},
    models::ProductResponse,
    queries::product_queries,
};

pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<ProductResponse>>> {
    let products = product_queries::get_all(&state.db, true).await?;

    let product_ids: Vec<i32> = products.iter().map(|p| p.id).collect();
    let images = product_queries::get_images_for_products(&state.db, &product_ids).await?;

    let env_prefix = state.environment.prefix("products");

    let response: Vec<ProductResponse> = products
        .into_iter()
        .map(|product| {
            let image_urls = images
                .get(&product.id)
                .map(|imgs| {
                    imgs.iter()
                        .map(|img| {
                            format!(
                                "{}/{}/{}/{}.{}",
                                state.assets_url, env_prefix, product.id, img.image_uuid,
                                img.extension
                            )
                        })
                        .collect()
                })
                .unwrap_or_default();

            ProductResponse {
                product,
                image_urls,
            }
        })
        .collect();

    Ok(Json(response))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProductResponse>> {
    let product = product_queries::find_by_slug(&state.db, &slug)
        .await?
        .filter(|p| p.enabled)
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let images = product_queries::find_images_by_product_id(&state.db, product.id).await?;

    let env_prefix = state.environment.prefix("products");
    let image_urls = images
        .iter()
        .map(|img| {
            format!(
                "{}/{}/{}/{}.{}",
                state.assets_url, env_prefix, product.id, img.image_uuid, img.extension
            )
        })
        .collect();

    Ok(Json(ProductResponse {
        product,
        image_urls,
    }))
}
