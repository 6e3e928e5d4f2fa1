use std::collections::HashMap;

use sqlx::PgPool;

use crate::{
    error::Result,
    models::{Product, ProductImage},
};

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(product)
}

pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE slug = $1")
        .bind(slug)
        .fetch_optional(pool)
        .await?;

    Ok(product)
}

pub async fn get_all(pool: &PgPool, enabled_only: bool) -> Result<Vec<Product>> {
    let query = if enabled_only {
        "SELECT * FROM products WHERE enabled = true ORDER BY display_order ASC, name ASC"
    } else {
        "SELECT * FROM products ORDER BY display_order ASC, name ASC"
    };

    let products = sqlx::query_as::<_, Product>(query).fetch_all(pool).await?;

    Ok(products)
}

pub async fn find_images_by_product_id(pool: &PgPool, id: i32) -> Result<Vec<ProductImage>> {
    let images = sqlx::query_as::<_, ProductImage>(
        "SELECT * FROM product_images
         WHERE product_id = $1
         ORDER BY is_primary DESC, created_at ASC",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(images)
}

/// Images for many products in one round trip, keyed by product id.
pub async fn get_images_for_products(
    pool: &PgPool,
    product_ids: &[i32],
) -> Result<HashMap<i32, Vec<ProductImage>>> {
    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let images = sqlx::query_as::<_, ProductImage>(
        "SELECT * FROM product_images
         WHERE product_id = ANY($1)
         ORDER BY is_primary DESC, created_at ASC",
    )
    .bind(product_ids)
    .fetch_all(pool)
    .await?;

    let mut image_map: HashMap<i32, Vec<ProductImage>> = HashMap::new();
    for image in images {
        image_map.entry(image.product_id).or_default().push(image);
    }

    Ok(image_map)
}
