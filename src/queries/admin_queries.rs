use sqlx::{PgPool, Postgres, QueryBuilder, types::Json};
use uuid::Uuid;

use crate::{
    error::Result,
    models::{Admin, Product, ProductImage, ProductRequest},
    queries::product_queries,
};

pub async fn find_admin_by_email(pool: &PgPool, email: &str) -> Result<Option<Admin>> {
    let admin = sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(admin)
}

pub async fn create_product(pool: &PgPool, req: &ProductRequest) -> Result<Product> {
    let product = sqlx::query_as::<_, Product>(
        "INSERT INTO products
             (name, slug, description, price, page_count, age_range, content_blocks, enabled, display_order)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
         RETURNING *",
    )
    .bind(req.name.as_deref().unwrap_or_default())
    .bind(req.slug.as_deref().unwrap_or_default())
    .bind(&req.description)
    .bind(req.price.unwrap_or_default())
    .bind(req.page_count.unwrap_or(0))
    .bind(&req.age_range)
    .bind(Json(req.content_blocks.clone().unwrap_or_default()))
    .bind(req.enabled.unwrap_or(true))
    .bind(req.display_order.unwrap_or(0))
    .fetch_one(pool)
    .await?;

    Ok(product)
}

pub async fn update_product(
    pool: &PgPool,
    id: i32,
    req: &ProductRequest,
) -> Result<Option<Product>> {
    let mut query_builder = QueryBuilder::<Postgres>::new("UPDATE products SET ");
    let mut has_fields = false;

    if let Some(ref name) = req.name {
        query_builder.push("name = ");
        query_builder.push_bind(name);
        has_fields = true;
    }

    if let Some(ref slug) = req.slug {
        if has_fields {
            query_builder.push(", ");
        }
        query_builder.push("slug = ");
        query_builder.push_bind(slug);
        has_fields = true;
    }

    if let Some(ref description) = req.description {
        if has_fields {
            query_builder.push(", ");
        }
        query_builder.push("description = ");
        query_builder.push_bind(description);
        has_fields = true;
    }

    if let Some(price) = req.price {
        if has_fields {
            query_builder.push(", ");
        }
        query_builder.push("price = ");
        query_builder.push_bind(price);
        has_fields = true;
    }

    if let Some(page_count) = req.page_count {
        if has_fields {
            query_builder.push(", ");
        }
        query_builder.push("page_count = ");
        query_builder.push_bind(page_count);
        has_fields = true;
    }

    if let Some(ref age_range) = req.age_range {
        if has_fields {
            query_builder.push(", ");
        }
        query_builder.push("age_range = ");
        query_builder.push_bind(age_range);
        has_fields = true;
    }

    if let Some(ref content_blocks) = req.content_blocks {
        if has_fields {
            query_builder.push(", ");
        }
        query_builder.push("content_blocks = ");
        query_builder.push_bind(Json(content_blocks.clone()));
        has_fields = true;
    }

    if let Some(enabled) = req.enabled {
        if has_fields {
            query_builder.push(", ");
        }
        query_builder.push("enabled = ");
        query_builder.push_bind(enabled);
        has_fields = true;
    }

    if let Some(display_order) = req.display_order {
        if has_fields {
            query_builder.push(", ");
        }
        query_builder.push("display_order = ");
        query_builder.push_bind(display_order);
        has_fields = true;
    }

    if !has_fields {
        return product_queries::find_by_id(pool, id).await;
    }

    query_builder.push(", updated_at = NOW() WHERE id = ");
    query_builder.push_bind(id);
    query_builder.push(" RETURNING *");

    let product = query_builder
        .build_query_as::<Product>()
        .fetch_optional(pool)
        .await?;

    Ok(product)
}

pub async fn delete_product(pool: &PgPool, id: i32) -> Result<bool> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn add_product_image(
    pool: &PgPool,
    product_id: i32,
    image_uuid: Uuid,
    extension: &str,
    is_primary: bool,
) -> Result<ProductImage> {
    // only one primary image per product
    if is_primary {
        sqlx::query("UPDATE product_images SET is_primary = FALSE WHERE product_id = $1")
            .bind(product_id)
            .execute(pool)
            .await?;
    }

    let image = sqlx::query_as::<_, ProductImage>(
        "INSERT INTO product_images (product_id, image_uuid, extension, is_primary)
         VALUES ($1, $2, $3, $4)
         RETURNING *",
    )
    .bind(product_id)
    .bind(image_uuid)
    .bind(extension)
    .bind(is_primary)
    .fetch_one(pool)
    .await?;

    Ok(image)
}

pub async fn delete_product_image(
    pool: &PgPool,
    product_id: i32,
    image_uuid: Uuid,
) -> Result<Option<ProductImage>> {
    let image = sqlx::query_as::<_, ProductImage>(
        "DELETE FROM product_images
         WHERE product_id = $1 AND image_uuid = $2
         RETURNING *",
    )
    .bind(product_id)
    .bind(image_uuid)
    .fetch_optional(pool)
    .await?;

    Ok(image)
}
