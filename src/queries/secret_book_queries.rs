use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    error::Result,
    models::{SecretBook, SecretBookRequest, SecretPage},
};

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<SecretBook>> {
    let book = sqlx::query_as::<_, SecretBook>("SELECT * FROM secret_books WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(book)
}

pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<SecretBook>> {
    let book = sqlx::query_as::<_, SecretBook>("SELECT * FROM secret_books WHERE slug = $1")
        .bind(slug)
        .fetch_optional(pool)
        .await?;

    Ok(book)
}

pub async fn get_all(pool: &PgPool, enabled_only: bool) -> Result<Vec<SecretBook>> {
    let query = if enabled_only {
        "SELECT * FROM secret_books WHERE enabled = true ORDER BY display_order ASC, title ASC"
    } else {
        "SELECT * FROM secret_books ORDER BY display_order ASC, title ASC"
    };

    let books = sqlx::query_as::<_, SecretBook>(query).fetch_all(pool).await?;

    Ok(books)
}

pub async fn get_pages_for_book(pool: &PgPool, book_id: i32) -> Result<Vec<SecretPage>> {
    let pages = sqlx::query_as::<_, SecretPage>(
        "SELECT * FROM secret_pages
         WHERE book_id = $1
         ORDER BY page_number ASC",
    )
    .bind(book_id)
    .fetch_all(pool)
    .await?;

    Ok(pages)
}

pub async fn next_page_number(pool: &PgPool, book_id: i32) -> Result<i32> {
    let max: Option<i32> =
        sqlx::query_scalar("SELECT MAX(page_number) FROM secret_pages WHERE book_id = $1")
            .bind(book_id)
            .fetch_one(pool)
            .await?;

    Ok(max.unwrap_or(0) + 1)
}

#[allow(clippy::too_many_arguments)]
pub async fn create_page(
    pool: &PgPool,
    book_id: i32,
    page_number: i32,
    line_uuid: Uuid,
    line_extension: &str,
    colored_uuid: Uuid,
    colored_extension: &str,
) -> Result<SecretPage> {
    let page = sqlx::query_as::<_, SecretPage>(
        "INSERT INTO secret_pages
             (book_id, page_number, line_uuid, line_extension, colored_uuid, colored_extension)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING *",
    )
    .bind(book_id)
    .bind(page_number)
    .bind(line_uuid)
    .bind(line_extension)
    .bind(colored_uuid)
    .bind(colored_extension)
    .fetch_one(pool)
    .await?;

    Ok(page)
}

pub async fn delete_page(pool: &PgPool, book_id: i32, page_id: i32) -> Result<Option<SecretPage>> {
    let page = sqlx::query_as::<_, SecretPage>(
        "DELETE FROM secret_pages
         WHERE id = $1 AND book_id = $2
         RETURNING *",
    )
    .bind(page_id)
    .bind(book_id)
    .fetch_optional(pool)
    .await?;

    Ok(page)
}

pub async fn create_book(pool: &PgPool, req: &SecretBookRequest) -> Result<SecretBook> {
    let book = sqlx::query_as::<_, SecretBook>(
        "INSERT INTO secret_books (title, slug, description, unlock_key, enabled, display_order)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING *",
    )
    .bind(req.title.as_deref().unwrap_or_default())
    .bind(req.slug.as_deref().unwrap_or_default())
    .bind(&req.description)
    .bind(req.unlock_key.as_deref().unwrap_or_default())
    .bind(req.enabled.unwrap_or(true))
    .bind(req.display_order.unwrap_or(0))
    .fetch_one(pool)
    .await?;

    Ok(book)
}

pub async fn update_book(
    pool: &PgPool,
    id: i32,
    req: &SecretBookRequest,
) -> Result<Option<SecretBook>> {
    let mut query_builder = QueryBuilder::<Postgres>::new("UPDATE secret_books SET ");
    let mut has_fields = false;

    if let Some(ref title) = req.title {
        query_builder.push("title = ");
        query_builder.push_bind(title);
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

    if let Some(ref unlock_key) = req.unlock_key {
        if has_fields {
            query_builder.push(", ");
        }
        query_builder.push("unlock_key = ");
        query_builder.push_bind(unlock_key);
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
        return find_by_id(pool, id).await;
    }

    query_builder.push(", updated_at = NOW() WHERE id = ");
    query_builder.push_bind(id);
    query_builder.push(" RETURNING *");

    let book = query_builder
        .build_query_as::<SecretBook>()
        .fetch_optional(pool)
        .await?;

    Ok(book)
}

pub async fn delete_book(pool: &PgPool, id: i32) -> Result<bool> {
    let result = sqlx::query("DELETE FROM secret_books WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
