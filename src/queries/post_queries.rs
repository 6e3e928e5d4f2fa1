use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    error::Result,
    models::{Post, PostRequest},
};

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Post>> {
    let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(post)
}

pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Post>> {
    let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE slug = $1")
        .bind(slug)
        .fetch_optional(pool)
        .await?;

    Ok(post)
}

pub async fn get_all(pool: &PgPool, published_only: bool) -> Result<Vec<Post>> {
    let query = if published_only {
        "SELECT * FROM posts WHERE published = true ORDER BY created_at DESC"
    } else {
        "SELECT * FROM posts ORDER BY created_at DESC"
    };

    let posts = sqlx::query_as::<_, Post>(query).fetch_all(pool).await?;

    Ok(posts)
}

pub async fn create_post(pool: &PgPool, req: &PostRequest) -> Result<Post> {
    let post = sqlx::query_as::<_, Post>(
        "INSERT INTO posts (title, slug, excerpt, body, published)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING *",
    )
    .bind(req.title.as_deref().unwrap_or_default())
    .bind(req.slug.as_deref().unwrap_or_default())
    .bind(&req.excerpt)
    .bind(req.body.as_deref().unwrap_or_default())
    .bind(req.published.unwrap_or(false))
    .fetch_one(pool)
    .await?;

    Ok(post)
}

pub async fn update_post(pool: &PgPool, id: i32, req: &PostRequest) -> Result<Option<Post>> {
    let mut query_builder = QueryBuilder::<Postgres>::new("UPDATE posts SET ");
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

    if let Some(ref excerpt) = req.excerpt {
        if has_fields {
            query_builder.push(", ");
        }
        query_builder.push("excerpt = ");
        query_builder.push_bind(excerpt);
        has_fields = true;
    }

    if let Some(ref body) = req.body {
        if has_fields {
            query_builder.push(", ");
        }
        query_builder.push("body = ");
        query_builder.push_bind(body);
        has_fields = true;
    }

    if let Some(published) = req.published {
        if has_fields {
            query_builder.push(", ");
        }
        query_builder.push("published = ");
        query_builder.push_bind(published);
        has_fields = true;
    }

    if !has_fields {
        return find_by_id(pool, id).await;
    }

    query_builder.push(", updated_at = NOW() WHERE id = ");
    query_builder.push_bind(id);
    query_builder.push(" RETURNING *");

    let post = query_builder
        .build_query_as::<Post>()
        .fetch_optional(pool)
        .await?;

    Ok(post)
}

pub async fn set_cover(
    pool: &PgPool,
    id: i32,
    cover_uuid: uuid::Uuid,
    extension: &str,
) -> Result<Option<Post>> {
    let post = sqlx::query_as::<_, Post>(
        "UPDATE posts
         SET cover_uuid = $2, cover_extension = $3, updated_at = NOW()
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(cover_uuid)
    .bind(extension)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

pub async fn delete_post(pool: &PgPool, id: i32) -> Result<bool> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
