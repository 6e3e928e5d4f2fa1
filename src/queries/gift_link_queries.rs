use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    error::Result,
    models::{GiftLink, GiftLinkRequest},
};

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<GiftLink>> {
    let link = sqlx::query_as::<_, GiftLink>("SELECT * FROM gift_links WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(link)
}

/// The admin surface lists every record; the public route passes
/// `active_only` to hide anything switched off.
pub async fn get_all(pool: &PgPool, active_only: bool) -> Result<Vec<GiftLink>> {
    let query = if active_only {
        "SELECT * FROM gift_links WHERE is_active = true ORDER BY display_order ASC, id ASC"
    } else {
        "SELECT * FROM gift_links ORDER BY display_order ASC, id ASC"
    };

    let links = sqlx::query_as::<_, GiftLink>(query).fetch_all(pool).await?;

    Ok(links)
}

pub async fn create_link(pool: &PgPool, req: &GiftLinkRequest) -> Result<GiftLink> {
    let link = sqlx::query_as::<_, GiftLink>(
        "INSERT INTO gift_links (title, description, url, thumbnail_url, is_active, display_order)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING *",
    )
    .bind(req.title.as_deref().unwrap_or_default())
    .bind(&req.description)
    .bind(req.url.as_deref().unwrap_or_default())
    .bind(&req.thumbnail_url)
    .bind(req.is_active.unwrap_or(true))
    .bind(req.display_order.unwrap_or(0))
    .fetch_one(pool)
    .await?;

    Ok(link)
}

pub async fn update_link(
    pool: &PgPool,
    id: i32,
    req: &GiftLinkRequest,
) -> Result<Option<GiftLink>> {
    let mut query_builder = QueryBuilder::<Postgres>::new("UPDATE gift_links SET ");
    let mut has_fields = false;

    if let Some(ref title) = req.title {
        query_builder.push("title = ");
        query_builder.push_bind(title);
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

    if let Some(ref url) = req.url {
        if has_fields {
            query_builder.push(", ");
        }
        query_builder.push("url = ");
        query_builder.push_bind(url);
        has_fields = true;
    }

    if let Some(ref thumbnail_url) = req.thumbnail_url {
        if has_fields {
            query_builder.push(", ");
        }
        query_builder.push("thumbnail_url = ");
        query_builder.push_bind(thumbnail_url);
        has_fields = true;
    }

    if let Some(is_active) = req.is_active {
        if has_fields {
            query_builder.push(", ");
        }
        query_builder.push("is_active = ");
        query_builder.push_bind(is_active);
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

    let link = query_builder
        .build_query_as::<GiftLink>()
        .fetch_optional(pool)
        .await?;

    Ok(link)
}

pub async fn delete_link(pool: &PgPool, id: i32) -> Result<bool> {
    let result = sqlx::query("DELETE FROM gift_links WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
