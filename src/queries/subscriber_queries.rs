use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    error::{AppError, Result},
    models::{Subscriber, SubscriberQuery, SubscriberSearchResponse},
};

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Subscriber>> {
    let subscriber = sqlx::query_as::<_, Subscriber>("SELECT * FROM subscribers WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(subscriber)
}

/// Returns the subscriber and whether it was created by this call. The
/// unique index on `email` absorbs the race between two concurrent
/// subscribe requests: the loser's INSERT hits the conflict and falls
/// through to the re-fetch.
pub async fn find_or_create(
    pool: &PgPool,
    email: &str,
    source: &str,
) -> Result<(Subscriber, bool)> {
    let inserted = sqlx::query_as::<_, Subscriber>(
        "INSERT INTO subscribers (email, source)
         VALUES ($1, $2)
         ON CONFLICT (email) DO NOTHING
         RETURNING *",
    )
    .bind(email)
    .bind(source)
    .fetch_optional(pool)
    .await?;

    if let Some(subscriber) = inserted {
        return Ok((subscriber, true));
    }

    let existing = find_by_email(pool, email).await?.ok_or_else(|| {
        AppError::InternalError("Subscriber missing after insert conflict".to_string())
    })?;

    Ok((existing, false))
}

/// Appends a page identifier to the download history, once. Returns None
/// if the page was already recorded (the row is left untouched).
pub async fn add_downloaded_page(
    pool: &PgPool,
    email: &str,
    page_id: &str,
) -> Result<Option<Subscriber>> {
    let subscriber = sqlx::query_as::<_, Subscriber>(
        "UPDATE subscribers
         SET downloaded_pages = array_append(downloaded_pages, $2)
         WHERE email = $1 AND NOT ($2 = ANY(downloaded_pages))
         RETURNING *",
    )
    .bind(email)
    .bind(page_id)
    .fetch_optional(pool)
    .await?;

    Ok(subscriber)
}

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 200;

pub async fn search_subscribers(
    pool: &PgPool,
    params: &SubscriberQuery,
) -> Result<SubscriberSearchResponse> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let offset = params.offset.unwrap_or(0).max(0);

    let mut query: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM subscribers WHERE 1=1");
    let mut count_query: QueryBuilder<Postgres> =
        QueryBuilder::new("SELECT COUNT(*) FROM subscribers WHERE 1=1");

    if let Some(ref email) = params.email {
        query.push(" AND email ILIKE ");
        query.push_bind(format!("%{}%", email));
        count_query.push(" AND email ILIKE ");
        count_query.push_bind(format!("%{}%", email));
    }

    if let Some(ref source) = params.source {
        query.push(" AND source = ");
        query.push_bind(source);
        count_query.push(" AND source = ");
        count_query.push_bind(source);
    }

    query.push(" ORDER BY created_at DESC LIMIT ");
    query.push_bind(limit);
    query.push(" OFFSET ");
    query.push_bind(offset);

    let subscribers = query
        .build_query_as::<Subscriber>()
        .fetch_all(pool)
        .await?;

    let total: i64 = count_query.build_query_scalar().fetch_one(pool).await?;

    Ok(SubscriberSearchResponse {
        subscribers,
        total,
        limit,
        offset,
    })
}
