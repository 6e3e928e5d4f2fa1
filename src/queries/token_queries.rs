use chrono::{Duration, Utc};
use sqlx::PgPool;

use crate::{error::Result, models::VerificationToken};

const CODE_EXPIRY_MINUTES: i64 = 15;

/// Issuance only ever inserts; outstanding tokens for the same email are
/// allowed to coexist and age out by `expires_at`.
pub async fn create_token(pool: &PgPool, email: &str, code: &str) -> Result<VerificationToken> {
    let expires_at = Utc::now() + Duration::minutes(CODE_EXPIRY_MINUTES);

    let token = sqlx::query_as::<_, VerificationToken>(
        "INSERT INTO verification_tokens (email, code, expires_at)
         VALUES ($1, $2, $3)
         RETURNING *",
    )
    .bind(email)
    .bind(code)
    .bind(expires_at)
    .fetch_one(pool)
    .await?;

    Ok(token)
}

/// The newest token for an email is the authoritative one; the submitted
/// code is compared in the caller, not in the query predicate.
pub async fn find_latest_for_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<VerificationToken>> {
    let token = sqlx::query_as::<_, VerificationToken>(
        "SELECT * FROM verification_tokens
         WHERE email = $1
         ORDER BY created_at DESC
         LIMIT 1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(token)
}

pub async fn mark_used(pool: &PgPool, id: i32) -> Result<()> {
    sqlx::query("UPDATE verification_tokens SET used = TRUE WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
