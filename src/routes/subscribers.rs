use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{
        RecordDownloadRequest, SOURCE_GIFT, SubscribeRequest, SubscribeResponse, Subscriber,
        SubscriptionStatusQuery, SubscriptionStatusResponse, VerificationToken,
    },
    queries::{subscriber_queries, token_queries},
    utils::{validate_code_shape, validate_email_address},
};

/// Subscribes an email address. The "gift" source is gated behind a mailed
/// verification code; every other source goes straight to find-or-create.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(payload): Json<SubscribeRequest>,
) -> Result<(StatusCode, Json<SubscribeResponse>)> {
    validate_email_address(&payload.email)?;

    let email = payload.email.trim().to_lowercase();
    let source = payload.source.trim().to_string();

    if source.is_empty() {
        return Err(AppError::BadRequest(
            "Subscription source is required".to_string(),
        ));
    }

    if source == SOURCE_GIFT {
        let code = payload.code.as_deref().ok_or_else(|| {
            AppError::BadRequest("Verification code is required".to_string())
        })?;
        validate_code_shape(code)?;

        verify_code(&state, &email, code).await?;
    }

    let (subscriber, is_new) =
        subscriber_queries::find_or_create(&state.db, &email, &source).await?;

    if is_new {
        tracing::info!("New subscriber {} via {}", email, source);
    }

    let (status, message) = if is_new {
        (StatusCode::CREATED, "Subscribed")
    } else {
        (StatusCode::OK, "Already subscribed")
    };

    Ok((
        status,
        Json(SubscribeResponse {
            message: message.to_string(),
            subscriber,
            is_new,
        }),
    ))
}

/// The stored code is compared here, not in the query predicate; only the
/// newest token for the address counts.
async fn verify_code(state: &AppState, email: &str, code: &str) -> Result<()> {
    let token = token_queries::find_latest_for_email(&state.db, email)
        .await?
        .ok_or(AppError::InvalidCode)?;

    check_token(&token, code, Utc::now())?;

    token_queries::mark_used(&state.db, token.id).await?;

    tracing::info!("Email verified for {}", email);

    Ok(())
}

/// All failure modes collapse into the same error so a caller cannot tell
/// a wrong code from a used or expired one.
fn check_token(token: &VerificationToken, submitted: &str, now: DateTime<Utc>) -> Result<()> {
    if token.code != submitted {
        return Err(AppError::InvalidCode);
    }

    if token.used {
        return Err(AppError::InvalidCode);
    }

    if token.expires_at <= now {
        return Err(AppError::InvalidCode);
    }

    Ok(())
}

pub async fn subscription_status(
    State(state): State<AppState>,
    Query(params): Query<SubscriptionStatusQuery>,
) -> Result<Json<SubscriptionStatusResponse>> {
    validate_email_address(&params.email)?;

    let email = params.email.trim().to_lowercase();
    let subscriber = subscriber_queries::find_by_email(&state.db, &email).await?;

    Ok(Json(SubscriptionStatusResponse {
        subscribed: subscriber.is_some(),
        subscriber,
    }))
}

/// Appends a page to the subscriber's download history; repeat downloads
/// of the same page are recorded once.
pub async fn record_download(
    State(state): State<AppState>,
    Json(payload): Json<RecordDownloadRequest>,
) -> Result<Json<Subscriber>> {
    validate_email_address(&payload.email)?;

    if payload.page_id.trim().is_empty() {
        return Err(AppError::BadRequest("page_id is required".to_string()));
    }

    let email = payload.email.trim().to_lowercase();

    if let Some(subscriber) =
        subscriber_queries::add_downloaded_page(&state.db, &email, &payload.page_id).await?
    {
        return Ok(Json(subscriber));
    }

    // nothing appended: either already recorded, or no such subscriber
    let subscriber = subscriber_queries::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| AppError::NotFound("Subscriber not found".to_string()))?;

    Ok(Json(subscriber))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use claims::{assert_err, assert_ok};

    use super::check_token;
    use crate::models::VerificationToken;

    fn token(code: &str, used: bool, expires_in_minutes: i64) -> VerificationToken {
        VerificationToken {
            id: 1,
            email: "user@example.com".to_string(),
            code: code.to_string(),
            used,
            expires_at: Utc::now() + Duration::minutes(expires_in_minutes),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn fresh_token_with_matching_code_passes() {
        let t = token("123456", false, 15);
        assert_ok!(check_token(&t, "123456", Utc::now()));
    }

    #[test]
    fn wrong_code_fails() {
        let t = token("123456", false, 15);
        assert_err!(check_token(&t, "654321", Utc::now()));
    }

    #[test]
    fn code_comparison_is_exact() {
        // same digits with whitespace must not match
        let t = token("123456", false, 15);
        assert_err!(check_token(&t, "123456 ", Utc::now()));
    }

    #[test]
    fn used_token_fails_even_with_matching_code() {
        let t = token("123456", true, 15);
        assert_err!(check_token(&t, "123456", Utc::now()));
    }

    #[test]
    fn expired_token_fails_even_with_matching_code() {
        let t = token("123456", false, -1);
        assert_err!(check_token(&t, "123456", Utc::now()));
    }
}
