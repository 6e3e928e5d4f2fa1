use axum::{Json, extract::State};
use rand::Rng;
use serde_json::{Value, json};

use crate::{
    AppState,
    error::Result,
    models::SendCodeRequest,
    queries::token_queries,
    services::email_service,
    utils::validate_email_address,
};

/// Issues a fresh 6-digit code and mails it. Earlier codes for the same
/// address are left in place; they simply expire.
pub async fn send_verification_code(
    State(state): State<AppState>,
    Json(payload): Json<SendCodeRequest>,
) -> Result<Json<Value>> {
    validate_email_address(&payload.email)?;

    let email = payload.email.trim().to_lowercase();
    let code = generate_code();

    token_queries::create_token(&state.db, &email, &code).await?;

    // the token row stays behind if the send fails; it ages out unused
    email_service::send_verification_email(&state.ses_client, &email, &code, &state.sender_email)
        .await?;

    tracing::info!("Verification code sent to {}", email);

    Ok(Json(json!({ "ok": true })))
}

fn generate_code() -> String {
    rand::rng().random_range(100000..=999999).to_string()
}

#[cfg(test)]
mod tests {
    use super::generate_code;

    #[test]
    fn generated_codes_are_six_digits() {
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
