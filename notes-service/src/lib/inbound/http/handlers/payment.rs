use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// Event name that grants premium.
pub const USER_UPGRADED_EVENT: &str = "user.upgraded";

/// Payment provider webhook.
///
/// The API key is checked before the body is parsed. Events other than
/// `user.upgraded` are acknowledged and ignored.
pub async fn payment_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let api_key = auth::extract_api_key(&headers).map_err(|e| {
        tracing::warn!(error = %e, "Payment webhook without API key");
        ApiError::Unauthorized(e.to_string())
    })?;

    if state.payment_api_key.is_empty() || api_key != &*state.payment_api_key {
        tracing::warn!("Payment webhook with wrong API key");
        return Err(ApiError::Unauthorized("Invalid API key".to_string()));
    }

    let webhook: PaymentWebhookRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid webhook body: {}", e)))?;

    if webhook.event != USER_UPGRADED_EVENT {
        tracing::info!(event = %webhook.event, "Ignoring payment event");
        return Ok(StatusCode::NO_CONTENT);
    }

    let user_id = webhook
        .data
        .ok_or_else(|| ApiError::BadRequest("Missing event data".to_string()))
        .and_then(|data| {
            UserId::from_string(&data.user_id)
                .map_err(|e| ApiError::BadRequest(format!("Invalid user ID: {}", e)))
        })?;

    state
        .user_service
        .grant_premium(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentWebhookRequest {
    event: String,
    #[serde(default)]
    data: Option<PaymentWebhookData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentWebhookData {
    user_id: String,
}
