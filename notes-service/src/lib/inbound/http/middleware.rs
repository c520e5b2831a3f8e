use auth::AuthenticationError;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store authenticated user ID in request extensions
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates session tokens and adds the user to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user_id = state
        .authenticator
        .authenticate_request(req.headers())
        .map_err(|e| {
            tracing::warn!(error = %e, uri = %req.uri(), "Request authentication failed");
            match e {
                AuthenticationError::MissingToken(_) => {
                    ApiError::Unauthorized("Missing bearer token".to_string())
                }
                _ => ApiError::Unauthorized("Invalid or expired token".to_string()),
            }
        })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: UserId(user_id),
    });

    Ok(next.run(req).await)
}
