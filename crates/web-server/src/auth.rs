use crate::{error::AppError, AppState};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// The request header carrying the shared secret.
pub const TOKEN_HEADER: &str = "TOKEN";

/// Rejects requests whose `TOKEN` header is missing or does not match the
/// configured token.
pub async fn require_token(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if token.is_empty() {
        return Err(AppError::Unauthorized("token not found"));
    }
    if token != state.settings.auth.token {
        tracing::warn!(path = %request.uri().path(), "Rejected request with an invalid token.");
        return Err(AppError::Unauthorized("token not valid"));
    }
    Ok(next.run(request).await)
}
