use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth;
use crate::error::ApiError;
use crate::AppState;

/// Authenticated caller identity extracted from the bearer token.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub username: String,
}

/// Bearer-token middleware for every protected route. Rejects with 401
/// before the handler (and therefore before any database access) when the
/// token is missing, malformed, expired, or signed with the wrong key.
pub async fn require_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&headers).map_err(ApiError::unauthorized)?;

    let claims = auth::decode_token(&token, &state.config.security.jwt_secret)
        .map_err(|e| ApiError::unauthorized(format!("invalid bearer token: {}", e)))?;

    request.extensions_mut().insert(AuthUser {
        username: claims.sub,
    });

    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.to_string()),
        Some(_) => Err("Empty bearer token".to_string()),
        None => Err("Authorization header must use Bearer token format".to_string()),
    }
}
