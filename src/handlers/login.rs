use axum::{extract::State, response::Json};
use mongodb::bson::doc;
use serde::{Deserialize, Serialize};

use crate::auth;
use crate::database::models::UserResponse;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub token: String,
}

/// POST /login - verify credentials and issue a signed bearer token.
/// Unknown users and wrong passwords get the same 401 message.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .users()
        .find_one(doc! { "Username": &body.username }, None)
        .await?
        .ok_or_else(|| ApiError::unauthorized("invalid username or password"))?;

    if !auth::verify_password(&body.password, &user.password)? {
        tracing::warn!("failed login attempt for {}", body.username);
        return Err(ApiError::unauthorized("invalid username or password"));
    }

    let token = auth::issue_token(&user.username, &state.config.security)?;

    Ok(Json(LoginResponse {
        user: UserResponse::from(user),
        token,
    }))
}
