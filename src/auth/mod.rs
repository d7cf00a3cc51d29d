use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;

/// JWT claims: the bearer's username plus standard issue/expiry stamps.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(username: &str, expiry_days: i64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::days(expiry_days)).timestamp();

        Self {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("password hash error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("JWT secret not configured")]
    MissingSecret,
}

/// Issue a signed HS256 token for an authenticated username.
pub fn issue_token(username: &str, security: &SecurityConfig) -> Result<String, AuthError> {
    if security.jwt_secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let claims = Claims::new(username, security.jwt_expiry_days);
    let encoding_key = EncodingKey::from_secret(security.jwt_secret.as_bytes());

    Ok(encode(&Header::default(), &claims, &encoding_key)?)
}

/// Verify a bearer token's signature and expiry, returning its claims.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())?;

    Ok(token_data.claims)
}

pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    Ok(bcrypt::hash(password, cost)?)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    Ok(bcrypt::verify(password, hash)?)
}
