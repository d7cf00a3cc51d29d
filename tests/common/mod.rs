use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use cineflix_api::config::AppConfig;
use cineflix_api::{app, database, AppState};

#[allow(dead_code)]
pub const TEST_SECRET: &str = "test-secret";
#[allow(dead_code)]
pub const ALLOWED_ORIGIN: &str = "http://allowed.example";

/// Build the real router against a lazy database handle. The driver only
/// connects on first query, so every test that terminates before database
/// access runs without a live mongod.
pub async fn test_router() -> Router {
    let mut config = AppConfig::from_env();
    config.security.jwt_secret = TEST_SECRET.to_string();
    config.security.bcrypt_cost = 4;
    config.security.cors_origins = vec![ALLOWED_ORIGIN.to_string()];

    let db = database::connect(&config.database)
        .await
        .expect("client options should parse");

    app(AppState::new(db, Arc::new(config)))
}

/// URI of a live store for the end-to-end suites, when one is available.
#[allow(dead_code)]
pub fn store_uri() -> Option<String> {
    std::env::var("TEST_MONGO_URI").ok()
}

/// State wired to a real store, pointed at a caller-chosen database so
/// concurrent test binaries never share documents.
#[allow(dead_code)]
pub async fn store_state(uri: &str, db_name: &str) -> AppState {
    let mut config = AppConfig::from_env();
    config.security.jwt_secret = TEST_SECRET.to_string();
    config.security.bcrypt_cost = 4;
    config.security.cors_origins = vec![ALLOWED_ORIGIN.to_string()];
    config.database.uri = uri.to_string();
    config.database.database = db_name.to_string();

    let db = database::connect(&config.database)
        .await
        .expect("client options should parse");

    AppState::new(db, Arc::new(config))
}

pub async fn send(router: Router, request: Request<Body>) -> Response {
    router.oneshot(request).await.expect("router is infallible")
}

#[allow(dead_code)]
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

#[allow(dead_code)]
pub async fn body_text(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}
