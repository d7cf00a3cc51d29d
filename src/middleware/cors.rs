use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::AppState;

/// Origin allow-list enforcement. The list comes from injected
/// configuration so deployments and tests can override it.
///
/// Requests without an `Origin` header pass through untouched. Listed
/// origins are echoed back in `Access-Control-Allow-Origin` (and preflight
/// requests answered directly); anything else is rejected with a
/// descriptive error object.
pub async fn enforce_origin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let Some(origin) = origin else {
        return next.run(request).await;
    };

    let allowed = state
        .config
        .security
        .cors_origins
        .iter()
        .any(|o| o == &origin);

    if !allowed {
        tracing::warn!("rejected request from disallowed origin {}", origin);
        return (
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": format!(
                    "The CORS policy for this application does not allow access from origin {}",
                    origin
                )
            })),
        )
            .into_response();
    }

    let Ok(origin_value) = HeaderValue::from_str(&origin) else {
        // Already passed to_str above; unrepresentable values cannot occur.
        return next.run(request).await;
    };

    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        let headers = response.headers_mut();
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin_value);
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Authorization, Content-Type"),
        );
        headers.append(header::VARY, HeaderValue::from_static("Origin"));
        return response;
    }

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin_value);
    // The allow-origin header differs per caller; shared caches must not
    // reuse it across origins.
    headers.append(header::VARY, HeaderValue::from_static("Origin"));
    response
}
