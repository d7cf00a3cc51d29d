pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod validation;

use std::any::Any;
use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use mongodb::{Collection, Database};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use config::AppConfig;
use database::models::{Movie, User};

/// Shared per-request context: a handle to the document database (the
/// driver pools connections internally) and the injected configuration.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: Database, config: Arc<AppConfig>) -> Self {
        Self { db, config }
    }

    pub fn users(&self) -> Collection<User> {
        self.db.collection("users")
    }

    pub fn movies(&self) -> Collection<Movie> {
        self.db.collection("movies")
    }
}

/// Assemble the full router. Registration, login, and the welcome banner
/// are open; everything else sits behind the bearer-token middleware.
pub fn app(state: AppState) -> Router {
    use handlers::{login, movies, users, welcome};

    let protected = Router::new()
        .route("/movies", get(movies::list))
        .route("/movies/:title", get(movies::by_title))
        .route("/movies/series/:name", get(movies::by_series))
        .route("/movies/directors/:name", get(movies::by_director))
        .route("/users", get(users::list))
        .route(
            "/users/:username",
            get(users::profile).put(users::update).delete(users::remove),
        )
        .route(
            "/users/:username/movies/:movie_id",
            post(users::add_favorite).delete(users::remove_favorite),
        )
        .route_layer(from_fn_with_state(state.clone(), middleware::auth::require_auth));

    Router::new()
        .route("/", get(welcome))
        .route("/users", post(users::register))
        .route("/login", post(login::login))
        .merge(protected)
        .layer(from_fn_with_state(state.clone(), middleware::cors::enforce_origin))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

/// Last-resort boundary: a panic escaping any handler becomes the fixed
/// 500 body, with the detail kept in the server log.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> axum::response::Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "non-string panic payload"
    };
    tracing::error!("handler panicked: {}", detail);

    (StatusCode::INTERNAL_SERVER_ERROR, "Something broke!").into_response()
}
