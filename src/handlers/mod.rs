pub mod login;
pub mod movies;
pub mod users;

use axum::response::Html;

/// GET / - public welcome banner.
pub async fn welcome() -> Html<&'static str> {
    Html("<h1>Welcome to CineFlix!</h1>")
}
