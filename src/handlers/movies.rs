use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use futures::TryStreamExt;
use mongodb::bson::doc;

use crate::database::models::Movie;
use crate::error::ApiError;
use crate::AppState;

/// GET /movies - the whole catalog. Deployed clients expect 201 on list
/// reads, so that status is kept.
pub async fn list(State(state): State<AppState>) -> Result<(StatusCode, Json<Vec<Movie>>), ApiError> {
    let movies: Vec<Movie> = state.movies().find(None, None).await?.try_collect().await?;

    Ok((StatusCode::CREATED, Json(movies)))
}

/// GET /movies/:Title - a single movie, or `null` when no title matches.
pub async fn by_title(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Json<Option<Movie>>, ApiError> {
    let movie = state.movies().find_one(doc! { "Title": &title }, None).await?;

    Ok(Json(movie))
}

/// GET /movies/series/:Name - every movie in the named series. An unknown
/// series name yields an empty list, not an error.
pub async fn by_series(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies: Vec<Movie> = state
        .movies()
        .find(doc! { "Series.Name": &name }, None)
        .await?
        .try_collect()
        .await?;

    Ok(Json(movies))
}

/// GET /movies/directors/:Name - every movie by the named director.
pub async fn by_director(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies: Vec<Movie> = state
        .movies()
        .find(doc! { "Director.Name": &name }, None)
        .await?
        .try_collect()
        .await?;

    Ok(Json(movies))
}
