use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
};
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_bson};
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};

use crate::auth;
use crate::database::models::{ProfileUpdate, Registration, User, UserResponse};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::validation;
use crate::AppState;

/// POST /users - register a new account. Open route: validation, then a
/// uniqueness pre-check, then hash-and-insert.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<Registration>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let errors = validation::registration_errors(&body);
    let (Some(username), Some(password), Some(email)) = (body.username, body.password, body.email)
    else {
        return Err(ApiError::Validation(errors));
    };
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    // Uniqueness is enforced here rather than by a database index.
    if state
        .users()
        .find_one(doc! { "Username": &username }, None)
        .await?
        .is_some()
    {
        return Err(ApiError::bad_request(format!("{} already exists", username)));
    }

    let hashed = auth::hash_password(&password, state.config.security.bcrypt_cost)?;
    let mut user = User {
        id: None,
        username,
        password: hashed,
        email,
        birthday: body.birthday,
        favorite_movies: Vec::new(),
    };

    let result = state.users().insert_one(&user, None).await?;
    user.id = result.inserted_id.as_object_id();

    tracing::info!("registered user {}", user.username);
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /users - every account. Deployed clients expect 201 on list reads.
pub async fn list(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<UserResponse>>), ApiError> {
    let users: Vec<User> = state.users().find(None, None).await?.try_collect().await?;
    let users = users.into_iter().map(UserResponse::from).collect();

    Ok((StatusCode::CREATED, Json(users)))
}

/// GET /users/:Username - a single account, or `null` when none matches.
pub async fn profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Option<UserResponse>>, ApiError> {
    let user = state
        .users()
        .find_one(doc! { "Username": &username }, None)
        .await?;

    Ok(Json(user.map(UserResponse::from)))
}

/// PUT /users/:Username - replace username, email, and birthday. Returns
/// the updated document, or `null` when the path username matches nobody.
pub async fn update(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(body): Json<ProfileUpdate>,
) -> Result<Json<Option<UserResponse>>, ApiError> {
    let errors = validation::profile_update_errors(&body);
    let (Some(new_username), Some(email)) = (body.username, body.email) else {
        return Err(ApiError::Validation(errors));
    };
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let mut set = doc! { "Username": new_username, "Email": email };
    if let Some(birthday) = body.birthday {
        set.insert("Birthday", to_bson(&birthday)?);
    }

    let user = state
        .users()
        .find_one_and_update(
            doc! { "Username": &username },
            doc! { "$set": set },
            updated_document(),
        )
        .await?;

    Ok(Json(user.map(UserResponse::from)))
}

/// POST /users/:Username/movies/:MovieID - append a movie to the favorites
/// list. Appends unconditionally, so duplicates are possible.
pub async fn add_favorite(
    State(state): State<AppState>,
    Path((username, movie_id)): Path<(String, String)>,
) -> Result<Json<Option<UserResponse>>, ApiError> {
    let movie_oid = parse_movie_id(&movie_id)?;

    let user = state
        .users()
        .find_one_and_update(
            doc! { "Username": &username },
            doc! { "$push": { "FavoriteMovies": movie_oid } },
            updated_document(),
        )
        .await?;

    Ok(Json(user.map(UserResponse::from)))
}

/// DELETE /users/:Username/movies/:MovieID - remove a movie from the
/// favorites list. `$pull` drops every matching occurrence in one call.
pub async fn remove_favorite(
    State(state): State<AppState>,
    Path((username, movie_id)): Path<(String, String)>,
) -> Result<Json<Option<UserResponse>>, ApiError> {
    let movie_oid = parse_movie_id(&movie_id)?;

    let user = state
        .users()
        .find_one_and_update(
            doc! { "Username": &username },
            doc! { "$pull": { "FavoriteMovies": movie_oid } },
            updated_document(),
        )
        .await?;

    Ok(Json(user.map(UserResponse::from)))
}

/// DELETE /users/:Username - remove the account. Text confirmation on
/// success, 400 with the username when there is nothing to delete.
pub async fn remove(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(username): Path<String>,
) -> Result<String, ApiError> {
    let deleted = state
        .users()
        .find_one_and_delete(doc! { "Username": &username }, None)
        .await?;

    match deleted {
        Some(_) => {
            tracing::info!("user {} deleted by {}", username, caller.username);
            Ok(format!("{} was deleted.", username))
        }
        None => Err(ApiError::bad_request(format!("{} was not found", username))),
    }
}

fn parse_movie_id(movie_id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(movie_id)
        .map_err(|_| ApiError::bad_request(format!("{} is not a valid movie id", movie_id)))
}

fn updated_document() -> FindOneAndUpdateOptions {
    FindOneAndUpdateOptions::builder()
        .return_document(ReturnDocument::After)
        .build()
}
