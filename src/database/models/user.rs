use chrono::NaiveDate;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Account document in the `users` collection. `password` holds the bcrypt
/// hash, never plaintext. This shape is for storage only; API responses go
/// through [`UserResponse`], which drops the credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Birthday", skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    #[serde(rename = "FavoriteMovies", default)]
    pub favorite_movies: Vec<ObjectId>,
}

/// Client-facing view of a user: everything except the hashed credential.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Birthday", skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    #[serde(rename = "FavoriteMovies")]
    pub favorite_movies: Vec<ObjectId>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            birthday: user.birthday,
            favorite_movies: user.favorite_movies,
        }
    }
}

/// Raw registration body. Fields are optional so that missing values reach
/// the validation layer and come back as collected field errors instead of
/// a body-rejection.
#[derive(Debug, Deserialize)]
pub struct Registration {
    #[serde(rename = "Username")]
    pub username: Option<String>,
    #[serde(rename = "Password")]
    pub password: Option<String>,
    #[serde(rename = "Email")]
    pub email: Option<String>,
    #[serde(rename = "Birthday")]
    pub birthday: Option<NaiveDate>,
}

/// Raw profile-update body. Same optionality rationale as [`Registration`];
/// the password is not updatable through this endpoint.
#[derive(Debug, Deserialize)]
pub struct ProfileUpdate {
    #[serde(rename = "Username")]
    pub username: Option<String>,
    #[serde(rename = "Email")]
    pub email: Option<String>,
    #[serde(rename = "Birthday")]
    pub birthday: Option<NaiveDate>,
}
