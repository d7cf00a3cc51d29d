use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Catalog entry in the `movies` collection. Read-only through this API;
/// the collection is seeded out of band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Series")]
    pub series: Series,
    #[serde(rename = "Director")]
    pub director: Director,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Series {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Director {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Bio")]
    pub bio: String,
    #[serde(rename = "Birth", skip_serializing_if = "Option::is_none")]
    pub birth: Option<String>,
    #[serde(rename = "Death", skip_serializing_if = "Option::is_none")]
    pub death: Option<String>,
}
