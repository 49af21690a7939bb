use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use super::Entity;
use crate::utils::{serialize_date, serialize_object_id};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Movie {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_cover: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
}

impl Entity for Movie {
    const COLLECTION: &'static str = "movie";
}

/// Body of `POST /movies`.
#[derive(Debug, Deserialize)]
pub struct NewMovie {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub genre: Option<String>,
    pub language: Option<String>,
    pub release_date: Option<String>,
    pub image_cover: Option<String>,
    pub rating: Option<i32>,
}

/// Body of `PATCH /movies/{id}`.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct MovieUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub genre: Option<String>,
    pub language: Option<String>,
    pub release_date: Option<String>,
    pub image_cover: Option<String>,
    /// Older clients send the cover as `image`; `image_cover` wins when both are set.
    #[serde(skip_serializing)]
    pub image: Option<String>,
    pub rating: Option<i32>,
}

impl MovieUpdate {
    /// Folds `image` into `image_cover`.
    pub fn resolve_image_alias(mut self) -> Self {
        if let Some(image) = self.image.take() {
            self.image_cover.get_or_insert(image);
        }
        self
    }
}

/// Listing shape: the stored document with a string `_id`, absent fields omitted.
#[derive(Debug, Serialize)]
pub struct MovieSummary {
    #[serde(rename = "_id", serialize_with = "serialize_object_id")]
    pub id: Option<ObjectId>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_date"
    )]
    pub release_date: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_cover: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
}

impl From<Movie> for MovieSummary {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            description: movie.description,
            duration: movie.duration,
            genre: movie.genre,
            language: movie.language,
            release_date: movie.release_date,
            image_cover: movie.image_cover,
            rating: movie.rating,
        }
    }
}

/// Single-movie shape: every field present, `null` when unset.
#[derive(Debug, Serialize)]
pub struct MovieDetail {
    #[serde(serialize_with = "serialize_object_id")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub genre: Option<String>,
    pub language: Option<String>,
    #[serde(serialize_with = "serialize_date")]
    pub release_date: Option<DateTime>,
    pub image_cover: Option<String>,
    pub rating: Option<i32>,
}

impl From<Movie> for MovieDetail {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            description: movie.description,
            duration: movie.duration,
            genre: movie.genre,
            language: movie.language,
            release_date: movie.release_date,
            image_cover: movie.image_cover,
            rating: movie.rating,
        }
    }
}
