use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::Entity;
use crate::utils::{serialize_object_id, serialize_reference};

/// A screening of a movie at a theater. `movie_id` and `theater_id` are
/// checked when the show is created and never again.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Show {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub movie_id: ObjectId,
    pub theater_id: ObjectId,
    #[serde(default)]
    pub show_timing: Vec<String>,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default)]
    pub dates: Vec<String>,
}

impl Entity for Show {
    const COLLECTION: &'static str = "show";
}

#[derive(Debug, Deserialize)]
pub struct NewShow {
    pub movie_id: Option<String>,
    pub theater_id: Option<String>,
    pub show_timing: Option<Vec<String>>,
    pub category: Option<Vec<String>>,
    pub dates: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ShowUpdate {
    pub movie_id: Option<String>,
    pub theater_id: Option<String>,
    pub show_timing: Option<Vec<String>>,
    pub category: Option<Vec<String>>,
    pub dates: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct ShowSummary {
    #[serde(rename = "_id", serialize_with = "serialize_object_id")]
    pub id: Option<ObjectId>,
    #[serde(serialize_with = "serialize_reference")]
    pub movie_id: ObjectId,
    #[serde(serialize_with = "serialize_reference")]
    pub theater_id: ObjectId,
    pub show_timing: Vec<String>,
    pub category: Vec<String>,
    pub dates: Vec<String>,
}

impl From<Show> for ShowSummary {
    fn from(show: Show) -> Self {
        Self {
            id: show.id,
            movie_id: show.movie_id,
            theater_id: show.theater_id,
            show_timing: show.show_timing,
            category: show.category,
            dates: show.dates,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ShowDetail {
    #[serde(serialize_with = "serialize_object_id")]
    pub id: Option<ObjectId>,
    #[serde(serialize_with = "serialize_reference")]
    pub movie_id: ObjectId,
    #[serde(serialize_with = "serialize_reference")]
    pub theater_id: ObjectId,
    pub show_timing: Vec<String>,
    pub category: Vec<String>,
    pub dates: Vec<String>,
}

impl From<Show> for ShowDetail {
    fn from(show: Show) -> Self {
        Self {
            id: show.id,
            movie_id: show.movie_id,
            theater_id: show.theater_id,
            show_timing: show.show_timing,
            category: show.category,
            dates: show.dates,
        }
    }
}
