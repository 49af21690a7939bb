use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::Entity;
use crate::utils::serialize_object_id;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Theater {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

impl Entity for Theater {
    const COLLECTION: &'static str = "theater";
}

#[derive(Debug, Deserialize)]
pub struct NewTheater {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub capacity: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct TheaterUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub capacity: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct TheaterSummary {
    #[serde(rename = "_id", serialize_with = "serialize_object_id")]
    pub id: Option<ObjectId>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

impl From<Theater> for TheaterSummary {
    fn from(theater: Theater) -> Self {
        Self {
            id: theater.id,
            name: theater.name,
            address: theater.address,
            city: theater.city,
            state: theater.state,
            capacity: theater.capacity,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TheaterDetail {
    #[serde(serialize_with = "serialize_object_id")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub capacity: Option<u32>,
}

impl From<Theater> for TheaterDetail {
    fn from(theater: Theater) -> Self {
        Self {
            id: theater.id,
            name: theater.name,
            address: theater.address,
            city: theater.city,
            state: theater.state,
            capacity: theater.capacity,
        }
    }
}
