use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::Entity;
use crate::utils::serialize_object_id;

/// Embedded attendee record; `email` identifies it within an event.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Participant {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Event {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub participants: Vec<Participant>,
}

impl Entity for Event {
    const COLLECTION: &'static str = "events";
}

#[derive(Debug, Deserialize)]
pub struct NewEvent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub poster: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct EventUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub poster: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewParticipant {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ParticipantRemoval {
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EventDetail {
    #[serde(serialize_with = "serialize_object_id")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub poster: String,
}

impl From<Event> for EventDetail {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            date: event.date,
            time: event.time,
            poster: event.poster.unwrap_or_default(),
        }
    }
}
