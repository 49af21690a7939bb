use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::Entity;
use crate::utils::{deserialize_password_hash, serialize_object_id};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    #[serde(deserialize_with = "deserialize_password_hash")]
    pub password: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub membership: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl Entity for User {
    const COLLECTION: &'static str = "users";
}

/// Body of `POST /signup`.
#[derive(Debug, Deserialize)]
pub struct NewUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub gender: Option<String>,
    pub membership: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Body of `PUT /user/{id}`.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// A user as returned by listings and login. Carries the stored digest, never plaintext.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    #[serde(rename = "_id", serialize_with = "serialize_object_id")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub password: String,
    pub gender: Option<String>,
    pub membership: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            password: user.password,
            gender: user.gender,
            membership: user.membership,
            kind: user.kind,
        }
    }
}
