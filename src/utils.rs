use chrono::{DateTime as ChronoDateTime, NaiveDate, Utc};
use mongodb::bson::{self, oid::ObjectId, Bson, DateTime, Document};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::AppError;

pub fn serialize_object_id<S>(id: &Option<ObjectId>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match id {
        Some(id) => serializer.serialize_str(&id.to_hex()),
        None => serializer.serialize_none(),
    }
}

pub fn serialize_reference<S>(id: &ObjectId, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&id.to_hex())
}

/// Renders a stored BSON date as `YYYY-MM-DD`.
pub fn serialize_date<S>(date: &Option<DateTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match date {
        Some(date) => serializer.serialize_str(&format_date(*date)),
        None => serializer.serialize_none(),
    }
}

/// Accepts a password digest stored either as a string or as UTF-8 binary.
pub fn deserialize_password_hash<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Bson::deserialize(deserializer)? {
        Bson::String(digest) => Ok(digest),
        Bson::Binary(binary) => String::from_utf8(binary.bytes).map_err(de::Error::custom),
        other => Err(de::Error::custom(format!(
            "unsupported password digest type {:?}",
            other.element_type()
        ))),
    }
}

pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::bad_request(format!("Invalid id '{id}'")))
}

/// Parses `YYYY-MM-DD` (or an RFC 3339 timestamp) into a BSON date.
pub fn parse_date(value: &str) -> Result<DateTime, AppError> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(DateTime::from_chrono(midnight.and_utc()));
        }
    }
    ChronoDateTime::parse_from_rfc3339(value)
        .map(|dt| DateTime::from_chrono(dt.with_timezone(&Utc)))
        .map_err(|_| AppError::bad_request(format!("Invalid date '{value}', expected YYYY-MM-DD")))
}

pub fn format_date(date: DateTime) -> String {
    date.to_chrono().format("%Y-%m-%d").to_string()
}

/// Builds the `$set` body for a partial update, dropping unset fields.
pub fn set_document<T: Serialize>(update: &T) -> Result<Document, bson::ser::Error> {
    let document = bson::to_document(update)?;
    Ok(document
        .into_iter()
        .filter(|(_, value)| !matches!(value, Bson::Null))
        .collect())
}
