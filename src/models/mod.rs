use serde::{de::DeserializeOwned, Serialize};

pub mod event_model;
pub mod movie_model;
pub mod pagination;
pub mod show_model;
pub mod theater_model;
pub mod user_model;

/// A document type stored in its own collection.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: &'static str;
}
