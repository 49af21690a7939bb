//! Document store access.
//!
//! Handlers talk to the database through [`DocumentStore`], a small
//! collection-scoped surface over BSON documents. [`MongoStore`] backs it with
//! the mongodb driver; [`InMemoryStore`] keeps everything in process and is
//! what the test suite runs against. [`Collection`] adds typed access on top.

use async_trait::async_trait;
use mongodb::bson::{self, oid::ObjectId, Bson, Document};
use thiserror::Error;

mod collection;
mod memory;
mod mongo;

pub use collection::Collection;
pub use memory::InMemoryStore;
pub use mongo::MongoStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Driver(#[from] mongodb::error::Error),

    #[error("failed to encode document: {0}")]
    Serialization(#[from] bson::ser::Error),

    #[error("failed to decode document: {0}")]
    Deserialization(#[from] bson::de::Error),

    #[error("insert into {0} returned a non-ObjectId identifier")]
    UnexpectedInsertedId(String),

    #[error("in-memory store lock poisoned")]
    Poisoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn direction(self) -> i32 {
        match self {
            SortOrder::Asc => 1,
            SortOrder::Desc => -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

/// Filter, sort and window for a multi-document read.
///
/// Filters are equality matches. A dotted key such as `participants.email`
/// descends into embedded documents and matches any element of an array.
#[derive(Debug, Clone, Default)]
pub struct FindQuery {
    pub filter: Document,
    pub sort: Option<Sort>,
    pub skip: u64,
    pub limit: Option<i64>,
}

impl FindQuery {
    pub fn all() -> Self {
        Self::default()
    }
}

/// Single-document modification.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// Overwrite the given top-level fields, leaving the rest untouched.
    Set(Document),
    /// Append `value` to the array at `field`, creating it when missing.
    Push { field: String, value: Bson },
    /// Remove the first element of the array at `field` whose `key` equals
    /// `value`. Later elements with the same value stay.
    RemoveFirst {
        field: String,
        key: String,
        value: Bson,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<ObjectId>;

    async fn find_one(&self, collection: &str, filter: Document) -> StoreResult<Option<Document>>;

    async fn find_many(&self, collection: &str, query: FindQuery) -> StoreResult<Vec<Document>>;

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Update,
    ) -> StoreResult<UpdateOutcome>;

    /// Returns the number of deleted documents (0 or 1).
    async fn delete_one(&self, collection: &str, filter: Document) -> StoreResult<u64>;

    async fn ping(&self) -> StoreResult<()>;
}
