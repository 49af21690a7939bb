use std::{marker::PhantomData, sync::Arc};

use mongodb::bson::{self, doc, oid::ObjectId, Document};

use super::{DocumentStore, FindQuery, StoreResult, Update, UpdateOutcome};
use crate::models::Entity;

/// Typed view of one collection, decoding documents into `T`.
pub struct Collection<T> {
    store: Arc<dyn DocumentStore>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Entity> Collection<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    pub async fn insert(&self, entity: &T) -> StoreResult<ObjectId> {
        let document = bson::to_document(entity)?;
        self.store.insert_one(T::COLLECTION, document).await
    }

    pub async fn find_one(&self, filter: Document) -> StoreResult<Option<T>> {
        match self.store.find_one(T::COLLECTION, filter).await? {
            Some(document) => Ok(Some(bson::from_document(document)?)),
            None => Ok(None),
        }
    }

    pub async fn find_by_id(&self, id: ObjectId) -> StoreResult<Option<T>> {
        self.find_one(doc! { "_id": id }).await
    }

    /// Loads the document a reference field points at.
    pub async fn resolve_reference(&self, reference: ObjectId) -> StoreResult<Option<T>> {
        self.find_by_id(reference).await
    }

    pub async fn find(&self, query: FindQuery) -> StoreResult<Vec<T>> {
        self.store
            .find_many(T::COLLECTION, query)
            .await?
            .into_iter()
            .map(|document| bson::from_document(document).map_err(Into::into))
            .collect()
    }

    pub async fn update_one(&self, filter: Document, update: Update) -> StoreResult<UpdateOutcome> {
        self.store.update_one(T::COLLECTION, filter, update).await
    }

    pub async fn update_by_id(&self, id: ObjectId, update: Update) -> StoreResult<UpdateOutcome> {
        self.update_one(doc! { "_id": id }, update).await
    }

    pub async fn delete_by_id(&self, id: ObjectId) -> StoreResult<u64> {
        self.store.delete_one(T::COLLECTION, doc! { "_id": id }).await
    }
}
