use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document},
    options::{ClientOptions, FindOptions, UpdateModifications},
    Client, Database,
};
use tracing::debug;

use super::{DocumentStore, FindQuery, StoreError, StoreResult, Update, UpdateOutcome};

/// [`DocumentStore`] backed by a MongoDB database.
#[derive(Debug, Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub async fn connect(uri: &str, database: &str) -> StoreResult<Self> {
        let client_options = ClientOptions::parse(uri).await?;
        let client = Client::with_options(client_options)?;
        Ok(Self::from_client(&client, database))
    }

    pub fn from_client(client: &Client, database: &str) -> Self {
        Self {
            db: client.database(database),
        }
    }

    fn collection(&self, name: &str) -> mongodb::Collection<Document> {
        self.db.collection::<Document>(name)
    }
}

fn update_document(update: Update) -> UpdateModifications {
    match update {
        Update::Set(fields) => UpdateModifications::Document(doc! { "$set": fields }),
        Update::Push { field, value } => {
            UpdateModifications::Document(doc! { "$push": { field: value } })
        }
        Update::RemoveFirst { field, key, value } => {
            UpdateModifications::Pipeline(remove_first_pipeline(&field, &key, value))
        }
    }
}

/// Rebuilds `field` without its first element whose `key` equals `value`.
/// Unlike `$pull`, later matches stay.
fn remove_first_pipeline(field: &str, key: &str, value: Bson) -> Vec<Document> {
    let array = format!("${field}");
    let element_key = format!("$$item.{key}");
    vec![doc! {
        "$set": {
            field: {
                "$let": {
                    "vars": {
                        "idx": {
                            "$indexOfArray": [
                                { "$map": { "input": array.as_str(), "as": "item", "in": element_key.as_str() } },
                                value
                            ]
                        }
                    },
                    "in": {
                        "$map": {
                            "input": {
                                "$filter": {
                                    "input": { "$range": [0, { "$size": array.as_str() }] },
                                    "as": "i",
                                    "cond": { "$ne": ["$$i", "$$idx"] }
                                }
                            },
                            "as": "i",
                            "in": { "$arrayElemAt": [array.as_str(), "$$i"] }
                        }
                    }
                }
            }
        }
    }]
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<ObjectId> {
        let result = self.collection(collection).insert_one(document, None).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::UnexpectedInsertedId(collection.to_string()))
    }

    async fn find_one(&self, collection: &str, filter: Document) -> StoreResult<Option<Document>> {
        Ok(self.collection(collection).find_one(filter, None).await?)
    }

    async fn find_many(&self, collection: &str, query: FindQuery) -> StoreResult<Vec<Document>> {
        let sort = query
            .sort
            .map(|sort| doc! { sort.field: sort.order.direction() });
        let options = FindOptions::builder()
            .sort(sort)
            .skip(Some(query.skip))
            .limit(query.limit)
            .build();

        let mut cursor = self.collection(collection).find(query.filter, options).await?;

        let mut result = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            result.push(document);
        }
        Ok(result)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Update,
    ) -> StoreResult<UpdateOutcome> {
        // The server rejects an empty `$set`; report the match without writing.
        if let Update::Set(fields) = &update {
            if fields.is_empty() {
                let matched = self.collection(collection).count_documents(filter, None).await?;
                debug!(collection, matched, "empty update skipped");
                return Ok(UpdateOutcome {
                    matched: matched.min(1),
                    modified: 0,
                });
            }
        }

        let result = self
            .collection(collection)
            .update_one(filter, update_document(update), None)
            .await?;
        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> StoreResult<u64> {
        let result = self.collection(collection).delete_one(filter, None).await?;
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.db.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}
