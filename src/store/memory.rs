use std::{
    cmp::Ordering,
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};

use super::{DocumentStore, FindQuery, SortOrder, StoreError, StoreResult, Update, UpdateOutcome};

/// Process-local [`DocumentStore`].
///
/// Documents keep insertion order per collection, which is also the natural
/// order of an unsorted read.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    collections: Arc<Mutex<HashMap<String, Vec<Document>>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_collection<R>(
        &self,
        collection: &str,
        f: impl FnOnce(&mut Vec<Document>) -> R,
    ) -> StoreResult<R> {
        let mut collections = self.collections.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(f(collections.entry(collection.to_string()).or_default()))
    }
}

/// Every value reachable at a dotted `path`, flattening arrays on the way.
fn values_at<'a>(value: &'a Bson, path: &[&str], out: &mut Vec<&'a Bson>) {
    match (value, path.split_first()) {
        (Bson::Array(items), Some(_)) => {
            for item in items {
                values_at(item, path, out);
            }
        }
        (Bson::Document(document), Some((head, rest))) => {
            if let Some(next) = document.get(*head) {
                values_at(next, rest, out);
            }
        }
        (_, None) => {
            out.push(value);
            if let Bson::Array(items) = value {
                out.extend(items.iter());
            }
        }
        _ => {}
    }
}

fn field_matches(document: &Document, key: &str, expected: &Bson) -> bool {
    let path: Vec<&str> = key.split('.').collect();
    let Some((head, rest)) = path.split_first() else {
        return false;
    };
    let mut found = Vec::new();
    match document.get(*head) {
        Some(value) => values_at(value, rest, &mut found),
        None => return matches!(expected, Bson::Null),
    }
    found
        .into_iter()
        .any(|value| compare_bson(Some(value), Some(expected)) == Ordering::Equal)
}

fn matches_filter(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| field_matches(document, key, expected))
}

/// Rank of a BSON type in MongoDB's cross-type sort order.
fn type_rank(value: Option<&Bson>) -> u8 {
    match value {
        None | Some(Bson::Null) | Some(Bson::Undefined) => 1,
        Some(Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_) | Bson::Decimal128(_)) => 2,
        Some(Bson::String(_) | Bson::Symbol(_)) => 3,
        Some(Bson::Document(_)) => 4,
        Some(Bson::Array(_)) => 5,
        Some(Bson::Binary(_)) => 6,
        Some(Bson::ObjectId(_)) => 7,
        Some(Bson::Boolean(_)) => 8,
        Some(Bson::DateTime(_)) => 9,
        Some(Bson::Timestamp(_)) => 10,
        Some(_) => 11,
    }
}

fn as_f64(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        Bson::Double(v) => Some(*v),
        _ => None,
    }
}

fn compare_bson(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    let rank = type_rank(a).cmp(&type_rank(b));
    if rank != Ordering::Equal {
        return rank;
    }
    match (a, b) {
        (Some(Bson::String(x)), Some(Bson::String(y))) => x.cmp(y),
        (Some(Bson::ObjectId(x)), Some(Bson::ObjectId(y))) => x.bytes().cmp(&y.bytes()),
        (Some(Bson::Boolean(x)), Some(Bson::Boolean(y))) => x.cmp(y),
        (Some(Bson::DateTime(x)), Some(Bson::DateTime(y))) => x.cmp(y),
        (Some(x), Some(y)) => match (as_f64(x), as_f64(y)) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ if x == y => Ordering::Equal,
            _ => x.to_string().cmp(&y.to_string()),
        },
        _ => Ordering::Equal,
    }
}

fn apply_update(document: &mut Document, update: &Update) -> bool {
    match update {
        Update::Set(fields) => {
            let mut changed = false;
            for (key, value) in fields {
                if document.get(key) != Some(value) {
                    document.insert(key.clone(), value.clone());
                    changed = true;
                }
            }
            changed
        }
        Update::Push { field, value } => match document.get_mut(field) {
            Some(Bson::Array(items)) => {
                items.push(value.clone());
                true
            }
            _ => {
                document.insert(field.clone(), Bson::Array(vec![value.clone()]));
                true
            }
        },
        Update::RemoveFirst { field, key, value } => match document.get_mut(field) {
            Some(Bson::Array(items)) => {
                let position = items.iter().position(|item| match item {
                    Bson::Document(element) => field_matches(element, key, value),
                    _ => false,
                });
                match position {
                    Some(index) => {
                        items.remove(index);
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        },
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn insert_one(&self, collection: &str, mut document: Document) -> StoreResult<ObjectId> {
        let id = match document.get("_id") {
            Some(Bson::ObjectId(id)) => *id,
            Some(_) => return Err(StoreError::UnexpectedInsertedId(collection.to_string())),
            None => {
                let id = ObjectId::new();
                document.insert("_id", id);
                id
            }
        };
        self.with_collection(collection, |documents| documents.push(document))?;
        Ok(id)
    }

    async fn find_one(&self, collection: &str, filter: Document) -> StoreResult<Option<Document>> {
        self.with_collection(collection, |documents| {
            documents
                .iter()
                .find(|document| matches_filter(document, &filter))
                .cloned()
        })
    }

    async fn find_many(&self, collection: &str, query: FindQuery) -> StoreResult<Vec<Document>> {
        let mut found = self.with_collection(collection, |documents| {
            documents
                .iter()
                .filter(|document| matches_filter(document, &query.filter))
                .cloned()
                .collect::<Vec<_>>()
        })?;

        if let Some(sort) = &query.sort {
            found.sort_by(|a, b| {
                let ordering = compare_bson(a.get(&sort.field), b.get(&sort.field));
                match sort.order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }

        let skip = usize::try_from(query.skip).unwrap_or(usize::MAX);
        let window = found.into_iter().skip(skip);
        Ok(match query.limit {
            Some(limit) if limit > 0 => window.take(limit as usize).collect(),
            _ => window.collect(),
        })
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Update,
    ) -> StoreResult<UpdateOutcome> {
        self.with_collection(collection, |documents| {
            match documents
                .iter_mut()
                .find(|document| matches_filter(document, &filter))
            {
                Some(document) => UpdateOutcome {
                    matched: 1,
                    modified: u64::from(apply_update(document, &update)),
                },
                None => UpdateOutcome::default(),
            }
        })
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> StoreResult<u64> {
        self.with_collection(collection, |documents| {
            match documents
                .iter()
                .position(|document| matches_filter(document, &filter))
            {
                Some(index) => {
                    documents.remove(index);
                    1
                }
                None => 0,
            }
        })
    }

    async fn ping(&self) -> StoreResult<()> {
        self.collections
            .lock()
            .map(|_| ())
            .map_err(|_| StoreError::Poisoned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Sort;
    use mongodb::bson::doc;

    async fn seeded() -> InMemoryStore {
        let store = InMemoryStore::new();
        for (title, language, rating) in [
            ("Casablanca", "English", 9),
            ("Amelie", "French", 8),
            ("Barfi", "Hindi", 7),
        ] {
            store
                .insert_one(
                    "movie",
                    doc! { "title": title, "language": language, "rating": rating },
                )
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn insert_assigns_object_id() {
        let store = InMemoryStore::new();
        let id = store.insert_one("movie", doc! { "title": "Up" }).await.unwrap();

        let found = store
            .find_one("movie", doc! { "_id": id })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.get_object_id("_id").unwrap(), id);
        assert_eq!(found.get_str("title").unwrap(), "Up");
    }

    #[tokio::test]
    async fn find_many_filters_sorts_and_windows() {
        let store = seeded().await;

        let sorted = store
            .find_many(
                "movie",
                FindQuery {
                    sort: Some(Sort {
                        field: "title".to_string(),
                        order: SortOrder::Asc,
                    }),
                    skip: 1,
                    limit: Some(1),
                    ..FindQuery::all()
                },
            )
            .await
            .unwrap();
        assert_eq!(sorted.len(), 1);
        assert_eq!(sorted[0].get_str("title").unwrap(), "Barfi");

        let french = store
            .find_many(
                "movie",
                FindQuery {
                    filter: doc! { "language": "French" },
                    ..FindQuery::all()
                },
            )
            .await
            .unwrap();
        assert_eq!(french.len(), 1);
        assert_eq!(french[0].get_str("title").unwrap(), "Amelie");
    }

    #[tokio::test]
    async fn descending_sort_compares_numbers() {
        let store = seeded().await;
        let by_rating = store
            .find_many(
                "movie",
                FindQuery {
                    sort: Some(Sort {
                        field: "rating".to_string(),
                        order: SortOrder::Desc,
                    }),
                    ..FindQuery::all()
                },
            )
            .await
            .unwrap();

        let titles: Vec<&str> = by_rating
            .iter()
            .map(|doc| doc.get_str("title").unwrap())
            .collect();
        assert_eq!(titles, ["Casablanca", "Amelie", "Barfi"]);
    }

    #[tokio::test]
    async fn missing_sort_field_orders_first() {
        let store = seeded().await;
        store.insert_one("movie", doc! { "title": "Zodiac" }).await.unwrap();

        let by_rating = store
            .find_many(
                "movie",
                FindQuery {
                    sort: Some(Sort {
                        field: "rating".to_string(),
                        order: SortOrder::Asc,
                    }),
                    ..FindQuery::all()
                },
            )
            .await
            .unwrap();
        assert_eq!(by_rating[0].get_str("title").unwrap(), "Zodiac");
    }

    #[tokio::test]
    async fn set_reports_matched_and_modified() {
        let store = seeded().await;

        let changed = store
            .update_one(
                "movie",
                doc! { "title": "Barfi" },
                Update::Set(doc! { "rating": 10 }),
            )
            .await
            .unwrap();
        assert_eq!(changed, UpdateOutcome { matched: 1, modified: 1 });

        let unchanged = store
            .update_one(
                "movie",
                doc! { "title": "Barfi" },
                Update::Set(doc! { "rating": 10 }),
            )
            .await
            .unwrap();
        assert_eq!(unchanged, UpdateOutcome { matched: 1, modified: 0 });

        let missing = store
            .update_one(
                "movie",
                doc! { "title": "Nope" },
                Update::Set(doc! { "rating": 1 }),
            )
            .await
            .unwrap();
        assert_eq!(missing, UpdateOutcome::default());
    }

    #[tokio::test]
    async fn push_then_remove_first_by_embedded_field() {
        let store = InMemoryStore::new();
        let id = store.insert_one("events", doc! { "title": "Launch" }).await.unwrap();

        for (name, email) in [
            ("first", "a@example.com"),
            ("other", "b@example.com"),
            ("second", "a@example.com"),
        ] {
            store
                .update_one(
                    "events",
                    doc! { "_id": id },
                    Update::Push {
                        field: "participants".to_string(),
                        value: Bson::Document(doc! { "name": name, "email": email }),
                    },
                )
                .await
                .unwrap();
        }

        let dotted = store
            .find_one("events", doc! { "_id": id, "participants.email": "b@example.com" })
            .await
            .unwrap();
        assert!(dotted.is_some());

        let removed = store
            .update_one(
                "events",
                doc! { "_id": id, "participants.email": "a@example.com" },
                Update::RemoveFirst {
                    field: "participants".to_string(),
                    key: "email".to_string(),
                    value: Bson::String("a@example.com".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(removed, UpdateOutcome { matched: 1, modified: 1 });

        let event = store
            .find_one("events", doc! { "_id": id })
            .await
            .unwrap()
            .unwrap();
        let names: Vec<&str> = event
            .get_array("participants")
            .unwrap()
            .iter()
            .map(|item| item.as_document().unwrap().get_str("name").unwrap())
            .collect();
        assert_eq!(names, ["other", "second"]);

        let missing = store
            .update_one(
                "events",
                doc! { "_id": id },
                Update::RemoveFirst {
                    field: "participants".to_string(),
                    key: "email".to_string(),
                    value: Bson::String("c@example.com".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(missing, UpdateOutcome { matched: 1, modified: 0 });
    }

    #[tokio::test]
    async fn delete_removes_only_the_first_match() {
        let store = seeded().await;
        assert_eq!(store.delete_one("movie", doc! { "title": "Amelie" }).await.unwrap(), 1);
        assert_eq!(store.delete_one("movie", doc! { "title": "Amelie" }).await.unwrap(), 0);

        let remaining = store.find_many("movie", FindQuery::all()).await.unwrap();
        assert_eq!(remaining.len(), 2);
    }
}
