#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc};

use axum_test::TestServer;
use easybook_api::{password::PasswordHasher, store::InMemoryStore, AppState};
use serde_json::{json, Value};

pub fn static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates")
}

pub fn build_server_with(state: AppState) -> TestServer {
    let app = easybook_api::router(state, &static_dir(), None);
    TestServer::builder()
        .build(app)
        .expect("test server should start")
}

pub fn build_server() -> (TestServer, InMemoryStore) {
    let store = InMemoryStore::new();
    let state = AppState::new(Arc::new(store.clone()), PasswordHasher::default());
    (build_server_with(state), store)
}

pub async fn create_movie(server: &TestServer, body: Value) -> String {
    let response = server.post("/movies").json(&body).await;
    response.assert_status_ok();
    response.json::<Value>()["movie_id"]
        .as_str()
        .expect("movie_id in response")
        .to_string()
}

pub async fn create_theater(server: &TestServer, name: &str) -> String {
    let response = server
        .post("/theaters")
        .json(&json!({ "name": name, "city": "Hyderabad", "capacity": 200 }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()["theater_id"]
        .as_str()
        .expect("theater_id in response")
        .to_string()
}

pub async fn create_event(server: &TestServer, title: &str) -> String {
    let response = server
        .post("/events")
        .json(&json!({
            "title": title,
            "description": "An evening of music",
            "date": "2024-06-01",
            "time": "19:00",
            "poster": "https://example.com/poster.png",
        }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()["event_id"]
        .as_str()
        .expect("event_id in response")
        .to_string()
}

/// A valid ObjectId that no document carries.
pub const MISSING_ID: &str = "64b7f0c2a1b2c3d4e5f60718";
