use std::sync::Arc;

use axum::http::StatusCode;
use easybook_api::{
    models::user_model::User,
    password::PasswordHasher,
    store::{Collection, InMemoryStore},
    AppState,
};
use mongodb::bson::{doc, oid::ObjectId};
use serde_json::{json, Value};

mod common;

use common::{build_server, build_server_with, MISSING_ID};

async fn stored_user(store: &InMemoryStore, id: &str) -> User {
    let users: Collection<User> = Collection::new(Arc::new(store.clone()));
    users
        .find_by_id(ObjectId::parse_str(id).unwrap())
        .await
        .unwrap()
        .expect("user stored")
}

#[tokio::test]
async fn signup_stores_a_verifiable_hash() {
    let (server, store) = build_server();

    let response = server
        .post("/signup")
        .json(&json!({
            "name": "Anji",
            "email": "anji@example.com",
            "password": "hunter22",
            "gender": "male",
            "type": "user",
        }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "User created successfully");

    let user = stored_user(&store, body["user_id"].as_str().unwrap()).await;
    assert_ne!(user.password, "hunter22");
    assert!(PasswordHasher::default().verify(&user.password, "hunter22"));
    assert_eq!(user.kind.as_deref(), Some("user"));
    assert_eq!(user.membership, None);
}

#[tokio::test]
async fn signup_requires_name_email_and_password() {
    let (server, _) = build_server();

    let response = server
        .post("/signup")
        .json(&json!({ "name": "Anji", "email": "anji@example.com" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "message": "Name, email, and password are required fields" })
    );
}

#[tokio::test]
async fn login_returns_the_user_document() {
    let (server, _) = build_server();
    server
        .post("/signup")
        .json(&json!({ "name": "Ravi", "email": "ravi@example.com", "password": "pw-ravi" }))
        .await
        .assert_status_ok();

    for path in ["/user", "/admin"] {
        let response = server
            .get(path)
            .add_query_param("email", "ravi@example.com")
            .add_query_param("password", "pw-ravi")
            .await;

        response.assert_status_ok();
        let user: Value = response.json();
        assert_eq!(user["name"], "Ravi");
        assert_eq!(user["email"], "ravi@example.com");
        assert_eq!(user["_id"].as_str().unwrap().len(), 24);
    }
}

#[tokio::test]
async fn failed_login_answers_201_by_default() {
    let (server, _) = build_server();
    server
        .post("/signup")
        .json(&json!({ "name": "Ravi", "email": "ravi@example.com", "password": "pw-ravi" }))
        .await
        .assert_status_ok();

    let wrong_password = server
        .get("/user")
        .add_query_param("email", "ravi@example.com")
        .add_query_param("password", "nope")
        .await;
    wrong_password.assert_status(StatusCode::CREATED);
    assert_eq!(
        wrong_password.json::<Value>(),
        json!({ "message": "Invalid username or password" })
    );

    let unknown_email = server
        .get("/admin")
        .add_query_param("email", "ghost@example.com")
        .add_query_param("password", "pw-ravi")
        .await;
    unknown_email.assert_status(StatusCode::CREATED);

    let no_credentials = server.get("/user").await;
    no_credentials.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn strict_login_status_answers_401() {
    let state = AppState::new(Arc::new(InMemoryStore::new()), PasswordHasher::default())
        .with_strict_login_status(true);
    let server = build_server_with(state);

    let response = server
        .get("/user")
        .add_query_param("email", "ghost@example.com")
        .add_query_param("password", "x")
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn update_merges_fields_and_rehashes_password() {
    let (server, store) = build_server();
    let created: Value = server
        .post("/signup")
        .json(&json!({
            "name": "Meera",
            "email": "meera@example.com",
            "password": "first-pass",
            "membership": "silver",
        }))
        .await
        .json();
    let id = created["user_id"].as_str().unwrap();

    let response = server
        .put(&format!("/user/{id}"))
        .json(&json!({ "membership": "gold", "password": "second-pass" }))
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["message"],
        format!("User with ID {id} updated successfully")
    );

    let user = stored_user(&store, id).await;
    assert_eq!(user.name, "Meera");
    assert_eq!(user.membership.as_deref(), Some("gold"));
    assert_ne!(user.password, "second-pass");
    assert!(PasswordHasher::default().verify(&user.password, "second-pass"));
}

#[tokio::test]
async fn update_and_delete_unknown_user_are_404() {
    let (server, _) = build_server();

    let update = server
        .put(&format!("/user/{MISSING_ID}"))
        .json(&json!({ "name": "Nobody" }))
        .await;
    update.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(update.json::<Value>(), json!({ "message": "User not found" }));

    let delete = server.delete(&format!("/user/{MISSING_ID}")).await;
    delete.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_then_delete_user() {
    let (server, store) = build_server();
    for (name, email) in [("Asha", "asha@example.com"), ("Bala", "bala@example.com")] {
        server
            .post("/signup")
            .json(&json!({ "name": name, "email": email, "password": "pw" }))
            .await
            .assert_status_ok();
    }

    let users: Vec<Value> = server.get("/users").await.json();
    assert_eq!(users.len(), 2);
    let id = users[0]["_id"].as_str().unwrap().to_string();

    let response = server.delete(&format!("/user/{id}")).await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["message"],
        format!("User with ID {id} deleted successfully")
    );

    let users: Collection<User> = Collection::new(Arc::new(store));
    assert!(users.find_one(doc! { "email": "asha@example.com" }).await.unwrap().is_none());
}

#[tokio::test]
async fn malformed_user_id_is_rejected() {
    let (server, _) = build_server();

    let response = server.delete("/user/not-an-object-id").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "message": "Invalid id 'not-an-object-id'" })
    );
}
