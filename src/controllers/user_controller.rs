use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use mongodb::bson::doc;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::errors::{AppError, AppJson, AppQuery, AppResult};
use crate::models::pagination::{ListDefaults, ListQuery};
use crate::models::user_model::{Credentials, NewUser, User, UserResponse, UserUpdate};
use crate::state::AppState;
use crate::store::Update;
use crate::utils::{parse_object_id, set_document};

pub async fn signup(
    Extension(state): Extension<AppState>,
    AppJson(user): AppJson<NewUser>,
) -> AppResult<Json<Value>> {
    let (Some(name), Some(email), Some(password)) = (user.name, user.email, user.password) else {
        return Err(AppError::bad_request(
            "Name, email, and password are required fields",
        ));
    };

    let new_user = User {
        id: None,
        name,
        email,
        password: state.hasher().hash(&password)?,
        gender: user.gender,
        membership: user.membership,
        kind: user.kind,
    };
    let user_id = state.collection::<User>().insert(&new_user).await?;
    info!(%user_id, "user created");

    Ok(Json(json!({
        "message": "User created successfully",
        "user_id": user_id.to_hex(),
    })))
}

pub async fn load_users(
    Extension(state): Extension<AppState>,
    AppQuery(list): AppQuery<ListQuery>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let query = list.to_find_query(doc! {}, ListDefaults::default())?;
    let users = state.collection::<User>().find(query).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

pub async fn update_user(
    Extension(state): Extension<AppState>,
    Path(id_str): Path<String>,
    AppJson(mut update_data): AppJson<UserUpdate>,
) -> AppResult<Json<Value>> {
    let user_id = parse_object_id(&id_str)?;
    let users = state.collection::<User>();

    if users.find_by_id(user_id).await?.is_none() {
        return Err(AppError::not_found("User not found"));
    }

    if let Some(password) = update_data.password.take() {
        update_data.password = Some(state.hasher().hash(&password)?);
    }
    users
        .update_by_id(user_id, Update::Set(set_document(&update_data)?))
        .await?;

    Ok(Json(json!({
        "message": format!("User with ID {id_str} updated successfully"),
    })))
}

pub async fn delete_user(
    Extension(state): Extension<AppState>,
    Path(id_str): Path<String>,
) -> AppResult<Json<Value>> {
    let user_id = parse_object_id(&id_str)?;

    if state.collection::<User>().delete_by_id(user_id).await? == 0 {
        return Err(AppError::not_found("User not found"));
    }
    info!(%user_id, "user deleted");

    Ok(Json(json!({
        "message": format!("User with ID {id_str} deleted successfully"),
    })))
}

/// `GET /user`: email and password come from the query string.
pub async fn login(
    Extension(state): Extension<AppState>,
    AppQuery(credentials): AppQuery<Credentials>,
) -> AppResult<Response> {
    authenticate(&state, credentials).await
}

/// `GET /admin`: same check as [`login`]; the stored `type` is not consulted.
pub async fn admin_login(
    Extension(state): Extension<AppState>,
    AppQuery(credentials): AppQuery<Credentials>,
) -> AppResult<Response> {
    authenticate(&state, credentials).await
}

async fn authenticate(state: &AppState, credentials: Credentials) -> AppResult<Response> {
    if let (Some(email), Some(password)) = (credentials.email, credentials.password) {
        let user = state
            .collection::<User>()
            .find_one(doc! { "email": email.as_str() })
            .await?;

        if let Some(user) = user {
            if state.hasher().verify(&user.password, &password) {
                return Ok((StatusCode::OK, Json(UserResponse::from(user))).into_response());
            }
        }
        debug!(%email, "login rejected");
    }

    Ok((
        state.login_failure_status(),
        Json(json!({ "message": "Invalid username or password" })),
    )
        .into_response())
}
