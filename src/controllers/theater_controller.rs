use axum::{
    extract::{Extension, Path},
    response::Json,
};
use mongodb::bson::doc;
use serde_json::{json, Value};
use tracing::info;

use crate::errors::{AppError, AppJson, AppQuery, AppResult};
use crate::models::pagination::{ListDefaults, ListQuery};
use crate::models::theater_model::{NewTheater, Theater, TheaterDetail, TheaterSummary, TheaterUpdate};
use crate::state::AppState;
use crate::store::Update;
use crate::utils::{parse_object_id, set_document};

pub async fn load_theaters(
    Extension(state): Extension<AppState>,
    AppQuery(list): AppQuery<ListQuery>,
) -> AppResult<Json<Vec<TheaterSummary>>> {
    let query = list.to_find_query(doc! {}, ListDefaults::default())?;
    let theaters = state.collection::<Theater>().find(query).await?;
    Ok(Json(theaters.into_iter().map(TheaterSummary::from).collect()))
}

pub async fn load_theater(
    Extension(state): Extension<AppState>,
    Path(id_str): Path<String>,
) -> AppResult<Json<TheaterDetail>> {
    let theater_id = parse_object_id(&id_str)?;

    match state.collection::<Theater>().find_by_id(theater_id).await? {
        Some(theater) => Ok(Json(TheaterDetail::from(theater))),
        None => Err(AppError::not_found(format!(
            "Theater not found with ID {id_str}"
        ))),
    }
}

pub async fn add_theater(
    Extension(state): Extension<AppState>,
    AppJson(theater): AppJson<NewTheater>,
) -> AppResult<Json<Value>> {
    let Some(name) = theater.name else {
        return Err(AppError::bad_request("Name is a required field"));
    };

    let new_theater = Theater {
        id: None,
        name,
        address: theater.address,
        city: theater.city,
        state: theater.state,
        capacity: theater.capacity,
    };
    let theater_id = state.collection::<Theater>().insert(&new_theater).await?;
    info!(%theater_id, name = %new_theater.name, "theater created");

    Ok(Json(json!({
        "message": "Theater created successfully",
        "theater_id": theater_id.to_hex(),
    })))
}

pub async fn update_theater(
    Extension(state): Extension<AppState>,
    Path(id_str): Path<String>,
    AppJson(update_data): AppJson<TheaterUpdate>,
) -> AppResult<Json<Value>> {
    let theater_id = parse_object_id(&id_str)?;

    let outcome = state
        .collection::<Theater>()
        .update_by_id(theater_id, Update::Set(set_document(&update_data)?))
        .await?;
    if outcome.matched == 0 {
        return Err(AppError::not_found(format!(
            "Theater not found with ID {id_str}"
        )));
    }

    Ok(Json(json!({
        "message": "Theater updated successfully",
        "theaterID": id_str,
    })))
}

pub async fn delete_theater(
    Extension(state): Extension<AppState>,
    Path(id_str): Path<String>,
) -> AppResult<Json<Value>> {
    let theater_id = parse_object_id(&id_str)?;

    if state.collection::<Theater>().delete_by_id(theater_id).await? == 0 {
        return Err(AppError::not_found(format!(
            "Theater with ID {id_str} is not found"
        )));
    }
    info!(%theater_id, "theater deleted");

    Ok(Json(json!({
        "message": format!("Theater deleted successfully with ID {id_str}"),
    })))
}
