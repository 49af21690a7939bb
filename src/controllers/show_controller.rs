use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Json,
};
use mongodb::bson::{doc, oid::ObjectId};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::errors::{AppError, AppJson, AppQuery, AppResult};
use crate::models::movie_model::Movie;
use crate::models::pagination::{ListDefaults, ListQuery};
use crate::models::show_model::{NewShow, Show, ShowDetail, ShowSummary, ShowUpdate};
use crate::models::theater_model::Theater;
use crate::state::AppState;
use crate::store::Update;
use crate::utils::{parse_object_id, set_document};

/// Parses both references and checks each points at a stored document.
async fn resolve_show_references(
    state: &AppState,
    movie_id: Option<&str>,
    theater_id: Option<&str>,
) -> AppResult<Option<(ObjectId, ObjectId)>> {
    let (Some(movie_id), Some(theater_id)) = (
        movie_id.and_then(|id| ObjectId::parse_str(id).ok()),
        theater_id.and_then(|id| ObjectId::parse_str(id).ok()),
    ) else {
        return Ok(None);
    };

    let movie = state.collection::<Movie>().resolve_reference(movie_id).await?;
    let theater = state
        .collection::<Theater>()
        .resolve_reference(theater_id)
        .await?;

    Ok(movie.and(theater).map(|_| (movie_id, theater_id)))
}

pub async fn load_shows(
    Extension(state): Extension<AppState>,
    AppQuery(list): AppQuery<ListQuery>,
) -> AppResult<Json<Vec<ShowSummary>>> {
    let query = list.to_find_query(doc! {}, ListDefaults::default())?;
    let shows = state.collection::<Show>().find(query).await?;
    Ok(Json(shows.into_iter().map(ShowSummary::from).collect()))
}

pub async fn load_show(
    Extension(state): Extension<AppState>,
    Path(id_str): Path<String>,
) -> AppResult<Json<ShowDetail>> {
    let show_id = parse_object_id(&id_str)?;

    match state.collection::<Show>().find_by_id(show_id).await? {
        Some(show) => Ok(Json(ShowDetail::from(show))),
        None => Err(AppError::not_found(format!("Show not found with ID {id_str}"))),
    }
}

/// Returns the first show of a movie, not all of them.
pub async fn load_show_by_movie(
    Extension(state): Extension<AppState>,
    Path(movie_id_str): Path<String>,
) -> AppResult<Json<ShowDetail>> {
    let movie_id = parse_object_id(&movie_id_str)?;

    match state
        .collection::<Show>()
        .find_one(doc! { "movie_id": movie_id })
        .await?
    {
        Some(show) => Ok(Json(ShowDetail::from(show))),
        None => Err(AppError::not_found(format!(
            "Show not found for movie ID {movie_id_str}"
        ))),
    }
}

pub async fn add_show(
    Extension(state): Extension<AppState>,
    AppJson(show): AppJson<NewShow>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let references =
        resolve_show_references(&state, show.movie_id.as_deref(), show.theater_id.as_deref())
            .await?;
    let Some((movie_id, theater_id)) = references else {
        debug!(movie_id = ?show.movie_id, theater_id = ?show.theater_id, "show references did not resolve");
        return Err(AppError::bad_request("Invalid Movie or Theater ID"));
    };

    let new_show = Show {
        id: None,
        movie_id,
        theater_id,
        show_timing: show.show_timing.unwrap_or_default(),
        category: show.category.unwrap_or_default(),
        dates: show.dates.unwrap_or_default(),
    };
    let show_id = state.collection::<Show>().insert(&new_show).await?;
    info!(%show_id, %movie_id, %theater_id, "show created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Show created successfully",
            "show_id": show_id.to_hex(),
        })),
    ))
}

pub async fn update_show(
    Extension(state): Extension<AppState>,
    Path(id_str): Path<String>,
    AppJson(update_data): AppJson<ShowUpdate>,
) -> AppResult<Json<Value>> {
    let show_id = parse_object_id(&id_str)?;
    let shows = state.collection::<Show>();

    if shows.find_by_id(show_id).await?.is_none() {
        return Err(AppError::not_found("Show not found"));
    }

    // References are stored as ObjectIds but not re-resolved on update.
    let mut update_doc = set_document(&update_data)?;
    if let Some(movie_id) = update_data.movie_id.as_deref() {
        update_doc.insert("movie_id", parse_object_id(movie_id)?);
    }
    if let Some(theater_id) = update_data.theater_id.as_deref() {
        update_doc.insert("theater_id", parse_object_id(theater_id)?);
    }
    shows.update_by_id(show_id, Update::Set(update_doc)).await?;

    Ok(Json(json!({
        "message": format!("Show updated successfully for ID - {id_str}"),
    })))
}

pub async fn delete_show(
    Extension(state): Extension<AppState>,
    Path(id_str): Path<String>,
) -> AppResult<Json<Value>> {
    let show_id = parse_object_id(&id_str)?;

    if state.collection::<Show>().delete_by_id(show_id).await? == 0 {
        return Err(AppError::not_found(format!(
            "Show with ID {id_str} is not found"
        )));
    }
    info!(%show_id, "show deleted");

    Ok(Json(json!({
        "message": format!("Show deleted successfully with ID {id_str}"),
    })))
}
