use axum::{
    extract::{Extension, Path},
    response::Json,
};
use mongodb::bson::{doc, Document};
use serde_json::{json, Value};
use tracing::info;

use crate::errors::{AppError, AppJson, AppQuery, AppResult};
use crate::models::movie_model::{Movie, MovieDetail, MovieSummary, MovieUpdate, NewMovie};
use crate::models::pagination::{ListDefaults, ListQuery};
use crate::state::AppState;
use crate::store::Update;
use crate::utils::{parse_date, parse_object_id, set_document};

const MOVIE_LISTING: ListDefaults = ListDefaults {
    sort_by: Some("title"),
    limit: Some(10),
};

fn movie_not_found(id: &str) -> AppError {
    AppError::not_found(format!("Movie not found with ID {id}"))
}

pub async fn load_movies(
    Extension(state): Extension<AppState>,
    AppQuery(list): AppQuery<ListQuery>,
) -> AppResult<Json<Vec<MovieSummary>>> {
    let mut filter = Document::new();
    if let Some(language) = &list.language {
        filter.insert("language", language.as_str());
    }
    let query = list.to_find_query(filter, MOVIE_LISTING)?;

    let movies = state.collection::<Movie>().find(query).await?;
    Ok(Json(movies.into_iter().map(MovieSummary::from).collect()))
}

pub async fn load_movie(
    Extension(state): Extension<AppState>,
    Path(id_str): Path<String>,
) -> AppResult<Json<MovieDetail>> {
    let movie_id = parse_object_id(&id_str)?;

    match state.collection::<Movie>().find_by_id(movie_id).await? {
        Some(movie) => Ok(Json(MovieDetail::from(movie))),
        None => Err(movie_not_found(&id_str)),
    }
}

pub async fn add_movie(
    Extension(state): Extension<AppState>,
    AppJson(movie): AppJson<NewMovie>,
) -> AppResult<Json<Value>> {
    let Some(title) = movie.title else {
        return Err(AppError::bad_request("Title is a required field"));
    };
    let release_date = movie.release_date.as_deref().map(parse_date).transpose()?;

    let new_movie = Movie {
        id: None,
        title,
        description: movie.description,
        duration: movie.duration,
        genre: movie.genre,
        language: movie.language,
        release_date,
        image_cover: movie.image_cover,
        rating: movie.rating,
    };
    let movie_id = state.collection::<Movie>().insert(&new_movie).await?;
    info!(%movie_id, title = %new_movie.title, "movie created");

    Ok(Json(json!({
        "message": "Movie created successfully",
        "movie_id": movie_id.to_hex(),
    })))
}

pub async fn update_movie(
    Extension(state): Extension<AppState>,
    Path(id_str): Path<String>,
    AppJson(update_data): AppJson<MovieUpdate>,
) -> AppResult<Json<Value>> {
    let movie_id = parse_object_id(&id_str)?;
    let update_data = update_data.resolve_image_alias();
    let movies = state.collection::<Movie>();

    if movies.find_by_id(movie_id).await?.is_none() {
        return Err(movie_not_found(&id_str));
    }

    let mut update_doc = set_document(&update_data)?;
    if let Some(release_date) = update_data.release_date.as_deref() {
        update_doc.insert("release_date", parse_date(release_date)?);
    }
    movies.update_by_id(movie_id, Update::Set(update_doc)).await?;

    Ok(Json(json!({
        "message": "Movie updated successfully",
        "movie_id": id_str,
    })))
}

pub async fn delete_movie(
    Extension(state): Extension<AppState>,
    Path(id_str): Path<String>,
) -> AppResult<Json<Value>> {
    let movie_id = parse_object_id(&id_str)?;

    // Shows keep their reference; nothing cascades.
    if state.collection::<Movie>().delete_by_id(movie_id).await? == 0 {
        return Err(movie_not_found(&id_str));
    }
    info!(%movie_id, "movie deleted");

    Ok(Json(json!({
        "message": format!("Movie deleted successfully with ID {id_str}"),
    })))
}
