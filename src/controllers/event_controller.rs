use axum::{
    extract::{Extension, Path},
    response::Json,
};
use mongodb::bson::{self, doc, Bson};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::errors::{AppError, AppJson, AppQuery, AppResult};
use crate::models::event_model::{
    Event, EventDetail, EventUpdate, NewEvent, NewParticipant, Participant, ParticipantRemoval,
};
use crate::models::pagination::{ListDefaults, ListQuery};
use crate::state::AppState;
use crate::store::Update;
use crate::utils::{parse_object_id, set_document};

const EVENT_LISTING: ListDefaults = ListDefaults {
    sort_by: Some("title"),
    limit: Some(10),
};

fn event_not_found() -> AppError {
    AppError::not_found("Event not found")
}

pub async fn load_events(
    Extension(state): Extension<AppState>,
    AppQuery(list): AppQuery<ListQuery>,
) -> AppResult<Json<Vec<EventDetail>>> {
    let query = list.to_find_query(doc! {}, EVENT_LISTING)?;
    let events = state.collection::<Event>().find(query).await?;
    Ok(Json(events.into_iter().map(EventDetail::from).collect()))
}

pub async fn load_event(
    Extension(state): Extension<AppState>,
    Path(id_str): Path<String>,
) -> AppResult<Json<EventDetail>> {
    let event_id = parse_object_id(&id_str)?;

    match state.collection::<Event>().find_by_id(event_id).await? {
        Some(event) => Ok(Json(EventDetail::from(event))),
        None => Err(event_not_found()),
    }
}

pub async fn add_event(
    Extension(state): Extension<AppState>,
    AppJson(event): AppJson<NewEvent>,
) -> AppResult<Json<Value>> {
    let (Some(title), Some(description), Some(date), Some(time), Some(poster)) = (
        event.title,
        event.description,
        event.date,
        event.time,
        event.poster,
    ) else {
        return Err(AppError::bad_request(
            "Title, description, date, time, and poster are required fields",
        ));
    };

    let new_event = Event {
        id: None,
        title,
        description: Some(description),
        date: Some(date),
        time: Some(time),
        poster: Some(poster),
        participants: Vec::new(),
    };
    let event_id = state.collection::<Event>().insert(&new_event).await?;
    info!(%event_id, title = %new_event.title, "event created");

    Ok(Json(json!({
        "message": "Event created successfully",
        "event_id": event_id.to_hex(),
    })))
}

pub async fn update_event(
    Extension(state): Extension<AppState>,
    Path(id_str): Path<String>,
    AppJson(update_data): AppJson<EventUpdate>,
) -> AppResult<Json<Value>> {
    let event_id = parse_object_id(&id_str)?;

    let outcome = state
        .collection::<Event>()
        .update_by_id(event_id, Update::Set(set_document(&update_data)?))
        .await?;
    if outcome.matched == 0 {
        return Err(event_not_found());
    }

    Ok(Json(json!({ "message": "Event updated successfully" })))
}

pub async fn delete_event(
    Extension(state): Extension<AppState>,
    Path(id_str): Path<String>,
) -> AppResult<Json<Value>> {
    let event_id = parse_object_id(&id_str)?;

    if state.collection::<Event>().delete_by_id(event_id).await? == 0 {
        return Err(event_not_found());
    }
    info!(%event_id, "event deleted");

    Ok(Json(json!({ "message": "Event deleted successfully" })))
}

pub async fn load_participants(
    Extension(state): Extension<AppState>,
    Path(id_str): Path<String>,
) -> AppResult<Json<Vec<Participant>>> {
    let event_id = parse_object_id(&id_str)?;

    match state.collection::<Event>().find_by_id(event_id).await? {
        Some(event) => Ok(Json(event.participants)),
        None => Err(event_not_found()),
    }
}

pub async fn add_participant(
    Extension(state): Extension<AppState>,
    Path(id_str): Path<String>,
    AppJson(participant): AppJson<NewParticipant>,
) -> AppResult<Json<Value>> {
    let event_id = parse_object_id(&id_str)?;
    let (Some(name), Some(email)) = (participant.name, participant.email) else {
        return Err(AppError::bad_request("Participant name and email are required"));
    };

    let participant = Participant {
        name: Some(name),
        email: Some(email),
    };
    let outcome = state
        .collection::<Event>()
        .update_by_id(
            event_id,
            Update::Push {
                field: "participants".to_string(),
                value: bson::to_bson(&participant)?,
            },
        )
        .await?;
    if outcome.matched == 0 {
        return Err(event_not_found());
    }
    info!(%event_id, "participant added");

    Ok(Json(json!({
        "message": "Participant added to the event successfully",
    })))
}

pub async fn remove_participant(
    Extension(state): Extension<AppState>,
    Path(id_str): Path<String>,
    AppJson(removal): AppJson<ParticipantRemoval>,
) -> AppResult<Json<Value>> {
    let Some(email) = removal.email else {
        return Err(AppError::bad_request("Participant email not provided"));
    };
    let event_id = parse_object_id(&id_str)?;
    let events = state.collection::<Event>();

    if events.find_by_id(event_id).await?.is_none() {
        return Err(event_not_found());
    }

    // Only the first registration under this email goes, in a single write.
    let outcome = events
        .update_one(
            doc! { "_id": event_id, "participants.email": email.as_str() },
            Update::RemoveFirst {
                field: "participants".to_string(),
                key: "email".to_string(),
                value: Bson::String(email.clone()),
            },
        )
        .await?;
    if outcome.matched == 0 {
        debug!(%event_id, %email, "participant not registered");
        return Err(AppError::not_found("Participant not found in the event"));
    }
    info!(%event_id, "participant removed");

    Ok(Json(json!({
        "message": "Participant removed from the event successfully",
    })))
}
