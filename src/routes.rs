use std::path::Path;

use axum::{
    extract::Extension,
    http::{header, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::controllers::{
    event_controller::*, movie_controller::*, show_controller::*, theater_controller::*,
    user_controller::*,
};
use crate::state::AppState;

/// Builds the API router. Unmatched GETs are served from `static_dir`,
/// falling back to its `index.html`.
pub fn router(state: AppState, static_dir: &Path, allowed_origin: Option<HeaderValue>) -> Router {
    let spa = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    let origin = match allowed_origin {
        Some(origin) => AllowOrigin::exact(origin),
        None => AllowOrigin::any(),
    };

    Router::new()
        .route("/signup", post(signup))
        .route("/users", get(load_users))
        .route("/user", get(login))
        .route("/admin", get(admin_login))
        .route("/user/{id}", put(update_user).delete(delete_user))
        .route("/movies", get(load_movies).post(add_movie))
        .route(
            "/movies/{id}",
            get(load_movie).patch(update_movie).delete(delete_movie),
        )
        .route("/theaters", get(load_theaters).post(add_theater))
        .route(
            "/theaters/{id}",
            get(load_theater).patch(update_theater).delete(delete_theater),
        )
        .route("/shows", get(load_shows).post(add_show))
        .route(
            "/shows/{id}",
            get(load_show).patch(update_show).delete(delete_show),
        )
        .route("/shows/movie/{movie_id}", get(load_show_by_movie))
        .route("/events", get(load_events).post(add_event))
        .route(
            "/events/{id}",
            get(load_event).put(update_event).delete(delete_event),
        )
        .route(
            "/events/{id}/participants",
            get(load_participants)
                .post(add_participant)
                .delete(remove_participant),
        )
        .fallback_service(spa)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_origin(origin)
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(Extension(state))
}
