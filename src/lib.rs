//! HTTP API for booking movies, theaters, shows and events over MongoDB.

pub mod config;
pub mod controllers;
pub mod errors;
pub mod models;
pub mod password;
pub mod routes;
pub mod state;
pub mod store;
pub mod utils;

pub use routes::router;
pub use state::AppState;
