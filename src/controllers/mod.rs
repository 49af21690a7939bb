pub mod event_controller;
pub mod movie_controller;
pub mod show_controller;
pub mod theater_controller;
pub mod user_controller;
