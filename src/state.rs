use std::sync::Arc;

use axum::http::StatusCode;

use crate::models::Entity;
use crate::password::PasswordHasher;
use crate::store::{Collection, DocumentStore};

/// Shared handler state, installed as an `Extension` on the router.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn DocumentStore>,
    hasher: PasswordHasher,
    login_failure_status: StatusCode,
}

impl AppState {
    /// Failed logins answer 201, as existing clients expect.
    pub fn new(store: Arc<dyn DocumentStore>, hasher: PasswordHasher) -> Self {
        Self {
            store,
            hasher,
            login_failure_status: StatusCode::CREATED,
        }
    }

    /// Answer failed logins with 401 instead.
    pub fn with_strict_login_status(mut self, strict: bool) -> Self {
        self.login_failure_status = if strict {
            StatusCode::UNAUTHORIZED
        } else {
            StatusCode::CREATED
        };
        self
    }

    pub fn collection<T: Entity>(&self) -> Collection<T> {
        Collection::new(Arc::clone(&self.store))
    }

    pub fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }

    pub fn login_failure_status(&self) -> StatusCode {
        self.login_failure_status
    }
}
