//! Filmorate Server Library
//!
//! In-memory film and user catalog served over HTTP. This module exports the
//! core types and the router for testing and reuse.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod registry;
pub mod routes;

pub use config::Config;
pub use error::{Result, ValidationError};
pub use registry::{FilmRegistry, UserRegistry};

use axum::{routing::get, Router};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub films: Arc<FilmRegistry>,
    pub users: Arc<UserRegistry>,
    pub config: Config,
}

impl AppState {
    /// Create a new AppState with empty registries
    pub fn new(config: Config) -> Self {
        Self {
            films: Arc::new(FilmRegistry::new()),
            users: Arc::new(UserRegistry::new()),
            config,
        }
    }
}

/// Build the application router
pub fn create_app(state: AppState) -> Router {
    use routes::*;

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/films",
            get(list_films).post(create_film).put(update_film),
        )
        .route(
            "/users",
            get(list_users).post(create_user).put(update_user),
        )
        .with_state(state)
}
