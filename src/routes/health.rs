use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;

/// Health check endpoint
///
/// Reports the number of stored records alongside the crate version
/// and deployment environment.
/// Used by load balancers and monitoring systems.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "films": state.films.count().await,
        "users": state.users.count().await,
        "environment": state.config.environment,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
