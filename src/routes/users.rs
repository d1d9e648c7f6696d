use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

use crate::error::Result;
use crate::models::{NewUser, User, UserPatch};
use crate::AppState;

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.users.list_all().await)
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<User>)> {
    let Json(payload) = payload?;
    let user = state.users.create(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /users
pub async fn update_user(
    State(state): State<AppState>,
    payload: std::result::Result<Json<UserPatch>, JsonRejection>,
) -> Result<Json<User>> {
    let Json(payload) = payload?;
    let user = state.users.update(payload).await?;
    Ok(Json(user))
}
