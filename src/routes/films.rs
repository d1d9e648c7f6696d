use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

use crate::error::Result;
use crate::models::{Film, FilmPatch, NewFilm};
use crate::AppState;

/// List every film
///
/// GET /films
pub async fn list_films(State(state): State<AppState>) -> Json<Vec<Film>> {
    Json(state.films.list_all().await)
}

/// Create a film
///
/// POST /films
///
/// Returns 201 with the stored film, or 400 when a field is rejected.
/// Undecodable bodies keep axum's rejection status with the JSON error body.
pub async fn create_film(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewFilm>, JsonRejection>,
) -> Result<(StatusCode, Json<Film>)> {
    let Json(payload) = payload?;
    let film = state.films.create(payload).await?;
    Ok((StatusCode::CREATED, Json(film)))
}

/// Update an existing film
///
/// PUT /films
///
/// Returns 400 when the id is missing and 404 when it is unknown.
pub async fn update_film(
    State(state): State<AppState>,
    payload: std::result::Result<Json<FilmPatch>, JsonRejection>,
) -> Result<Json<Film>> {
    let Json(payload) = payload?;
    let film = state.films.update(payload).await?;
    Ok(Json(film))
}
