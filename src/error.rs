use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Rejection raised by the registries for bad input or unknown ids
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Film name must not be blank")]
    MissingName,

    #[error("Film description is longer than {max} characters")]
    DescriptionTooLong { max: usize },

    #[error("Film release date is required")]
    MissingReleaseDate,

    #[error("Film release date cannot be earlier than {epoch}")]
    ReleaseDateTooEarly { epoch: chrono::NaiveDate },

    #[error("Film duration is required")]
    MissingDuration,

    #[error("Film duration must be greater than zero")]
    NonPositiveDuration,

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Login must not be blank or contain whitespace")]
    InvalidLogin,

    #[error("Birthday is required")]
    MissingBirthday,

    #[error("Birthday cannot be in the future")]
    BirthdayInFuture,

    #[error("id must be specified")]
    MissingId,

    #[error("Film with id = {0} not found")]
    FilmNotFound(u64),

    #[error("User with id = {0} not found")]
    UserNotFound(u64),

    #[error("Malformed request body: {message}")]
    MalformedBody { status: StatusCode, message: String },
}

/// Body decoding failures keep axum's status but use the common error body
impl From<JsonRejection> for ValidationError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        ValidationError::MalformedBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl ValidationError {
    /// HTTP status this rejection is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            ValidationError::FilmNotFound(_) | ValidationError::UserNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            ValidationError::MalformedBody { status, .. } => *status,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

/// Implement IntoResponse to convert ValidationError into HTTP responses
impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::debug!("Responding {} to rejected request: {}", status, self);

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

/// Result type alias for registry operations
pub type Result<T> = std::result::Result<T, ValidationError>;
