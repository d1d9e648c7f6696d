use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

/// User record as stored and returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub login: String,
    /// Display name, defaults to the login when none is given
    pub name: String,
    pub birthday: NaiveDate,
}

/// POST /users body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    pub email: Option<String>,
    pub login: Option<String>,
    pub name: Option<String>,
    pub birthday: Option<NaiveDate>,
}

/// PUT /users body: only supplied fields are considered for overwrite
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    pub id: Option<u64>,
    pub email: Option<String>,
    pub login: Option<String>,
    pub name: Option<String>,
    pub birthday: Option<NaiveDate>,
}

impl User {
    /// Email must be non-blank and syntactically valid (RFC 5322 shape,
    /// as checked by the `validator` crate)
    pub fn validate_email(email: &str) -> bool {
        !email.trim().is_empty() && email.validate_email()
    }

    /// Login must be non-empty and contain no whitespace
    pub fn validate_login(login: &str) -> bool {
        !login.is_empty() && !login.chars().any(char::is_whitespace)
    }

    /// Birthday may be today but not after it
    pub fn validate_birthday(birthday: NaiveDate, today: NaiveDate) -> bool {
        birthday <= today
    }
}
