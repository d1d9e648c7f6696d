use chrono::{Local, NaiveDate};

use crate::error::{Result, ValidationError};
use crate::models::{non_blank, NewUser, User, UserPatch};

use super::Registry;

/// Validated in-memory store of users
#[derive(Debug, Default)]
pub struct UserRegistry {
    store: Registry<User>,
}

/// Current date in the server's local time zone
fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored user, in id order
    pub async fn list_all(&self) -> Vec<User> {
        self.store.list_all().await
    }

    pub async fn count(&self) -> usize {
        self.store.len().await
    }

    /// Validate and store a new user
    ///
    /// Checks run in order: email, login, birthday. A blank or absent name
    /// is replaced by the login.
    pub async fn create(&self, new_user: NewUser) -> Result<User> {
        let email = match new_user.email {
            Some(email) if User::validate_email(&email) => email,
            _ => {
                tracing::warn!("Rejected user: invalid email");
                return Err(ValidationError::InvalidEmail);
            }
        };

        let login = match new_user.login {
            Some(login) if User::validate_login(&login) => login,
            _ => {
                tracing::warn!("Rejected user {}: invalid login", email);
                return Err(ValidationError::InvalidLogin);
            }
        };

        let name = match non_blank(new_user.name.as_deref()) {
            Some(name) => name.to_string(),
            None => {
                tracing::trace!("Defaulting name of user {} to login", login);
                login.clone()
            }
        };

        let birthday = new_user.birthday.ok_or_else(|| {
            tracing::warn!("Rejected user {}: missing birthday", login);
            ValidationError::MissingBirthday
        })?;
        if !User::validate_birthday(birthday, today()) {
            tracing::warn!("Rejected user {}: birthday {} is in the future", login, birthday);
            return Err(ValidationError::BirthdayInFuture);
        }

        let user = self
            .store
            .insert_with(|id| User {
                id,
                email,
                login,
                name,
                birthday,
            })
            .await;

        tracing::info!("User {} added: {}", user.id, user.login);
        Ok(user)
    }

    /// Overwrite the supplied fields of an existing user
    ///
    /// Invalid emails and future birthdays in the patch are ignored. When the
    /// patch carries no usable name, the name is reset to the (possibly just
    /// updated) login.
    ///
    /// The reset uses the stored login, not the patch's login field: a patch
    /// with a blank or absent login and no name sets the name to the login
    /// the user already has.
    pub async fn update(&self, patch: UserPatch) -> Result<User> {
        let id = patch.id.ok_or_else(|| {
            tracing::warn!("Rejected user update: missing id");
            ValidationError::MissingId
        })?;
        let today = today();

        let updated = self
            .store
            .modify(id, |user| {
                if let Some(email) = patch.email.filter(|e| User::validate_email(e)) {
                    user.email = email;
                }
                if let Some(login) = non_blank(patch.login.as_deref()) {
                    user.login = login.to_string();
                }
                match non_blank(patch.name.as_deref()) {
                    Some(name) => user.name = name.to_string(),
                    None => {
                        tracing::trace!("Resetting name of user {} to login", user.id);
                        user.name = user.login.clone();
                    }
                }
                if let Some(birthday) = patch
                    .birthday
                    .filter(|b| User::validate_birthday(*b, today))
                {
                    user.birthday = birthday;
                }
            })
            .await;

        match updated {
            Some(user) => {
                tracing::debug!("User {} updated", user.id);
                Ok(user)
            }
            None => {
                tracing::warn!("Rejected user update: unknown id {}", id);
                Err(ValidationError::UserNotFound(id))
            }
        }
    }
}
