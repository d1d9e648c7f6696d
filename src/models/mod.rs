pub mod film;
pub mod user;

pub use film::{Film, FilmPatch, NewFilm};
pub use user::{NewUser, User, UserPatch};

/// Returns the supplied string only when it has visible content
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
