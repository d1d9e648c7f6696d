pub mod films;
pub mod health;
pub mod users;

pub use films::{create_film, list_films, update_film};
pub use health::health_check;
pub use users::{create_user, list_users, update_user};
