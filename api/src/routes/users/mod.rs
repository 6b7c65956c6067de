//! User route handlers
//!
//! - `POST /users/samples` creates a user inside a transaction
//! - `GET /users` lists users with pagination

pub mod create_user;
pub mod list_users;

pub use create_user::create_user;
pub use list_users::list_users;
