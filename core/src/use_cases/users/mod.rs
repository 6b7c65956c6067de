//! User use cases

pub mod create_user;
pub mod get_all_users;

pub use create_user::{CreateUserCommand, CreateUserHandler};
pub use get_all_users::{GetAllUsersHandler, GetAllUsersQuery};
