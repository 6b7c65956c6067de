//! Repository traits and their in-memory mocks
//!
//! The command side threads an explicit connection handle through every
//! call; the query side reads against the ambient pool. Concrete
//! Postgres implementations live in the `infra` crate.

pub mod user;
pub mod user_query;

pub use user::UserRepository;
pub use user_query::{UserQueryRepository, UserSummary};
