//! Postgres repository implementations

pub mod user_query_repository;
pub mod user_repository;

pub use user_query_repository::PgUserQueryRepository;
pub use user_repository::PgUserRepository;
