//! Infrastructure layer for the account service
//!
//! Postgres implementations (via sqlx) of the repository and transaction
//! traits defined in `account_core`, plus pool management and the
//! sqlx-to-domain error mapping.

pub mod database;

pub use database::connection::DatabasePool;
pub use database::error::map_sqlx_error;
pub use database::postgres::{PgUserQueryRepository, PgUserRepository};
pub use database::tx::PgTransactionManager;
