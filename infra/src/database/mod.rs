//! Database access: pool, transactions, repositories, error mapping

pub mod connection;
pub mod error;
pub mod postgres;
pub mod tx;

/// Embedded SQL migrations (`infra/migrations`).
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
