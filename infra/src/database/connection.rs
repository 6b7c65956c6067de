//! Database connection pool management
//!
//! Connection pooling over Postgres with sqlx. Pool sizing and timeouts
//! come from `DatabaseConfig`; connections are tested before being
//! handed out.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use account_core::errors::{AppError, InfrastructureError};
use account_shared::config::DatabaseConfig;

use super::error::map_sqlx_error;

/// Database connection pool wrapper
#[derive(Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Create a new connection pool from configuration.
    pub async fn new(config: &DatabaseConfig) -> Result<Self, AppError> {
        tracing::info!(
            max_connections = config.max_connections,
            "creating database connection pool"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .test_before_acquire(true)
            .connect(&config.url)
            .await
            .map_err(map_sqlx_error)?;

        Ok(Self { pool })
    }

    /// The underlying sqlx pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply pending migrations.
    pub async fn migrate(&self) -> Result<(), AppError> {
        super::MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| InfrastructureError::internal_server_error(e.to_string()))
    }

    /// Round-trip a trivial query to verify the database is reachable.
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(map_sqlx_error)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
