//! Postgres transaction manager
//!
//! Implements the core `TransactionManager` trait over a sqlx pool. The
//! handle is a real database transaction; dropping it without commit
//! rolls it back on the server side, but the coordinator always
//! finalizes explicitly.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use account_core::errors::AppError;
use account_core::transaction::{handle_unavailable, TransactionManager};

use super::error::map_sqlx_error;

pub struct PgTransactionManager {
    pool: PgPool,
}

impl PgTransactionManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionManager for PgTransactionManager {
    type Handle = Transaction<'static, Postgres>;

    async fn begin(&self) -> Result<Self::Handle, AppError> {
        // A closed pool is a wiring fault, not a runtime error.
        if self.pool.is_closed() {
            return Err(handle_unavailable());
        }
        self.pool.begin().await.map_err(map_sqlx_error)
    }

    async fn commit(&self, handle: Self::Handle) -> Result<(), AppError> {
        handle.commit().await.map_err(map_sqlx_error)
    }

    async fn rollback(&self, handle: Self::Handle) -> Result<(), AppError> {
        handle.rollback().await.map_err(map_sqlx_error)
    }
}
