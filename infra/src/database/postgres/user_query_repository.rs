//! Postgres implementation of the UserQueryRepository trait
//!
//! Read-only listing over the ambient pool; no transaction involved.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use account_core::errors::AppError;
use account_core::repositories::{UserQueryRepository, UserSummary};
use account_shared::types::Pagination;

use crate::database::error::map_sqlx_error;

pub struct PgUserQueryRepository {
    pool: PgPool,
}

impl PgUserQueryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserSummaryRow {
    id: i64,
    name: String,
    email: String,
}

#[async_trait]
impl UserQueryRepository for PgUserQueryRepository {
    async fn list_users(&self, pagination: Pagination) -> Result<Vec<UserSummary>, AppError> {
        let rows: Vec<UserSummaryRow> = sqlx::query_as(
            r#"
            SELECT id, name, email
            FROM users
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(pagination.limit_i64())
        .bind(pagination.offset_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows
            .into_iter()
            .map(|row| UserSummary {
                id: row.id,
                name: row.name,
                email: row.email,
            })
            .collect())
    }
}
