//! User query repository trait (read side)
//!
//! Reads run outside any transaction, against the ambient connection
//! pool, and return projection rows rather than full aggregates.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use account_shared::types::Pagination;

use crate::errors::AppError;

/// The projection returned by the user listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Read-side queries over users.
#[async_trait]
pub trait UserQueryRepository: Send + Sync {
    /// Page through users ordered by id.
    async fn list_users(&self, pagination: Pagination) -> Result<Vec<UserSummary>, AppError>;
}
