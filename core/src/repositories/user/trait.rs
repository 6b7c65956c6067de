//! User command repository trait
//!
//! Every operation takes the connection handle it must run against, so a
//! transactionally-wrapped handler can make all of its repository calls
//! observe the same transaction. The handle type is an associated type;
//! the Postgres implementation uses a sqlx transaction, the mock uses an
//! in-memory session.

use async_trait::async_trait;

use crate::domain::entities::{NewUser, User};
use crate::errors::AppError;

/// Write-side persistence operations for users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Connection handle the operations execute against.
    type Conn: Send;

    /// Insert a new user and return the persisted row.
    ///
    /// Fails with a conflict fault when the email is already registered.
    async fn create(&self, conn: &mut Self::Conn, user: NewUser) -> Result<User, AppError>;

    /// Load a user (with their posts) by id.
    async fn find_by_id(&self, conn: &mut Self::Conn, id: i64) -> Result<Option<User>, AppError>;

    /// Overwrite an existing user's fields.
    ///
    /// Fails with an internal fault when the id is missing (zero): that is
    /// a programming error, not a business outcome.
    async fn update(&self, conn: &mut Self::Conn, user: User) -> Result<User, AppError>;

    /// Delete a user by id. Deleting an absent id is not an error.
    async fn delete_by_id(&self, conn: &mut Self::Conn, id: i64) -> Result<(), AppError>;
}
