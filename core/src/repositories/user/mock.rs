//! In-memory implementation of UserRepository for testing

use async_trait::async_trait;
use chrono::Utc;

use super::trait_::UserRepository;
use crate::domain::entities::{NewUser, User};
use crate::errors::{AppError, InfrastructureError, UseCaseError};
use crate::transaction::mock::MemSession;

/// Mock user repository writing through a `MemSession`, so staged writes
/// are only visible after the session commits. All state lives in the
/// session's backing store; the repository itself is stateless.
#[derive(Default)]
pub struct MockUserRepository;

impl MockUserRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    type Conn = MemSession;

    async fn create(&self, conn: &mut MemSession, user: NewUser) -> Result<User, AppError> {
        if conn.email_taken(&user.email).await {
            // The real implementation surfaces the unique-index violation
            // from the driver; same fault shape here.
            return Err(InfrastructureError::conflict("email is already registered")
                .with_info(serde_json::json!({"constraint": "users_email_unique"})));
        }

        let now = Utc::now();
        let user = User {
            id: conn.next_id(),
            name: user.name,
            email: user.email,
            password: user.password,
            created_at: now,
            updated_at: now,
            posts: Vec::new(),
        };
        conn.stage_upsert(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, conn: &mut MemSession, id: i64) -> Result<Option<User>, AppError> {
        Ok(conn.find(id).await)
    }

    async fn update(&self, conn: &mut MemSession, user: User) -> Result<User, AppError> {
        if user.id <= 0 {
            return Err(UseCaseError::internal_server_error(
                "user id is required for update",
            ));
        }
        let mut user = user;
        user.updated_at = Utc::now();
        conn.stage_upsert(user.clone());
        Ok(user)
    }

    async fn delete_by_id(&self, conn: &mut MemSession, id: i64) -> Result<(), AppError> {
        if id <= 0 {
            return Err(UseCaseError::internal_server_error(
                "user id is required for deletion",
            ));
        }
        conn.stage_delete(id);
        Ok(())
    }
}
