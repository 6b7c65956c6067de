//! Create-user command and its handler

use std::sync::Arc;

use futures_util::future::BoxFuture;

use crate::domain::entities::NewUser;
use crate::errors::AppError;
use crate::repositories::UserRepository;
use crate::transaction::{transactional, TransactionManager};

/// Command to create a user.
#[derive(Debug, Clone)]
pub struct CreateUserCommand {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Handles `CreateUserCommand`: the repository insert runs inside a
/// transaction, so any failure rolls the write back before the error
/// propagates.
pub struct CreateUserHandler<R, M>
where
    M: TransactionManager,
    R: UserRepository<Conn = M::Handle>,
{
    repository: Arc<R>,
    tx_manager: Arc<M>,
}

impl<R, M> CreateUserHandler<R, M>
where
    M: TransactionManager + 'static,
    R: UserRepository<Conn = M::Handle> + 'static,
{
    pub fn new(repository: Arc<R>, tx_manager: Arc<M>) -> Self {
        Self {
            repository,
            tx_manager,
        }
    }

    pub async fn execute(&self, command: CreateUserCommand) -> Result<(), AppError> {
        tracing::info!(email = %command.email, "creating user");

        let new_user = NewUser {
            name: command.name,
            email: command.email,
            password: command.password,
        };

        let repository = Arc::clone(&self.repository);
        transactional(self.tx_manager.as_ref(), move |conn| {
            Box::pin(async move {
                repository.create(conn, new_user).await?;
                Ok(())
            }) as BoxFuture<'_, Result<(), AppError>>
        })
        .await?;

        tracing::info!("user created");
        Ok(())
    }
}
