//! Transaction coordination
//!
//! A command handler's body, plus every repository call it makes, must run
//! against one transactional connection handle: commit when the body
//! returns `Ok`, roll back when it returns `Err`.
//!
//! The handle is threaded through the call chain as an explicit argument
//! rather than stashed in shared handler state, so concurrent invocations
//! of the same handler cannot observe each other's handles. On every exit
//! path the handle is moved into `commit` or `rollback`, which also means
//! a stale transactional handle cannot survive the call.
//!
//! Nesting `transactional` calls (a wrapped body starting a second
//! transaction on the same manager) carries no correctness guarantees;
//! the inner call simply runs in its own independent transaction.

pub mod mock;

use async_trait::async_trait;
use futures_util::future::BoxFuture;

use crate::errors::{AppError, UseCaseError};

/// Raised by managers whose connection source is gone before a
/// transaction could start. A programming/configuration fault, not a
/// runtime error: it must not be retried.
pub const HANDLE_UNAVAILABLE: &str = "database handle is not available for transaction";

/// The configuration fault for a missing connection handle.
pub fn handle_unavailable() -> AppError {
    UseCaseError::internal_server_error(HANDLE_UNAVAILABLE)
}

/// Produces and finalizes transactional connection handles.
#[async_trait]
pub trait TransactionManager: Send + Sync {
    /// The transactional connection handle repositories execute against.
    type Handle: Send;

    async fn begin(&self) -> Result<Self::Handle, AppError>;
    async fn commit(&self, handle: Self::Handle) -> Result<(), AppError>;
    async fn rollback(&self, handle: Self::Handle) -> Result<(), AppError>;
}

/// Run `work` inside a transaction.
///
/// Commits when `work` returns `Ok`, rolls back when it returns `Err`.
/// The work's error propagates unchanged: no wrapping, no logging, and a
/// failed rollback never masks it.
pub async fn transactional<M, T, F>(manager: &M, work: F) -> Result<T, AppError>
where
    M: TransactionManager,
    F: for<'c> FnOnce(&'c mut M::Handle) -> BoxFuture<'c, Result<T, AppError>> + Send,
    T: Send,
{
    let mut handle = manager.begin().await?;

    match work(&mut handle).await {
        Ok(value) => {
            manager.commit(handle).await?;
            Ok(value)
        }
        Err(error) => {
            let _ = manager.rollback(handle).await;
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::{MemStore, MockTransactionManager};
    use super::*;
    use crate::domain::entities::User;
    use crate::errors::DomainError;
    use chrono::Utc;
    use futures_util::future::BoxFuture;

    fn sample_user(id: i64, email: &str) -> User {
        let now = Utc::now();
        User {
            id,
            name: "Jane".to_string(),
            email: email.to_string(),
            password: "secret123".to_string(),
            created_at: now,
            updated_at: now,
            posts: Vec::new(),
        }
    }

    #[tokio::test]
    async fn commits_staged_writes_on_success() {
        let store = MemStore::new();
        let manager = MockTransactionManager::new(store.clone());

        let result = transactional(&manager, |session| {
            Box::pin(async move {
                session.stage_upsert(sample_user(1, "jane@example.com"));
                Ok(1i64)
            }) as BoxFuture<'_, Result<i64, _>>
        })
        .await
        .unwrap();

        assert_eq!(result, 1);
        assert!(store.get(1).await.is_some());
        assert_eq!(manager.committed(), 1);
        assert_eq!(manager.rolled_back(), 0);
    }

    #[tokio::test]
    async fn rolls_back_staged_writes_on_error() {
        let store = MemStore::new();
        let manager = MockTransactionManager::new(store.clone());

        let error = transactional(&manager, |session| {
            Box::pin(async move {
                session.stage_upsert(sample_user(1, "jane@example.com"));
                Err::<(), _>(DomainError::conflict("email taken"))
            }) as BoxFuture<'_, Result<(), _>>
        })
        .await
        .unwrap_err();

        // The error propagates unchanged.
        assert_eq!(error, DomainError::conflict("email taken"));

        // A fresh read through the committed store sees no partial write.
        assert!(store.get(1).await.is_none());
        assert_eq!(manager.committed(), 0);
        assert_eq!(manager.rolled_back(), 1);
    }

    #[tokio::test]
    async fn fails_fast_when_no_handle_is_available() {
        let store = MemStore::new();
        let manager = MockTransactionManager::new(store);
        manager.fail_begin();

        let error = transactional(&manager, |_session| {
            Box::pin(async move { Ok(()) }) as BoxFuture<'_, Result<(), _>>
        })
        .await
        .unwrap_err();

        assert_eq!(error.message, HANDLE_UNAVAILABLE);
        assert_eq!(error.status_code, 500);
        assert_eq!(manager.committed(), 0);
        assert_eq!(manager.rolled_back(), 0);
    }

    #[tokio::test]
    async fn every_begun_handle_is_finalized() {
        let store = MemStore::new();
        let manager = MockTransactionManager::new(store.clone());

        for i in 0..3i64 {
            let _ = transactional(&manager, move |session| {
                Box::pin(async move {
                    session.stage_upsert(sample_user(i, &format!("u{i}@example.com")));
                    if i % 2 == 0 {
                        Ok(())
                    } else {
                        Err(DomainError::bad_request("odd"))
                    }
                }) as BoxFuture<'_, Result<(), _>>
            })
            .await;
        }

        // No handle outlives its call: each begin was matched by exactly
        // one commit or rollback.
        assert_eq!(
            manager.begun(),
            manager.committed() + manager.rolled_back()
        );
    }
}
