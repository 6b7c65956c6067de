//! In-memory implementation of UserQueryRepository for testing

use async_trait::async_trait;

use account_shared::types::Pagination;

use super::trait_::{UserQueryRepository, UserSummary};
use crate::errors::AppError;
use crate::transaction::mock::MemStore;

/// Mock query repository reading committed state only.
pub struct MockUserQueryRepository {
    store: MemStore,
}

impl MockUserQueryRepository {
    pub fn new(store: MemStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserQueryRepository for MockUserQueryRepository {
    async fn list_users(&self, pagination: Pagination) -> Result<Vec<UserSummary>, AppError> {
        let users = self.store.all().await;
        Ok(users
            .into_iter()
            .skip(usize::try_from(pagination.offset()).unwrap_or(usize::MAX))
            .take(pagination.limit as usize)
            .map(|u| UserSummary {
                id: u.id,
                name: u.name,
                email: u.email,
            })
            .collect())
    }
}
