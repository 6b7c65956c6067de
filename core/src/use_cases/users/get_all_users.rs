//! Get-all-users query and its handler

use std::sync::Arc;

use account_shared::types::Pagination;

use crate::errors::AppError;
use crate::repositories::{UserQueryRepository, UserSummary};

/// Query for a page of users.
#[derive(Debug, Clone, Copy)]
pub struct GetAllUsersQuery {
    pub pagination: Pagination,
}

impl GetAllUsersQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            pagination: Pagination::new(page, limit),
        }
    }
}

/// Handles `GetAllUsersQuery` by delegating to the read-side repository.
pub struct GetAllUsersHandler<Q> {
    query_repository: Arc<Q>,
}

impl<Q> GetAllUsersHandler<Q>
where
    Q: UserQueryRepository + 'static,
{
    pub fn new(query_repository: Arc<Q>) -> Self {
        Self { query_repository }
    }

    pub async fn execute(&self, query: GetAllUsersQuery) -> Result<Vec<UserSummary>, AppError> {
        self.query_repository.list_users(query.pagination).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::User;
    use crate::repositories::user_query::MockUserQueryRepository;
    use crate::transaction::mock::{MemStore, MockTransactionManager};
    use crate::transaction::TransactionManager;
    use chrono::Utc;

    async fn seed_users(store: &MemStore, count: i64) {
        let manager = MockTransactionManager::new(store.clone());
        let mut session = manager.begin().await.unwrap();
        let now = Utc::now();
        for i in 1..=count {
            session.stage_upsert(User {
                id: i,
                name: format!("user{i}"),
                email: format!("user{i}@example.com"),
                password: "secret123".to_string(),
                created_at: now,
                updated_at: now,
                posts: Vec::new(),
            });
        }
        manager.commit(session).await.unwrap();
    }

    #[tokio::test]
    async fn returns_the_requested_page() {
        let store = MemStore::new();
        seed_users(&store, 25).await;
        let handler = GetAllUsersHandler::new(Arc::new(MockUserQueryRepository::new(
            store.clone(),
        )));

        let page = handler.execute(GetAllUsersQuery::new(2, 10)).await.unwrap();

        assert_eq!(page.len(), 10);
        assert_eq!(page[0].id, 11);
        assert_eq!(page[9].id, 20);
    }

    #[tokio::test]
    async fn last_page_may_be_short() {
        let store = MemStore::new();
        seed_users(&store, 25).await;
        let handler = GetAllUsersHandler::new(Arc::new(MockUserQueryRepository::new(
            store.clone(),
        )));

        let page = handler.execute(GetAllUsersQuery::new(3, 10)).await.unwrap();
        assert_eq!(page.len(), 5);
    }
}
