//! In-memory transaction manager for testing
//!
//! `MemStore` is the committed state a fresh, non-transactional read
//! observes. A `MemSession` stages writes privately; they only reach the
//! store when the session is committed. This mirrors the rollback
//! semantics of a real database closely enough to exercise the
//! coordinator and the command handlers without one.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use async_trait::async_trait;

use super::{handle_unavailable, TransactionManager};
use crate::domain::entities::User;
use crate::errors::AppError;

/// Committed user state, shared between sessions and direct readers.
#[derive(Clone, Default)]
pub struct MemStore {
    users: Arc<RwLock<HashMap<i64, User>>>,
    next_id: Arc<AtomicI64>,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Allocate the next identity id.
    pub fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Read a committed user directly, bypassing any session.
    pub async fn get(&self, id: i64) -> Option<User> {
        self.users.read().await.get(&id).cloned()
    }

    pub async fn all(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by_key(|u| u.id);
        users
    }

    pub async fn contains_email(&self, email: &str) -> bool {
        self.users.read().await.values().any(|u| u.email == email)
    }

    async fn apply(&self, writes: Vec<StagedWrite>) {
        let mut users = self.users.write().await;
        for write in writes {
            match write {
                StagedWrite::Upsert(user) => {
                    users.insert(user.id, user);
                }
                StagedWrite::Delete(id) => {
                    users.remove(&id);
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum StagedWrite {
    Upsert(User),
    Delete(i64),
}

/// A transactional handle over the in-memory store.
pub struct MemSession {
    store: MemStore,
    staged: Vec<StagedWrite>,
}

impl MemSession {
    pub fn stage_upsert(&mut self, user: User) {
        self.staged.push(StagedWrite::Upsert(user));
    }

    pub fn stage_delete(&mut self, id: i64) {
        self.staged.push(StagedWrite::Delete(id));
    }

    /// The id generator of the backing store.
    pub fn next_id(&self) -> i64 {
        self.store.next_id()
    }

    /// Read through the session: staged writes shadow committed state.
    pub async fn find(&self, id: i64) -> Option<User> {
        for write in self.staged.iter().rev() {
            match write {
                StagedWrite::Upsert(user) if user.id == id => return Some(user.clone()),
                StagedWrite::Delete(deleted) if *deleted == id => return None,
                _ => {}
            }
        }
        self.store.get(id).await
    }

    pub async fn email_taken(&self, email: &str) -> bool {
        let staged = self
            .staged
            .iter()
            .any(|w| matches!(w, StagedWrite::Upsert(u) if u.email == email));
        staged || self.store.contains_email(email).await
    }
}

/// Transaction manager over `MemStore`, with counters for asserting the
/// begin/commit/rollback lifecycle in tests.
pub struct MockTransactionManager {
    store: MemStore,
    begun: AtomicUsize,
    committed: AtomicUsize,
    rolled_back: AtomicUsize,
    fail_begin: AtomicBool,
}

impl MockTransactionManager {
    pub fn new(store: MemStore) -> Self {
        Self {
            store,
            begun: AtomicUsize::new(0),
            committed: AtomicUsize::new(0),
            rolled_back: AtomicUsize::new(0),
            fail_begin: AtomicBool::new(false),
        }
    }

    /// Make subsequent `begin` calls fail with the configuration fault.
    pub fn fail_begin(&self) {
        self.fail_begin.store(true, Ordering::SeqCst);
    }

    pub fn begun(&self) -> usize {
        self.begun.load(Ordering::SeqCst)
    }

    pub fn committed(&self) -> usize {
        self.committed.load(Ordering::SeqCst)
    }

    pub fn rolled_back(&self) -> usize {
        self.rolled_back.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TransactionManager for MockTransactionManager {
    type Handle = MemSession;

    async fn begin(&self) -> Result<MemSession, AppError> {
        if self.fail_begin.load(Ordering::SeqCst) {
            return Err(handle_unavailable());
        }
        self.begun.fetch_add(1, Ordering::SeqCst);
        Ok(MemSession {
            store: self.store.clone(),
            staged: Vec::new(),
        })
    }

    async fn commit(&self, handle: MemSession) -> Result<(), AppError> {
        self.committed.fetch_add(1, Ordering::SeqCst);
        self.store.apply(handle.staged).await;
        Ok(())
    }

    async fn rollback(&self, handle: MemSession) -> Result<(), AppError> {
        self.rolled_back.fetch_add(1, Ordering::SeqCst);
        drop(handle);
        Ok(())
    }
}
