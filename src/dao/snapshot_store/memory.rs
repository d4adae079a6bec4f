use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

use futures::future::BoxFuture;
use indexmap::IndexMap;

use super::{SnapshotStore, is_safe_file_stem};
use crate::dao::{
    models::{UserRecordEntity, UsersDocument},
    storage::{StorageError, StorageResult},
};

/// In-memory snapshot store recording every flush, used by unit tests.
#[derive(Clone, Default)]
pub struct MemorySnapshotStore {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    users: Mutex<Option<UsersDocument>>,
    per_user: Mutex<IndexMap<String, UserRecordEntity>>,
    flushes: Mutex<usize>,
    failing: AtomicBool,
}

impl MemorySnapshotStore {
    /// Empty store that accepts every write.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the aggregate document returned by the next load.
    pub fn with_users(users: UsersDocument) -> Self {
        let store = Self::new();
        *store.inner.users.lock().unwrap() = Some(users);
        store
    }

    /// Make every subsequent write fail.
    pub fn set_failing(&self, failing: bool) {
        self.inner.failing.store(failing, Ordering::SeqCst);
    }

    /// Latest aggregate document written.
    pub fn users(&self) -> Option<UsersDocument> {
        self.inner.users.lock().unwrap().clone()
    }

    /// Latest per-user record written for `name`.
    pub fn user(&self, name: &str) -> Option<UserRecordEntity> {
        self.inner.per_user.lock().unwrap().get(name).cloned()
    }

    /// Number of successful aggregate flushes.
    pub fn flushes(&self) -> usize {
        *self.inner.flushes.lock().unwrap()
    }

    fn check_failing(&self) -> StorageResult<()> {
        if self.inner.failing.load(Ordering::SeqCst) {
            return Err(StorageError::io(
                "memory",
                std::io::Error::other("simulated write failure"),
            ));
        }
        Ok(())
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn prepare(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn load_users(&self) -> BoxFuture<'static, StorageResult<Option<UsersDocument>>> {
        let users = self.users();
        Box::pin(async move { Ok(users) })
    }

    fn save_users(&self, users: UsersDocument) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.check_failing()?;
            *store.inner.users.lock().unwrap() = Some(users);
            *store.inner.flushes.lock().unwrap() += 1;
            Ok(())
        })
    }

    fn save_user(
        &self,
        name: String,
        record: UserRecordEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.check_failing()?;
            if !is_safe_file_stem(&name) {
                return Err(StorageError::UnsafeName { name });
            }
            store.inner.per_user.lock().unwrap().insert(name, record);
            Ok(())
        })
    }
}
