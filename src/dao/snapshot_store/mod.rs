pub mod json_files;
/// In-memory store used by tests.
#[cfg(test)]
pub mod memory;

use futures::future::BoxFuture;

use crate::dao::models::{UserRecordEntity, UsersDocument};
use crate::dao::storage::StorageResult;

/// Abstraction over where user statistics are flushed to and loaded from.
pub trait SnapshotStore: Send + Sync {
    /// Make sure the backing locations exist before the first flush.
    fn prepare(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Load the aggregate document, `None` when nothing was persisted yet.
    fn load_users(&self) -> BoxFuture<'static, StorageResult<Option<UsersDocument>>>;
    /// Overwrite the aggregate document with the full store.
    fn save_users(&self, users: UsersDocument) -> BoxFuture<'static, StorageResult<()>>;
    /// Overwrite the individual snapshot of a single user.
    fn save_user(
        &self,
        name: String,
        record: UserRecordEntity,
    ) -> BoxFuture<'static, StorageResult<()>>;
}

/// Whether `name` can be used verbatim as a file stem.
pub fn is_safe_file_stem(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name
            .chars()
            .any(|c| matches!(c, '/' | '\\' | ':' | '\0') || c.is_control())
}
