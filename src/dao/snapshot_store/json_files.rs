//! Snapshot store writing pretty-printed JSON files on the local filesystem.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use futures::future::BoxFuture;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, warn};

use super::{SnapshotStore, is_safe_file_stem};
use crate::dao::{
    models::{UserRecordEntity, UsersDocument},
    storage::{StorageError, StorageResult},
};

/// Stores the aggregate document in one file and each user in `<results_dir>/<name>.json`.
#[derive(Clone)]
pub struct JsonFileStore {
    inner: Arc<JsonFileInner>,
}

struct JsonFileInner {
    users_file: PathBuf,
    results_dir: PathBuf,
}

impl JsonFileStore {
    /// Build a store targeting the given aggregate file and results directory.
    pub fn new(users_file: impl Into<PathBuf>, results_dir: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(JsonFileInner {
                users_file: users_file.into(),
                results_dir: results_dir.into(),
            }),
        }
    }

    /// Location of the aggregate users file.
    pub fn users_file(&self) -> &Path {
        &self.inner.users_file
    }

    /// Directory holding one file per user.
    pub fn results_dir(&self) -> &Path {
        &self.inner.results_dir
    }

    /// Path of the snapshot file for `name`, refusing names that would escape the directory.
    pub fn user_file(&self, name: &str) -> StorageResult<PathBuf> {
        if !is_safe_file_stem(name) {
            return Err(StorageError::UnsafeName { name: name.into() });
        }
        Ok(self.inner.results_dir.join(format!("{name}.json")))
    }
}

/// Aggregate file with each user left undecoded, so one bad entry does not sink the others.
#[derive(Deserialize)]
struct RawUsersDocument {
    users: IndexMap<String, serde_json::Value>,
}

fn decode_users(path: &Path, bytes: &[u8]) -> StorageResult<UsersDocument> {
    let raw = serde_json::from_slice::<RawUsersDocument>(bytes)
        .map_err(|source| StorageError::serialize(path, source))?;

    let mut users = IndexMap::with_capacity(raw.users.len());
    for (name, value) in raw.users {
        match serde_json::from_value::<UserRecordEntity>(value) {
            Ok(record) => {
                users.insert(name, record);
            }
            Err(err) => warn!(user = %name, error = %err, "skipping unreadable user record"),
        }
    }
    Ok(UsersDocument { users })
}

fn encode<T: Serialize>(path: &Path, value: &T) -> StorageResult<Vec<u8>> {
    serde_json::to_vec_pretty(value).map_err(|source| StorageError::serialize(path, source))
}

/// Write through a sibling temporary file so readers never observe a truncated document.
async fn write_replacing(path: &Path, bytes: Vec<u8>) -> StorageResult<()> {
    let mut tmp_path = path.as_os_str().to_owned();
    tmp_path.push(".tmp");
    let tmp_path = PathBuf::from(tmp_path);
    fs::write(&tmp_path, bytes)
        .await
        .map_err(|source| StorageError::io(&tmp_path, source))?;
    fs::rename(&tmp_path, path)
        .await
        .map_err(|source| StorageError::io(path, source))
}

impl SnapshotStore for JsonFileStore {
    fn prepare(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let results_dir = store.results_dir();
            fs::create_dir_all(results_dir)
                .await
                .map_err(|source| StorageError::io(results_dir, source))?;

            if let Some(parent) = store
                .users_file()
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
            {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|source| StorageError::io(parent, source))?;
            }
            Ok(())
        })
    }

    fn load_users(&self) -> BoxFuture<'static, StorageResult<Option<UsersDocument>>> {
        let store = self.clone();
        Box::pin(async move {
            let path = store.users_file();
            let bytes = match fs::read(path).await {
                Ok(bytes) => bytes,
                Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
                Err(source) => return Err(StorageError::io(path, source)),
            };

            decode_users(path, &bytes).map(Some)
        })
    }

    fn save_users(&self, users: UsersDocument) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let path = store.users_file();
            let bytes = encode(path, &users)?;
            write_replacing(path, bytes).await?;
            debug!(path = %path.display(), users = users.users.len(), "flushed users file");
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
            let path = store.user_file(&name)?;
            let bytes = encode(&path, &record)?;
            fs::write(&path, bytes)
                .await
                .map_err(|source| StorageError::io(&path, source))?;
            debug!(user = %name, path = %path.display(), "flushed user results");
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use tempfile::TempDir;

    use super::*;
    use crate::dao::models::GameStatsEntity;

    fn store_in(dir: &TempDir) -> JsonFileStore {
        JsonFileStore::new(dir.path().join("names.json"), dir.path().join("results"))
    }

    fn record(wins: u64) -> UserRecordEntity {
        let mut games = IndexMap::new();
        games.insert("snake".to_string(), GameStatsEntity { wins, losses: 0 });
        UserRecordEntity { games }
    }

    #[tokio::test]
    async fn missing_users_file_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.load_users().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn prepare_creates_results_dir() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.prepare().await.unwrap();
        assert!(dir.path().join("results").is_dir());
    }

    #[tokio::test]
    async fn saved_users_load_back_identically() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut users = IndexMap::new();
        users.insert("Alice".to_string(), record(3));
        users.insert("Bob".to_string(), record(0));
        let document = UsersDocument { users };

        store.save_users(document.clone()).await.unwrap();
        let loaded = store.load_users().await.unwrap().unwrap();

        assert_eq!(loaded, document);
        assert!(!dir.path().join("names.json.tmp").exists());
    }

    #[tokio::test]
    async fn users_file_uses_documented_layout() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut users = IndexMap::new();
        users.insert("Alice".to_string(), record(1));
        store.save_users(UsersDocument { users }).await.unwrap();

        let raw = std::fs::read_to_string(dir.path().join("names.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["users"]["Alice"]["games"]["snake"]["wins"], 1);
        assert!(raw.contains("\n  \"users\""));
    }

    #[tokio::test]
    async fn document_without_users_field_is_rejected() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("names.json"), r#"{"people": {}}"#).unwrap();

        let err = store_in(&dir).load_users().await.unwrap_err();
        assert!(matches!(err, StorageError::Serialize { .. }));
    }

    #[tokio::test]
    async fn partial_legacy_records_keep_their_neighbours() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("names.json"),
            r#"{"users":{
                "Alice":{"games":{"snake":{"wins":3,"losses":0}}},
                "Bob":{},
                "Carol":{"games":5},
                "Dave":{"games":{"memory":{"wins":1}}}
            }}"#,
        )
        .unwrap();

        let loaded = store_in(&dir).load_users().await.unwrap().unwrap();
        let names: Vec<_> = loaded.users.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Dave"]);
        assert_eq!(loaded.users["Alice"], record(3));
        assert!(loaded.users["Bob"].games.is_empty());
        assert_eq!(
            loaded.users["Dave"].games["memory"],
            GameStatsEntity { wins: 1, losses: 0 }
        );
    }

    #[tokio::test]
    async fn users_file_with_tmp_extension_is_replaced_safely() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("names.tmp"), dir.path().join("results"));

        let mut users = IndexMap::new();
        users.insert("Alice".to_string(), record(2));
        let document = UsersDocument { users };

        store.save_users(document.clone()).await.unwrap();
        store.save_users(document.clone()).await.unwrap();

        assert_eq!(store.load_users().await.unwrap().unwrap(), document);
        assert!(!dir.path().join("names.tmp.tmp").exists());
    }

    #[tokio::test]
    async fn user_snapshot_is_written_per_name() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.prepare().await.unwrap();

        store.save_user("Alice".into(), record(2)).await.unwrap();
        store.save_user("Alice".into(), record(5)).await.unwrap();

        let raw = std::fs::read_to_string(dir.path().join("results/Alice.json")).unwrap();
        let loaded: UserRecordEntity = serde_json::from_str(&raw).unwrap();
        assert_eq!(loaded, record(5));
    }

    #[tokio::test]
    async fn unsafe_names_are_not_written() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.prepare().await.unwrap();

        let err = store
            .save_user("../names".into(), record(1))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::UnsafeName { .. }));
        assert!(!dir.path().join("names.json").exists());
    }
}
