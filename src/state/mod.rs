//! Shared application state: the user registry and its persistence.

pub mod game;
pub mod users;

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use indexmap::IndexMap;
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info, warn};

use crate::{
    config::AppConfig,
    dao::{
        models::{UserRecordEntity, UsersDocument},
        snapshot_store::SnapshotStore,
    },
};

pub use self::game::{GameId, GameStats, UserRecord};
pub use self::users::{RecordError, UserRegistry};

/// Handle to the application state shared by every request.
pub type SharedState = Arc<AppState>;

/// Central application state: the user registry and the store it is flushed to.
pub struct AppState {
    config: AppConfig,
    users: RwLock<UserRegistry>,
    snapshots: Arc<dyn SnapshotStore>,
    /// Held from a mutation until its flushes complete so files are written in mutation order.
    persist_gate: Mutex<()>,
    persistence_healthy: AtomicBool,
}

impl AppState {
    /// Build the state around an already populated registry.
    pub fn new(
        config: AppConfig,
        registry: UserRegistry,
        snapshots: Arc<dyn SnapshotStore>,
    ) -> SharedState {
        Arc::new(Self {
            config,
            users: RwLock::new(registry),
            snapshots,
            persist_gate: Mutex::new(()),
            persistence_healthy: AtomicBool::new(true),
        })
    }

    /// Prepare the store and seed the registry from its aggregate document.
    ///
    /// Unreadable or malformed documents are logged and the registry starts empty.
    pub async fn load(config: AppConfig, snapshots: Arc<dyn SnapshotStore>) -> SharedState {
        if let Err(err) = snapshots.prepare().await {
            warn!(error = %err, "failed to prepare snapshot locations");
        }

        let registry = match snapshots.load_users().await {
            Ok(Some(document)) => UserRegistry::from(document),
            Ok(None) => {
                info!("no existing users file found, starting fresh");
                UserRegistry::new()
            }
            Err(err) => {
                warn!(error = %err, "failed to load users file, starting fresh");
                UserRegistry::new()
            }
        };

        Self::new(config, registry, snapshots)
    }

    /// Resolved runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Whether the latest flush went through.
    pub fn persistence_healthy(&self) -> bool {
        self.persistence_healthy.load(Ordering::Relaxed)
    }

    /// Whether `name` is registered.
    pub async fn user_exists(&self, name: &str) -> bool {
        self.users.read().await.exists(name)
    }

    /// Number of registered users.
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    /// Registered names in insertion order.
    pub async fn user_names(&self) -> Vec<String> {
        self.users.read().await.names().map(String::from).collect()
    }

    /// Detached copy of every record.
    pub async fn users_snapshot(&self) -> IndexMap<String, UserRecord> {
        self.users.read().await.snapshot()
    }

    /// Register `name` and persist it. Returns `false` without persisting when it already exists.
    pub async fn create_user(&self, name: &str) -> bool {
        let _gate = self.persist_gate.lock().await;
        let (document, record) = {
            let mut users = self.users.write().await;
            if !users.create(name) {
                return false;
            }
            (users.to_document(), users.get(name).map(UserRecordEntity::from))
        };

        info!(user = %name, "registered new user");
        self.flush(document, name, record).await;
        true
    }

    /// Record a win or loss for `name` and persist the change.
    pub async fn record_result(
        &self,
        name: &str,
        game: &str,
        outcome: &str,
    ) -> Result<(), RecordError> {
        let _gate = self.persist_gate.lock().await;
        let (document, record) = {
            let mut users = self.users.write().await;
            users.record_result(name, game, outcome)?;
            (users.to_document(), users.get(name).map(UserRecordEntity::from))
        };

        info!(user = %name, game = %game, result = %outcome, "recorded game result");
        self.flush(document, name, record).await;
        Ok(())
    }

    /// Write the full registry to the aggregate document, used on shutdown.
    pub async fn flush_all(&self) {
        let _gate = self.persist_gate.lock().await;
        let document = self.users.read().await.to_document();
        let count = document.users.len();
        match self.snapshots.save_users(document).await {
            Ok(()) => {
                self.persistence_healthy.store(true, Ordering::Relaxed);
                info!(users = count, "saved users file");
            }
            Err(err) => {
                self.persistence_healthy.store(false, Ordering::Relaxed);
                error!(error = %err, "error saving users");
            }
        }
    }

    /// Best-effort aggregate and per-user flushes; failures are logged and never undo the mutation.
    async fn flush(
        &self,
        document: UsersDocument,
        name: &str,
        record: Option<UserRecordEntity>,
    ) {
        let mut healthy = true;

        if let Err(err) = self.snapshots.save_users(document).await {
            healthy = false;
            error!(error = %err, "error saving users");
        }

        if let Some(record) = record {
            if let Err(err) = self.snapshots.save_user(name.to_string(), record).await {
                healthy = false;
                error!(user = %name, error = %err, "error saving user results");
            }
        }

        self.persistence_healthy.store(healthy, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::{
        models::GameStatsEntity,
        snapshot_store::{json_files::JsonFileStore, memory::MemorySnapshotStore},
    };

    async fn state_with(store: &MemorySnapshotStore) -> SharedState {
        AppState::load(AppConfig::default(), Arc::new(store.clone())).await
    }

    #[tokio::test]
    async fn legacy_users_file_without_games_is_normalised() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("names.json"),
            r#"{"users":{"Alice":{"games":{"snake":{"wins":3,"losses":0}}},"Bob":{}}}"#,
        )
        .unwrap();
        let store = JsonFileStore::new(dir.path().join("names.json"), dir.path().join("results"));
        let state = AppState::load(AppConfig::default(), Arc::new(store)).await;

        let users = state.users_snapshot().await;
        assert_eq!(
            users["Alice"].stats(GameId::Snake),
            Some(&GameStats { wins: 3, losses: 0 })
        );
        assert_eq!(users["Bob"], UserRecord::new());
    }

    #[tokio::test]
    async fn create_user_flushes_both_documents() {
        let store = MemorySnapshotStore::new();
        let state = state_with(&store).await;

        assert!(state.create_user("Alice").await);

        let users = store.users().unwrap();
        assert!(users.users.contains_key("Alice"));
        assert_eq!(store.user("Alice").unwrap().games.len(), 9);
    }

    #[tokio::test]
    async fn existing_user_is_not_flushed_again() {
        let store = MemorySnapshotStore::new();
        let state = state_with(&store).await;

        assert!(state.create_user("Alice").await);
        assert!(!state.create_user("Alice").await);
        assert_eq!(store.flushes(), 1);
    }

    #[tokio::test]
    async fn failed_result_does_not_flush() {
        let store = MemorySnapshotStore::new();
        let state = state_with(&store).await;
        state.create_user("Alice").await;

        let err = state.record_result("Bob", "snake", "win").await.unwrap_err();
        assert_eq!(err, RecordError::UserNotFound);
        assert_eq!(store.flushes(), 1);
    }

    #[tokio::test]
    async fn results_survive_a_reload() {
        let store = MemorySnapshotStore::new();
        let state = state_with(&store).await;
        state.create_user("Alice").await;
        state.record_result("Alice", "snake", "win").await.unwrap();
        state.record_result("Alice", "snake", "loss").await.unwrap();

        let reloaded = state_with(&store).await;
        assert_eq!(reloaded.users_snapshot().await, state.users_snapshot().await);
        assert_eq!(
            store.user("Alice").unwrap().games["snake"],
            GameStatsEntity { wins: 1, losses: 1 }
        );
    }

    #[tokio::test]
    async fn persistence_failure_keeps_in_memory_change() {
        let store = MemorySnapshotStore::new();
        let state = state_with(&store).await;
        store.set_failing(true);

        assert!(state.create_user("Alice").await);
        state.record_result("Alice", "memory", "win").await.unwrap();

        assert!(state.user_exists("Alice").await);
        assert!(!state.persistence_healthy());
        assert!(store.users().is_none());

        store.set_failing(false);
        state.flush_all().await;
        assert!(state.persistence_healthy());
        assert!(store.users().unwrap().users.contains_key("Alice"));
    }

    #[tokio::test]
    async fn load_seeds_registry_from_document() {
        let mut seeded = UserRegistry::new();
        seeded.create("Carol");
        let store = MemorySnapshotStore::with_users(seeded.to_document());

        let state = state_with(&store).await;
        assert!(state.user_exists("Carol").await);
        assert_eq!(state.user_count().await, 1);
        assert_eq!(state.user_names().await, vec!["Carol".to_string()]);
    }
}
