//! Layouts of the JSON files written by the snapshot stores.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Layout of the aggregate users file: `{ "users": { "<name>": { ... } } }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UsersDocument {
    /// Every known user keyed by display name.
    pub users: IndexMap<String, UserRecordEntity>,
}

/// Persisted statistics of a single user, also the layout of a per-user file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecordEntity {
    /// Counters keyed by game identifier (e.g. `snake`).
    #[serde(default)]
    pub games: IndexMap<String, GameStatsEntity>,
}

/// Win/loss counters as stored on disk.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStatsEntity {
    /// Number of rounds won.
    #[serde(default)]
    pub wins: u64,
    /// Number of rounds lost.
    #[serde(default)]
    pub losses: u64,
}
