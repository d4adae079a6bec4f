//! Registry of users and their statistics.

use indexmap::IndexMap;
use thiserror::Error;

use crate::dao::models::UsersDocument;
use crate::state::game::{GameId, Outcome, UnknownGame, UnknownOutcome, UserRecord};

/// Reasons a result cannot be recorded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// No user is registered under the given name.
    #[error("User not found")]
    UserNotFound,
    /// The game identifier is not one of the hosted games.
    #[error("Game not found")]
    GameNotFound,
    /// The result is neither `win` nor `loss`.
    #[error("Invalid result")]
    InvalidOutcome,
}

/// In-memory registry of every known user and their statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRegistry {
    users: IndexMap<String, UserRecord>,
}

impl UserRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` with zeroed statistics. Returns `false` when it already exists.
    ///
    /// The name is expected to be trimmed and validated by the caller.
    pub fn create(&mut self, name: &str) -> bool {
        if self.users.contains_key(name) {
            return false;
        }
        self.users.insert(name.to_string(), UserRecord::new());
        true
    }

    /// Whether `name` is registered, compared exactly.
    pub fn exists(&self, name: &str) -> bool {
        self.users.contains_key(name)
    }

    /// Record of `name`, if registered.
    pub fn get(&self, name: &str) -> Option<&UserRecord> {
        self.users.get(name)
    }

    /// Owned copy of every record; later mutations are not reflected.
    pub fn snapshot(&self) -> IndexMap<String, UserRecord> {
        self.users.clone()
    }

    /// Registered names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.users.keys().map(String::as_str)
    }

    /// Number of registered users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether no user is registered yet.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Increment the win or loss counter of `game` for `name`.
    ///
    /// Checks run user first, then game, then outcome; a failed check leaves the registry untouched.
    pub fn record_result(
        &mut self,
        name: &str,
        game: &str,
        outcome: &str,
    ) -> Result<(), RecordError> {
        let record = self.users.get_mut(name).ok_or(RecordError::UserNotFound)?;
        let game = game
            .parse::<GameId>()
            .map_err(|UnknownGame| RecordError::GameNotFound)?;
        let stats = record
            .games
            .get_mut(&game)
            .ok_or(RecordError::GameNotFound)?;
        let outcome = outcome
            .parse::<Outcome>()
            .map_err(|UnknownOutcome| RecordError::InvalidOutcome)?;

        stats.record(outcome);
        Ok(())
    }

    /// Aggregate document describing the whole registry.
    pub fn to_document(&self) -> UsersDocument {
        UsersDocument {
            users: self
                .users
                .iter()
                .map(|(name, record)| (name.clone(), record.into()))
                .collect(),
        }
    }
}

impl From<UsersDocument> for UserRegistry {
    fn from(document: UsersDocument) -> Self {
        Self {
            users: document
                .users
                .into_iter()
                .map(|(name, record)| (name, record.into()))
                .collect(),
        }
    }
}
