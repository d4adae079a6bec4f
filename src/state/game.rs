//! Hosted games and per-game win/loss counters.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::dao::models::{GameStatsEntity, UserRecordEntity};

/// Identifier of one of the mini-games hosted by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum GameId {
    /// `ticTacToe`
    TicTacToe,
    /// `numberGuessing`
    NumberGuessing,
    /// `reactionTest`
    ReactionTest,
    /// `rockPaperScissors`
    RockPaperScissors,
    /// `memory`
    Memory,
    /// `mathQuiz`
    MathQuiz,
    /// `snake`
    Snake,
    /// `wordGuessing`
    WordGuessing,
    /// `colorMemory`
    ColorMemory,
}

impl GameId {
    /// Every hosted game, in the order records list them.
    pub const ALL: [GameId; 9] = [
        GameId::TicTacToe,
        GameId::NumberGuessing,
        GameId::ReactionTest,
        GameId::RockPaperScissors,
        GameId::Memory,
        GameId::MathQuiz,
        GameId::Snake,
        GameId::WordGuessing,
        GameId::ColorMemory,
    ];

    /// Wire identifier used in JSON payloads and files.
    pub fn as_str(self) -> &'static str {
        match self {
            GameId::TicTacToe => "ticTacToe",
            GameId::NumberGuessing => "numberGuessing",
            GameId::ReactionTest => "reactionTest",
            GameId::RockPaperScissors => "rockPaperScissors",
            GameId::Memory => "memory",
            GameId::MathQuiz => "mathQuiz",
            GameId::Snake => "snake",
            GameId::WordGuessing => "wordGuessing",
            GameId::ColorMemory => "colorMemory",
        }
    }

    /// Human readable title shown in logs.
    pub fn title(self) -> &'static str {
        match self {
            GameId::TicTacToe => "Tic-Tac-Toe",
            GameId::NumberGuessing => "Number Guessing",
            GameId::ReactionTest => "Reaction Test",
            GameId::RockPaperScissors => "Rock Paper Scissors",
            GameId::Memory => "Memory Game",
            GameId::MathQuiz => "Math Quiz",
            GameId::Snake => "Snake Game",
            GameId::WordGuessing => "Word Guessing",
            GameId::ColorMemory => "Color Memory",
        }
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a string does not name a hosted game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGame;

impl FromStr for GameId {
    type Err = UnknownGame;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        GameId::ALL
            .into_iter()
            .find(|id| id.as_str() == value)
            .ok_or(UnknownGame)
    }
}

/// Result of a single finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The player won the round.
    Win,
    /// The player lost the round.
    Loss,
}

/// Raised when a result string is neither `win` nor `loss`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOutcome;

impl FromStr for Outcome {
    type Err = UnknownOutcome;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "win" => Ok(Outcome::Win),
            "loss" => Ok(Outcome::Loss),
            _ => Err(UnknownOutcome),
        }
    }
}

/// Win/loss counters for one game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameStats {
    /// Rounds won.
    pub wins: u64,
    /// Rounds lost.
    pub losses: u64,
}

impl GameStats {
    /// Bump the counter matching `outcome` by one.
    pub fn record(&mut self, outcome: Outcome) {
        let counter = match outcome {
            Outcome::Win => &mut self.wins,
            Outcome::Loss => &mut self.losses,
        };
        *counter = counter.saturating_add(1);
    }
}

/// Statistics of a single player across every hosted game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Counters keyed by game, always holding every [`GameId`].
    pub games: IndexMap<GameId, GameStats>,
}

impl UserRecord {
    /// Fresh record with every game at zero.
    pub fn new() -> Self {
        Self {
            games: GameId::ALL
                .into_iter()
                .map(|id| (id, GameStats::default()))
                .collect(),
        }
    }

    /// Counters for `game`, if tracked on this record.
    pub fn stats(&self, game: GameId) -> Option<&GameStats> {
        self.games.get(&game)
    }
}

impl Default for UserRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl From<GameStatsEntity> for GameStats {
    fn from(value: GameStatsEntity) -> Self {
        Self {
            wins: value.wins,
            losses: value.losses,
        }
    }
}

impl From<GameStats> for GameStatsEntity {
    fn from(value: GameStats) -> Self {
        Self {
            wins: value.wins,
            losses: value.losses,
        }
    }
}

impl From<UserRecordEntity> for UserRecord {
    /// Normalise a persisted record: unknown games are dropped and missing ones start at zero.
    fn from(entity: UserRecordEntity) -> Self {
        let mut record = UserRecord::new();
        for (key, stats) in entity.games {
            match key.parse::<GameId>() {
                Ok(id) => {
                    record.games.insert(id, stats.into());
                }
                Err(UnknownGame) => warn!(game = %key, "ignoring unknown game in persisted record"),
            }
        }
        record
    }
}

impl From<&UserRecord> for UserRecordEntity {
    fn from(record: &UserRecord) -> Self {
        Self {
            games: record
                .games
                .iter()
                .map(|(id, stats)| (id.as_str().to_string(), (*stats).into()))
                .collect(),
        }
    }
}
