use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    dto::validation::{NAME_REQUIRED_MESSAGE, validate_user_name},
    state::{GameId, GameStats, UserRecord},
};

/// Payload registering a player by name.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveUserRequest {
    /// Display name; surrounding whitespace is ignored.
    #[serde(default)]
    pub name: Option<String>,
}

impl SaveUserRequest {
    /// Trimmed name, only meaningful once the request validated.
    pub fn trimmed_name(&self) -> &str {
        self.name.as_deref().map(str::trim).unwrap_or_default()
    }
}

impl Validate for SaveUserRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        match self.name.as_deref() {
            Some(name) => {
                if let Err(e) = validate_user_name(name) {
                    errors.add("name", e);
                }
            }
            None => {
                let mut err = ValidationError::new("name_required");
                err.message = Some(NAME_REQUIRED_MESSAGE.into());
                errors.add("name", err);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Payload reporting the outcome of a finished round.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateResultRequest {
    /// Registered user name.
    #[serde(default)]
    pub user: Option<String>,
    /// Game identifier, e.g. `snake`.
    #[serde(default)]
    pub game: Option<String>,
    /// Either `win` or `loss`.
    #[serde(default)]
    pub result: Option<String>,
}

/// Acknowledgement returned by mutating endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SuccessResponse {
    /// Bare success acknowledgement.
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// Success acknowledgement carrying `message`.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }
}

/// Whether a user name is registered.
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckUserResponse {
    pub exists: bool,
}

/// Win/loss counters of one game.
#[derive(Debug, Clone, Copy, Serialize, ToSchema, PartialEq, Eq)]
pub struct GameStatsDto {
    pub wins: u64,
    pub losses: u64,
}

impl From<GameStats> for GameStatsDto {
    fn from(stats: GameStats) -> Self {
        Self {
            wins: stats.wins,
            losses: stats.losses,
        }
    }
}

/// Statistics of one user across every game.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserStatsDto {
    /// Counters keyed by game identifier.
    #[schema(value_type = Object)]
    pub games: IndexMap<GameId, GameStatsDto>,
}

impl From<UserRecord> for UserStatsDto {
    fn from(record: UserRecord) -> Self {
        Self {
            games: record
                .games
                .into_iter()
                .map(|(id, stats)| (id, stats.into()))
                .collect(),
        }
    }
}

/// Every registered user and their statistics.
#[derive(Debug, Serialize, ToSchema)]
pub struct UsersResponse {
    #[schema(value_type = Object)]
    pub users: IndexMap<String, UserStatsDto>,
}
