//! Application-level configuration loading: listening port and on-disk locations.

use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "IMPOSSIBLE_GAMES_CONFIG_PATH";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_USERS_FILE: &str = "names.json";
const DEFAULT_RESULTS_DIR: &str = "results";
const DEFAULT_PUBLIC_DIR: &str = "public";
const GAMES_SUBDIR: &str = "games";

const PORT_ENV: &str = "PORT";
const USERS_FILE_ENV: &str = "IMPOSSIBLE_GAMES_USERS_FILE";
const RESULTS_DIR_ENV: &str = "IMPOSSIBLE_GAMES_RESULTS_DIR";
const PUBLIC_DIR_ENV: &str = "IMPOSSIBLE_GAMES_PUBLIC_DIR";
const GAMES_DIR_ENV: &str = "IMPOSSIBLE_GAMES_GAMES_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// TCP port the HTTP server listens on.
    pub port: u16,
    /// Aggregate JSON file holding every user.
    pub users_file: PathBuf,
    /// Directory receiving one JSON file per user.
    pub results_dir: PathBuf,
    /// Directory holding `index.html` and static assets.
    pub public_dir: PathBuf,
    /// Directory holding the `<game>.html` pages.
    pub games_dir: PathBuf,
}

impl AppConfig {
    /// Resolve the configuration from the optional JSON file and the process environment.
    pub fn load() -> Self {
        let raw = read_config_file(&resolve_config_path()).unwrap_or_default();
        Self::resolve(raw, |key| env::var(key).ok())
    }

    /// Location of the main page template.
    pub fn index_page(&self) -> PathBuf {
        self.public_dir.join("index.html")
    }

    /// Location of the page for `game`. The slug must already be validated.
    pub fn game_page(&self, game: &str) -> PathBuf {
        self.games_dir.join(format!("{game}.html"))
    }

    /// Merge defaults, file values and environment overrides, in increasing priority.
    fn resolve(raw: RawConfig, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match var(PORT_ENV) {
            Some(value) => match value.trim().parse::<u16>() {
                Ok(port) => Some(port),
                Err(err) => {
                    warn!(value = %value, error = %err, "ignoring invalid PORT");
                    None
                }
            },
            None => None,
        }
        .or(raw.port)
        .unwrap_or(DEFAULT_PORT);

        let users_file = var(USERS_FILE_ENV)
            .map(PathBuf::from)
            .or(raw.users_file)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_USERS_FILE));
        let results_dir = var(RESULTS_DIR_ENV)
            .map(PathBuf::from)
            .or(raw.results_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RESULTS_DIR));
        let public_dir = var(PUBLIC_DIR_ENV)
            .map(PathBuf::from)
            .or(raw.public_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PUBLIC_DIR));
        let games_dir = var(GAMES_DIR_ENV)
            .map(PathBuf::from)
            .or(raw.games_dir)
            .unwrap_or_else(|| public_dir.join(GAMES_SUBDIR));

        Self {
            port,
            users_file,
            results_dir,
            public_dir,
            games_dir,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::resolve(RawConfig::default(), |_| None)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    port: Option<u16>,
    users_file: Option<PathBuf>,
    results_dir: Option<PathBuf>,
    public_dir: Option<PathBuf>,
    games_dir: Option<PathBuf>,
}

/// Read the configuration file, logging and discarding it when unusable.
fn read_config_file(path: &Path) -> Option<RawConfig> {
    match fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
            Ok(raw) => {
                info!(path = %path.display(), "loaded configuration file");
                Some(raw)
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to parse config; falling back to defaults"
                );
                None
            }
        },
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!(
                path = %path.display(),
                "config file not found; using built-in defaults"
            );
            None
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "failed to read config; falling back to defaults"
            );
            None
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_legacy_layout() {
        let config = AppConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.users_file, PathBuf::from("names.json"));
        assert_eq!(config.results_dir, PathBuf::from("results"));
        assert_eq!(config.public_dir, PathBuf::from("public"));
        assert_eq!(config.games_dir, PathBuf::from("public/games"));
        assert_eq!(config.game_page("snake"), PathBuf::from("public/games/snake.html"));
    }

    #[test]
    fn environment_overrides_file_values() {
        let raw: RawConfig =
            serde_json::from_str(r#"{"port": 8000, "results_dir": "data/results"}"#).unwrap();
        let config = AppConfig::resolve(raw, env_of(&[("PORT", "4000")]));
        assert_eq!(config.port, 4000);
        assert_eq!(config.results_dir, PathBuf::from("data/results"));
    }

    #[test]
    fn invalid_port_falls_back() {
        let config = AppConfig::resolve(RawConfig::default(), env_of(&[("PORT", "http")]));
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn games_dir_follows_public_dir() {
        let config = AppConfig::resolve(
            RawConfig::default(),
            env_of(&[("IMPOSSIBLE_GAMES_PUBLIC_DIR", "/srv/arcade")]),
        );
        assert_eq!(config.index_page(), PathBuf::from("/srv/arcade/index.html"));
        assert_eq!(config.games_dir, PathBuf::from("/srv/arcade/games"));
    }

    #[test]
    fn unknown_config_keys_are_rejected() {
        assert!(serde_json::from_str::<RawConfig>(r#"{"colors": []}"#).is_err());
    }
}
