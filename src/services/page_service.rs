//! Reads HTML pages from disk and applies the user templating.

use std::{io::ErrorKind, path::Path};

use tokio::fs;

use crate::{
    dto::validation::is_game_slug,
    error::ServiceError,
    services::templating::{inject_body_user, mark_user_known},
    state::SharedState,
};

const GAME_NOT_FOUND: &str = "Game not found";

/// Render the main page, skipping name entry when `user` is already registered.
pub async fn render_index(
    state: &SharedState,
    user: Option<String>,
) -> Result<String, ServiceError> {
    let path = state.config().index_page();
    let html = fs::read_to_string(&path).await.map_err(|err| {
        ServiceError::Internal(format!("failed to read `{}`: {err}", path.display()))
    })?;

    if let Some(name) = user {
        if state.user_exists(&name).await {
            return Ok(mark_user_known(&html, &name));
        }
    }
    Ok(html)
}

/// Serve the page of `game` untouched.
pub async fn game_page(state: &SharedState, game: &str) -> Result<String, ServiceError> {
    read_game_page(state, game).await
}

/// Serve the page of `game`, tagging its body with `user` when given.
pub async fn play_page(
    state: &SharedState,
    game: &str,
    user: Option<&str>,
) -> Result<String, ServiceError> {
    let html = read_game_page(state, game).await?;
    Ok(match user {
        Some(user) => inject_body_user(&html, user),
        None => html,
    })
}

async fn read_game_page(state: &SharedState, game: &str) -> Result<String, ServiceError> {
    if !is_game_slug(game) {
        return Err(ServiceError::NotFound(GAME_NOT_FOUND.into()));
    }
    read_page(&state.config().game_page(game)).await
}

async fn read_page(path: &Path) -> Result<String, ServiceError> {
    match fs::read_to_string(path).await {
        Ok(html) => Ok(html),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            Err(ServiceError::NotFound(GAME_NOT_FOUND.into()))
        }
        Err(err) => Err(ServiceError::Internal(format!(
            "failed to read `{}`: {err}",
            path.display()
        ))),
    }
}
