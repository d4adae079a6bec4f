//! HTML page routes.

use axum::{
    Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    response::Html,
    routing::get,
};
use tracing::debug;

use crate::{
    dto::pages::IndexQuery, error::AppError, services::page_service, state::SharedState,
};

/// HTML pages: the main menu and the individual games.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(index))
        .route("/games/{game}", get(game_page))
        .route("/play/{game}", get(play))
        .route("/play/{game}/", get(play))
        .route("/play/{game}/{user}", get(play_as_user))
}

/// Serve the main page, greeting `user` directly when already registered.
#[utoipa::path(
    get,
    path = "/",
    tag = "pages",
    params(IndexQuery),
    responses((status = 200, description = "Main page", body = String, content_type = "text/html"))
)]
pub async fn index(
    State(state): State<SharedState>,
    query: Result<Query<IndexQuery>, QueryRejection>,
) -> Result<Html<String>, AppError> {
    let user = match query {
        Ok(Query(query)) => query.user,
        Err(rejection) => {
            debug!(error = %rejection.body_text(), "ignoring unreadable index query");
            None
        }
    };
    let html = page_service::render_index(&state, user).await?;
    Ok(Html(html))
}

/// Serve a game page as-is.
#[utoipa::path(
    get,
    path = "/games/{game}",
    tag = "pages",
    params(("game" = String, Path, description = "Game page name without extension")),
    responses(
        (status = 200, description = "Game page", body = String, content_type = "text/html"),
        (status = 404, description = "Game not found")
    )
)]
pub async fn game_page(
    State(state): State<SharedState>,
    Path(game): Path<String>,
) -> Result<Html<String>, AppError> {
    Ok(Html(page_service::game_page(&state, &game).await?))
}

/// Serve a game page without user context.
#[utoipa::path(
    get,
    path = "/play/{game}",
    tag = "pages",
    params(("game" = String, Path, description = "Game page name without extension")),
    responses(
        (status = 200, description = "Game page", body = String, content_type = "text/html"),
        (status = 404, description = "Game not found")
    )
)]
pub async fn play(
    State(state): State<SharedState>,
    Path(game): Path<String>,
) -> Result<Html<String>, AppError> {
    Ok(Html(page_service::play_page(&state, &game, None).await?))
}

/// Serve a game page with the player exposed as `data-user` on its body.
#[utoipa::path(
    get,
    path = "/play/{game}/{user}",
    tag = "pages",
    params(
        ("game" = String, Path, description = "Game page name without extension"),
        ("user" = String, Path, description = "Player name injected into the page")
    ),
    responses(
        (status = 200, description = "Game page tagged with the player", body = String, content_type = "text/html"),
        (status = 404, description = "Game not found")
    )
)]
pub async fn play_as_user(
    State(state): State<SharedState>,
    Path((game, user)): Path<(String, String)>,
) -> Result<Html<String>, AppError> {
    Ok(Html(
        page_service::play_page(&state, &game, Some(&user)).await?,
    ))
}
