//! HTTP routing for the API, the pages and the static assets.

use axum::{
    Router,
    handler::HandlerWithoutStateExt,
    http::StatusCode,
    response::IntoResponse,
};
use tower_http::services::ServeDir;

use crate::{error::PAGE_NOT_FOUND_MESSAGE, state::SharedState};

pub mod docs;
pub mod health;
pub mod pages;
pub mod users;

/// Compose all route trees, falling back to static assets and then to a 404 page.
pub fn router(state: SharedState) -> Router<()> {
    let static_files = ServeDir::new(&state.config().public_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(page_not_found.into_service());

    health::router()
        .merge(users::router())
        .merge(pages::router())
        .merge(docs::router())
        .method_not_allowed_fallback(page_not_found)
        .fallback_service(static_files)
        .with_state(state)
}

async fn page_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, PAGE_NOT_FOUND_MESSAGE)
}
