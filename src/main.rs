//! Impossible Games binary entrypoint wiring configuration, persistence and the HTTP layer.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use impossible_games_back::{
    config::AppConfig,
    dao::snapshot_store::json_files::JsonFileStore,
    error::handle_panic,
    routes,
    state::{AppState, GameId, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let port = config.port;
    let store = JsonFileStore::new(&config.users_file, &config.results_dir);
    let app_state = AppState::load(config, Arc::new(store)).await;

    // Build the HTTP router once the shared state is ready.
    let app = build_router(app_state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await.context("binding server")?;
    log_banner(&app_state, port).await;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    info!("shutting down Impossible Games server");
    app_state.flush_all().await;

    Ok(())
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Log where the server listens, what it hosts and how to get started.
async fn log_banner(state: &SharedState, port: u16) {
    let names = state.user_names().await;
    let games = GameId::ALL
        .iter()
        .map(|game| game.title())
        .collect::<Vec<_>>()
        .join(", ");

    info!(url = %format!("http://localhost:{port}"), "Impossible Games server running");
    info!(users = names.len(), "total registered users");
    info!(%games, "available games");
    match names.first() {
        Some(name) => info!("try: http://localhost:{port}/?user={name}"),
        None => info!("visit: http://localhost:{port} to start playing"),
    }
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
