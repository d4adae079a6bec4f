use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report whether the latest flush reached the snapshot store.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let users = state.user_count().await;

    if state.persistence_healthy() {
        HealthResponse::ok(users)
    } else {
        warn!("latest flush failed; reporting degraded health");
        HealthResponse::degraded(users)
    }
}
