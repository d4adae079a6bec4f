use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: String,
    /// Number of registered users.
    pub users: usize,
}

impl HealthResponse {
    /// Create a health response indicating the latest flush succeeded.
    pub fn ok(users: usize) -> Self {
        Self {
            status: "ok".to_string(),
            users,
        }
    }

    /// Create a health response indicating the latest flush failed.
    pub fn degraded(users: usize) -> Self {
        Self {
            status: "degraded".to_string(),
            users,
        }
    }
}
