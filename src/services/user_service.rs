//! User registration and statistics operations backing the `/api` routes.

use crate::{
    dto::users::{CheckUserResponse, SaveUserRequest, UpdateResultRequest, UsersResponse},
    error::ServiceError,
    state::SharedState,
};

/// Register the (already validated) user named in `request`.
///
/// Registering an existing name is a no-op; the caller reports success either way.
pub async fn save_user(state: &SharedState, request: SaveUserRequest) -> bool {
    state.create_user(request.trimmed_name()).await
}

/// Report whether `name` is registered, matching it exactly.
pub async fn check_user(state: &SharedState, name: &str) -> CheckUserResponse {
    CheckUserResponse {
        exists: state.user_exists(name).await,
    }
}

/// Every user with their statistics.
pub async fn list_users(state: &SharedState) -> UsersResponse {
    let users = state
        .users_snapshot()
        .await
        .into_iter()
        .map(|(name, record)| (name, record.into()))
        .collect();
    UsersResponse { users }
}

/// Count one win or loss for the user and game named in `request`.
pub async fn update_result(
    state: &SharedState,
    request: UpdateResultRequest,
) -> Result<(), ServiceError> {
    let user = request.user.unwrap_or_default();
    let game = request.game.unwrap_or_default();
    let result = request.result.unwrap_or_default();

    state.record_result(&user, &game, &result).await?;
    Ok(())
}
