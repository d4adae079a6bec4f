//! User registration and statistics API.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::{get, post},
};
use validator::Validate;

use crate::{
    dto::users::{
        CheckUserResponse, SaveUserRequest, SuccessResponse, UpdateResultRequest, UsersResponse,
    },
    error::AppError,
    services::user_service,
    state::SharedState,
};

/// JSON endpoints registering users and recording their results.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/save-user", post(save_user))
        .route("/api/check-user/{name}", get(check_user))
        .route("/api/users", get(list_users))
        .route("/api/update-result", post(update_result))
}

/// Register a user by name; registering an existing name succeeds without changes.
#[utoipa::path(
    post,
    path = "/api/save-user",
    tag = "users",
    request_body = SaveUserRequest,
    responses(
        (status = 200, description = "User registered or already known", body = SuccessResponse),
        (status = 400, description = "Missing, blank or unsupported name")
    )
)]
pub async fn save_user(
    State(state): State<SharedState>,
    payload: Result<Json<SaveUserRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let Json(request) = payload?;
    request.validate()?;
    user_service::save_user(&state, request).await;
    Ok(Json(SuccessResponse::with_message("User saved successfully")))
}

/// Check whether a user name is registered (exact match).
#[utoipa::path(
    get,
    path = "/api/check-user/{name}",
    tag = "users",
    params(("name" = String, Path, description = "User name to look up")),
    responses((status = 200, description = "Lookup result", body = CheckUserResponse))
)]
pub async fn check_user(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Json<CheckUserResponse> {
    Json(user_service::check_user(&state, &name).await)
}

/// List every user with their per-game statistics.
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses((status = 200, description = "All users", body = UsersResponse))
)]
pub async fn list_users(State(state): State<SharedState>) -> Json<UsersResponse> {
    Json(user_service::list_users(&state).await)
}

/// Record a win or loss for a registered user.
#[utoipa::path(
    post,
    path = "/api/update-result",
    tag = "users",
    request_body = UpdateResultRequest,
    responses(
        (status = 200, description = "Result recorded", body = SuccessResponse),
        (status = 400, description = "User not found, Game not found or Invalid result")
    )
)]
pub async fn update_result(
    State(state): State<SharedState>,
    payload: Result<Json<UpdateResultRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let Json(request) = payload?;
    user_service::update_result(&state, request).await?;
    Ok(Json(SuccessResponse::ok()))
}
