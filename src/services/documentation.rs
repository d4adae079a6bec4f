use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI document for the Impossible Games server.
#[openapi(
    info(title = "Impossible Games", description = "Mini-games with per-player win/loss statistics"),
    paths(
        crate::routes::health::healthcheck,
        crate::routes::users::save_user,
        crate::routes::users::check_user,
        crate::routes::users::list_users,
        crate::routes::users::update_result,
        crate::routes::pages::index,
        crate::routes::pages::game_page,
        crate::routes::pages::play,
        crate::routes::pages::play_as_user,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::users::SaveUserRequest,
            crate::dto::users::UpdateResultRequest,
            crate::dto::users::SuccessResponse,
            crate::dto::users::CheckUserResponse,
            crate::dto::users::UsersResponse,
            crate::dto::users::UserStatsDto,
            crate::dto::users::GameStatsDto,
            crate::state::game::GameId,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User registration and game statistics"),
        (name = "pages", description = "HTML pages with user context"),
    )
)]
pub struct ApiDoc;
