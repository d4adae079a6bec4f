/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// HTML page loading and rendering.
pub mod page_service;
/// String substitutions injecting user names into pages.
pub mod templating;
/// User registration and statistics.
pub mod user_service;
