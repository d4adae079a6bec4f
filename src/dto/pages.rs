use serde::Deserialize;
use utoipa::IntoParams;

/// Query string accepted by the main page.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IndexQuery {
    /// Name of a previously registered user to greet directly.
    pub user: Option<String>,
}
