//! Print the OpenAPI document of the HTTP API, e.g. to commit it next to the front-end.

use anyhow::Context;
use impossible_games_back::services::documentation::ApiDoc;
use utoipa::OpenApi;

fn main() -> anyhow::Result<()> {
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .context("serializing OpenAPI document")?;
    println!("{json}");
    Ok(())
}
