//! services/api/src/bin/openapi.rs
//!
//! Writes the OpenAPI document of the emotion assessment API.
//!
//! Usage: `openapi [OUTPUT]`. The path falls back to `OPENAPI_OUTPUT`, then to
//! `openapi.json`.

use api_lib::web::rest::ApiDoc;
use utoipa::OpenApi;

const DEFAULT_OUTPUT: &str = "openapi.json";

/// First CLI argument, else the env override, else the default.
fn output_path(arg: Option<String>, env_override: Option<String>) -> String {
    arg.or(env_override)
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string())
}

/// Generates the OpenAPI document and writes it to `path`.
fn generate_spec(
    api_doc: utoipa::openapi::OpenApi,
    path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let spec_json = api_doc.to_pretty_json()?;
    std::fs::write(path, spec_json)?;
    println!(
        "OpenAPI document with {} paths generated at {}",
        api_doc.paths.paths.len(),
        path
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = output_path(
        std::env::args().nth(1),
        std::env::var("OPENAPI_OUTPUT").ok(),
    );
    generate_spec(ApiDoc::openapi(), &path)?;
    Ok(())
}
