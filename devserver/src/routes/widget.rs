//! Widget script, wasm module and embed snippet.
//!
//! The script endpoint serves the `no-modules` glue with one bootstrap line
//! appended, so a host page needs a single `<script src>` and no module
//! loader. The glue then fetches the wasm from the asset route.

#[cfg(test)]
#[path = "widget_test.rs"]
mod widget_test;

use std::io::ErrorKind;

use axum::extract::{Path, Query, Request, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use detailchatbot_widget::config::WidgetConfig;
use detailchatbot_widget::embed;
use serde::{Deserialize, Serialize};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::state::AppState;

/// wasm-bindgen output names for the `detailchatbot-widget` crate.
pub const GLUE_FILE: &str = "detailchatbot_widget.js";
pub const WASM_FILE: &str = "detailchatbot_widget_bg.wasm";

const WIDGET_PREFIX: &str = "/api/v1/widget";

#[derive(Debug, Deserialize)]
pub struct EmbedQuery {
    shop_id: String,
}

#[derive(Debug, Serialize)]
pub struct EmbedResponse {
    pub embed_script: String,
}

/// `GET /api/v1/widget/widget.js`
pub async fn script(State(state): State<AppState>) -> Response {
    let path = state.pkg_dir().join(GLUE_FILE);
    let glue = match tokio::fs::read_to_string(&path).await {
        Ok(glue) => glue,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "widget glue not found; build the widget first");
            return (StatusCode::NOT_FOUND, "widget script not built").into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, path = %path.display(), "failed to read widget glue");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    (
        [
            (header::CONTENT_TYPE, "application/javascript"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        bootstrap(&glue, &wasm_url(state.public_url())),
    )
        .into_response()
}

/// `GET /api/v1/widget/{file}`: remaining build artifacts (the wasm module).
pub async fn asset(State(state): State<AppState>, Path(file): Path<String>, request: Request) -> Response {
    if !is_plain_file_name(&file) {
        return StatusCode::NOT_FOUND.into_response();
    }
    match ServeFile::new(state.pkg_dir().join(&file)).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

/// `GET /api/v1/widget/embed?shop_id=...`
pub async fn embed(
    State(state): State<AppState>,
    Query(query): Query<EmbedQuery>,
) -> Result<Json<EmbedResponse>, StatusCode> {
    let shop_id = query.shop_id.trim();
    if shop_id.is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let embed_script = embed_snippet(&state, shop_id).map_err(|e| {
        tracing::error!(error = %e, "failed to render embed snippet");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(EmbedResponse { embed_script }))
}

/// Snippet pointing a host page at this server for both script and API.
///
/// # Errors
///
/// Returns the JSON error if the config cannot be serialized.
pub fn embed_snippet(state: &AppState, shop_id: &str) -> Result<String, serde_json::Error> {
    let config = WidgetConfig::defaults(state.is_secure());
    embed::snippet(shop_id, &config, &embed::script_url(state.public_url()), Some(state.public_url()))
}

pub fn wasm_url(public_url: &str) -> String {
    format!("{public_url}{WIDGET_PREFIX}/{WASM_FILE}")
}

/// Glue followed by the call that fetches and instantiates the module.
pub fn bootstrap(glue: &str, wasm_url: &str) -> String {
    let url = serde_json::Value::from(wasm_url);
    format!("{glue}\nwasm_bindgen({{ module_or_path: {url} }});\n")
}

/// A single path segment with no leading dot.
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}
