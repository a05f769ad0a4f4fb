//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mirrors the public surface the widget expects from its backend: the
//! widget script and wasm under `/api/v1/widget/`, and the public chat
//! endpoint. A demo host page at `/` embeds the widget against this server.
//! Everything is permissive-CORS because host pages live on other origins.

pub mod chat;
pub mod demo;
pub mod widget;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(demo::index))
        .route("/healthz", get(healthz))
        .route("/api/v1/widget/widget.js", get(widget::script))
        .route("/api/v1/widget/embed", get(widget::embed))
        .route("/api/v1/widget/{file}", get(widget::asset))
        .route("/api/v1/chat/{shop_id}/public", post(chat::public_chat))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}
