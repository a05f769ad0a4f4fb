//! Demo host page.

#[cfg(test)]
#[path = "demo_test.rs"]
mod demo_test;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use detailchatbot_widget::markup::escape_html;

use super::widget::embed_snippet;
use crate::state::AppState;

/// `GET /`: a plain page with the embed snippet pasted in, as a customer would.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    let snippet = embed_snippet(&state, state.shop_id()).map_err(|e| {
        tracing::error!(error = %e, "failed to render embed snippet");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Html(page(state.shop_id(), &snippet)))
}

fn page(shop_id: &str, snippet: &str) -> String {
    let shop_id = escape_html(shop_id);
    format!(
        "<!doctype html>\n\
         <html lang=\"en\">\n\
         <head>\n<meta charset=\"utf-8\">\n<title>Widget demo</title>\n</head>\n\
         <body>\n\
         <h1>Mobile detailing demo</h1>\n\
         <p>Chat widget for shop <code>{shop_id}</code>. Use the launcher in the corner.</p>\n\
         {snippet}\n\
         </body>\n\
         </html>\n"
    )
}
