//! Stub of the public chat endpoint.
//!
//! Accepts the same body the widget sends and answers in the same shape the
//! real backend does, echoing the newest user message. No model is called and
//! nothing is stored.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::Json;
use detailchatbot_widget::conversation::ChatRequest;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

/// `POST /api/v1/chat/{shop_id}/public`
pub async fn public_chat(
    Path(shop_id): Path<String>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, StatusCode> {
    let Some(last) = request.messages.iter().rev().find(|m| m.is_user()) else {
        tracing::debug!(%shop_id, messages = request.messages.len(), "chat request without a user turn");
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    };
    tracing::info!(%shop_id, messages = request.messages.len(), "stub chat completion");
    Ok(Json(ChatReply { reply: stub_reply(&shop_id, &last.content) }))
}

pub fn stub_reply(shop_id: &str, text: &str) -> String {
    format!("(dev stub for {shop_id}) You said: {text}")
}
