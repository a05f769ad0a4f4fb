//! Chat completion transport.
//!
//! Client-side (browser): a real `POST` via `gloo-net`.
//! Native builds: `HttpTransport` reports `Unavailable`; tests substitute
//! their own `ChatTransport`.
//!
//! ERROR HANDLING
//! ==============
//! Every failure mode (no shop id, request error, non-2xx status, unusable
//! body) is a `TransportError`. The chat flow collapses all of them into one
//! user-visible fallback reply and logs the detail for the developer.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use async_trait::async_trait;
use serde_json::Value;

use crate::conversation::ChatRequest;

/// Errors produced while requesting a chat completion.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The widget config has no `shopId`, so there is no endpoint to call.
    #[error("shop id is not configured")]
    MissingShopId,

    /// The request could not be built or sent.
    #[error("chat request failed: {0}")]
    Request(String),

    /// The endpoint answered with a non-success status.
    #[error("chat endpoint returned HTTP {0}")]
    Status(u16),

    /// The response body was not valid JSON.
    #[error("chat response decode failed: {0}")]
    Decode(String),

    /// The response JSON had no usable `reply` string.
    #[error("chat response has no usable `reply`")]
    MissingReply,

    /// HTTP is only wired up in the browser build.
    #[error("http transport is not available in this build")]
    Unavailable,
}

/// Public chat completion URL for a shop.
pub fn chat_endpoint(api_base_url: &str, shop_id: &str) -> String {
    format!("{}/api/v1/chat/{shop_id}/public", api_base_url.trim_end_matches('/'))
}

/// Extract the assistant reply from a response body.
///
/// # Errors
///
/// Returns `Decode` for invalid JSON and `MissingReply` when `reply` is
/// absent, not a string, or blank.
pub fn decode_reply(body: &str) -> Result<String, TransportError> {
    let value: Value = serde_json::from_str(body).map_err(|e| TransportError::Decode(e.to_string()))?;
    match value.get("reply") {
        Some(Value::String(reply)) if !reply.trim().is_empty() => Ok(reply.clone()),
        _ => Err(TransportError::MissingReply),
    }
}

/// Seam between the chat flow and the network.
#[async_trait(?Send)]
pub trait ChatTransport {
    /// Send `request` to `endpoint` and return the assistant reply text.
    async fn complete(&self, endpoint: &str, request: &ChatRequest) -> Result<String, TransportError>;
}

/// Unauthenticated JSON `POST` to the public chat endpoint.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpTransport;

#[async_trait(?Send)]
impl ChatTransport for HttpTransport {
    async fn complete(&self, endpoint: &str, request: &ChatRequest) -> Result<String, TransportError> {
        #[cfg(feature = "browser")]
        {
            let resp = gloo_net::http::Request::post(endpoint)
                .json(request)
                .map_err(|e| TransportError::Request(e.to_string()))?
                .send()
                .await
                .map_err(|e| TransportError::Request(e.to_string()))?;
            if !resp.ok() {
                return Err(TransportError::Status(resp.status()));
            }
            let body = resp.text().await.map_err(|e| TransportError::Decode(e.to_string()))?;
            decode_reply(&body)
        }
        #[cfg(not(feature = "browser"))]
        {
            let _ = (endpoint, request);
            Err(TransportError::Unavailable)
        }
    }
}
