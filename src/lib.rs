//! # detailchatbot-widget
//!
//! Embeddable AI chat widget for service-business websites, compiled to
//! WebAssembly and pasted into arbitrary third-party pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host page declares `window.ChatbotAiConfig` and loads the widget
//! script. The widget resolves its configuration, injects one stylesheet,
//! mounts a launcher + chat panel under `document.body`, and talks to exactly
//! one backend endpoint (`POST {apiUrl}/api/v1/chat/{shopId}/public`).
//! Host pages tear it down through `window.DetailChatbotWidget.destroy()`.
//!
//! DESIGN
//! ======
//! Everything except the `browser` module is plain Rust that compiles and is
//! tested natively: configuration, markup, styles, the controller state
//! machine, the conversation store and the send flow. The `browser` module
//! (feature `browser`) binds those pieces to `web-sys` and `gloo-net`.

pub mod chat;
pub mod color;
pub mod config;
pub mod controller;
pub mod conversation;
pub mod embed;
pub mod host;
pub mod markup;
pub mod styles;
pub mod transport;
pub mod widget;

#[cfg(feature = "browser")]
pub mod browser;

#[cfg(test)]
mod test_support;
