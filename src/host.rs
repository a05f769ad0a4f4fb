//! Host page abstraction.
//!
//! SYSTEM CONTEXT
//! ==============
//! The widget runs inside a document it does not own. Everything it does to
//! that document goes through these two traits: `ChatView` for the message
//! list and input, `HostPage` for mounting, styles and teardown. The browser
//! build implements both over `web-sys`; tests implement them in memory.

#[cfg(test)]
#[path = "host_test.rs"]
mod host_test;

use crate::controller::Effect;
use crate::conversation::ChatMessage;
use crate::markup::Element;

/// DOM-level failures while mounting.
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    /// No `window`/`document`/`body` to mount into.
    #[error("no document available")]
    NoDocument,

    /// A DOM call threw.
    #[error("dom operation failed: {0}")]
    Dom(String),

    /// A widget root is already present in the document.
    #[error("widget is already mounted")]
    AlreadyMounted,
}

/// Message list and input operations used by the send flow.
pub trait ChatView {
    /// Append a message bubble and scroll it into view.
    fn render_message(&self, message: &ChatMessage);

    /// Append the transient typing placeholder.
    fn show_typing(&self);

    /// Remove one typing placeholder, if any is shown.
    fn hide_typing(&self);

    /// Empty the input field and disable the send control.
    fn clear_input(&self);
}

/// Document-level operations used by the widget lifecycle.
pub trait HostPage: ChatView {
    /// Whether an element with `id` is currently in the document.
    fn contains(&self, id: &str) -> bool;

    /// Append a `<style id=...>` to the document head.
    ///
    /// # Errors
    ///
    /// Returns `WidgetError` if the document has no head or the DOM call throws.
    fn inject_stylesheet(&self, id: &str, css: &str) -> Result<(), WidgetError>;

    /// Materialize `root` and append it to the document body.
    ///
    /// # Errors
    ///
    /// Returns `WidgetError` if the document has no body or any node fails to build.
    fn mount(&self, root: &Element) -> Result<(), WidgetError>;

    /// Detach the element with `id`, if present.
    fn remove(&self, id: &str);

    /// Apply a controller effect to the mounted widget. `Submit` and
    /// `PreventDefault` are handled by the caller and ignored here.
    fn apply(&self, effect: &Effect);
}

/// Whether a `document.readyState` value means parsing is still under way,
/// so mounting has to wait for `DOMContentLoaded`.
pub fn is_document_loading(ready_state: &str) -> bool {
    ready_state == "loading"
}
