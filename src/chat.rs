//! Send flow: conversation store + transport + view.
//!
//! DESIGN
//! ======
//! `Chat` owns the conversation for one widget instance. `submit` appends
//! the user turn, shows the typing placeholder, awaits the transport, and
//! appends either the reply or the fallback message. Sends are not
//! serialized; overlapping sends interleave their continuations.
//!
//! ERROR HANDLING
//! ==============
//! Transport errors never reach the caller. They are logged and replaced by
//! `FALLBACK_REPLY`, which is stored like any other assistant message and so
//! is part of later context windows.
//!
//! The instance may be torn down while a request is in flight. The `live`
//! flag is checked after the await; a dead instance touches neither the view
//! nor the store.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::WidgetConfig;
use crate::conversation::{ChatMessage, Conversation, FALLBACK_REPLY};
use crate::host::ChatView;
use crate::transport::{ChatTransport, TransportError, chat_endpoint};

/// What happened to one `submit` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing stored or sent.
    Ignored,
    /// The backend replied and the reply was rendered.
    Replied,
    /// The request failed and the fallback message was rendered.
    Failed,
    /// The widget was torn down before the reply arrived.
    Abandoned,
}

pub struct Chat<V, T> {
    config: Rc<WidgetConfig>,
    conversation: RefCell<Conversation>,
    view: Rc<V>,
    transport: T,
    live: Rc<Cell<bool>>,
}

impl<V: ChatView, T: ChatTransport> Chat<V, T> {
    pub fn new(config: Rc<WidgetConfig>, view: Rc<V>, transport: T, live: Rc<Cell<bool>>) -> Self {
        Self { config, conversation: RefCell::new(Conversation::default()), view, transport, live }
    }

    /// Show the configured greeting as the first assistant message. It goes
    /// straight into the store and view, never through the network.
    pub fn greet(&self) {
        self.append(ChatMessage::assistant(self.config.greeting.clone()));
    }

    /// Snapshot of the stored conversation.
    pub fn history(&self) -> Vec<ChatMessage> {
        self.conversation.borrow().messages().to_vec()
    }

    pub fn is_live(&self) -> bool {
        self.live.get()
    }

    /// Send `raw` (trimmed) to the backend and render the answer.
    pub async fn submit(&self, raw: &str) -> SubmitOutcome {
        let text = raw.trim();
        if text.is_empty() {
            return SubmitOutcome::Ignored;
        }
        if !self.is_live() {
            return SubmitOutcome::Abandoned;
        }

        let message = ChatMessage::user(text);
        let request = {
            let mut conversation = self.conversation.borrow_mut();
            let request = conversation.request_for(&message);
            conversation.push(message.clone());
            request
        };
        self.view.clear_input();
        self.view.render_message(&message);
        self.view.show_typing();

        let result = match self.config.shop_id.as_deref() {
            Some(shop_id) if !shop_id.trim().is_empty() => {
                let endpoint = chat_endpoint(&self.config.api_base_url, shop_id);
                self.transport.complete(&endpoint, &request).await
            }
            _ => Err(TransportError::MissingShopId),
        };

        if !self.is_live() {
            log::debug!("chat reply arrived after teardown; dropping it");
            return SubmitOutcome::Abandoned;
        }
        self.view.hide_typing();

        match result {
            Ok(reply) => {
                self.append(ChatMessage::assistant(reply));
                SubmitOutcome::Replied
            }
            Err(e) => {
                log::error!("chat error: {e}");
                self.append(ChatMessage::assistant(FALLBACK_REPLY));
                SubmitOutcome::Failed
            }
        }
    }

    fn append(&self, message: ChatMessage) {
        self.view.render_message(&message);
        self.conversation.borrow_mut().push(message);
    }
}
