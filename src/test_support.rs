//! In-memory host page and scripted transport shared by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;

use crate::controller::Effect;
use crate::conversation::{ChatMessage, ChatRequest};
use crate::host::{ChatView, HostPage, WidgetError};
use crate::markup::Element;
use crate::transport::{ChatTransport, TransportError};

// =========================================================================
// MemoryPage
// =========================================================================

/// Document stand-in: tracks elements by id plus the widget's visible state.
#[derive(Default)]
pub struct MemoryPage {
    elements: RefCell<BTreeMap<String, String>>,
    root: RefCell<Option<Element>>,
    rendered: RefCell<Vec<ChatMessage>>,
    typing: Cell<usize>,
    input_clears: Cell<usize>,
    open: Cell<bool>,
    dot_hidden: Cell<bool>,
    send_enabled: Cell<bool>,
    focus_delays: RefCell<Vec<u32>>,
    style_injections: Cell<usize>,
    mutations: Cell<usize>,
    fail_mount: Cell<bool>,
}

impl MemoryPage {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// A page whose `mount` always fails.
    pub fn broken() -> Rc<Self> {
        let page = Self::default();
        page.fail_mount.set(true);
        Rc::new(page)
    }

    /// Pretend some other script already added an element with `id`.
    pub fn preload(&self, id: &str, content: &str) {
        self.elements.borrow_mut().insert(id.to_owned(), content.to_owned());
    }

    pub fn element(&self, id: &str) -> Option<String> {
        self.elements.borrow().get(id).cloned()
    }

    pub fn root(&self) -> Option<Element> {
        self.root.borrow().clone()
    }

    pub fn rendered(&self) -> Vec<ChatMessage> {
        self.rendered.borrow().clone()
    }

    pub fn typing_count(&self) -> usize {
        self.typing.get()
    }

    pub fn input_clears(&self) -> usize {
        self.input_clears.get()
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn dot_hidden(&self) -> bool {
        self.dot_hidden.get()
    }

    pub fn send_enabled(&self) -> bool {
        self.send_enabled.get()
    }

    pub fn focus_delays(&self) -> Vec<u32> {
        self.focus_delays.borrow().clone()
    }

    pub fn style_injections(&self) -> usize {
        self.style_injections.get()
    }

    /// Number of document-level changes (inserts and removals).
    pub fn mutations(&self) -> usize {
        self.mutations.get()
    }

    fn touch(&self) {
        self.mutations.set(self.mutations.get() + 1);
    }
}

impl ChatView for MemoryPage {
    fn render_message(&self, message: &ChatMessage) {
        self.rendered.borrow_mut().push(message.clone());
    }

    fn show_typing(&self) {
        self.typing.set(self.typing.get() + 1);
    }

    fn hide_typing(&self) {
        self.typing.set(self.typing.get().saturating_sub(1));
    }

    fn clear_input(&self) {
        self.input_clears.set(self.input_clears.get() + 1);
        self.send_enabled.set(false);
    }
}

impl HostPage for MemoryPage {
    fn contains(&self, id: &str) -> bool {
        self.elements.borrow().contains_key(id)
    }

    fn inject_stylesheet(&self, id: &str, css: &str) -> Result<(), WidgetError> {
        self.elements.borrow_mut().insert(id.to_owned(), css.to_owned());
        self.style_injections.set(self.style_injections.get() + 1);
        self.touch();
        Ok(())
    }

    fn mount(&self, root: &Element) -> Result<(), WidgetError> {
        if self.fail_mount.get() {
            return Err(WidgetError::Dom("appendChild threw".into()));
        }
        let id = root.get_attr("id").unwrap_or_default().to_owned();
        self.elements.borrow_mut().insert(id, root.to_html());
        *self.root.borrow_mut() = Some(root.clone());
        self.touch();
        Ok(())
    }

    fn remove(&self, id: &str) {
        if self.elements.borrow_mut().remove(id).is_some() {
            self.touch();
        }
        if self.root.borrow().as_ref().and_then(|r| r.get_attr("id")) == Some(id) {
            *self.root.borrow_mut() = None;
        }
    }

    fn apply(&self, effect: &Effect) {
        match effect {
            Effect::OpenPanel => self.open.set(true),
            Effect::ClosePanel => self.open.set(false),
            Effect::HideUnreadDot => self.dot_hidden.set(true),
            Effect::FocusInput { delay_ms } => self.focus_delays.borrow_mut().push(*delay_ms),
            Effect::SetSendEnabled(enabled) => self.send_enabled.set(*enabled),
            Effect::PreventDefault | Effect::Submit(_) => {}
        }
    }
}

// =========================================================================
// ScriptedTransport
// =========================================================================

pub type SentRequests = Rc<RefCell<Vec<(String, ChatRequest)>>>;

/// Transport that answers from a queue and records what it was sent.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<String, TransportError>>>,
    sent: SentRequests,
    on_send: Option<Box<dyn Fn()>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Result<String, TransportError>>) -> Self {
        Self { replies: RefCell::new(replies.into()), ..Self::default() }
    }

    pub fn replying(replies: &[&str]) -> Self {
        Self::new(replies.iter().map(|r| Ok((*r).to_owned())).collect())
    }

    /// Run `hook` while a request is "in flight".
    #[must_use]
    pub fn on_send(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_send = Some(Box::new(hook));
        self
    }

    /// Shared handle to the recorded requests; stays valid after the
    /// transport is moved into a widget.
    pub fn sent(&self) -> SentRequests {
        Rc::clone(&self.sent)
    }
}

#[async_trait(?Send)]
impl ChatTransport for ScriptedTransport {
    async fn complete(&self, endpoint: &str, request: &ChatRequest) -> Result<String, TransportError> {
        self.sent.borrow_mut().push((endpoint.to_owned(), request.clone()));
        if let Some(hook) = &self.on_send {
            hook();
        }
        self.replies.borrow_mut().pop_front().unwrap_or_else(|| Ok("ok".to_owned()))
    }
}
