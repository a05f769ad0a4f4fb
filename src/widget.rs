//! Widget instance and lifecycle.
//!
//! DESIGN
//! ======
//! `Widget` is the explicit instance handle: `mount` builds one on a
//! `HostPage`, `destroy` tears it down. `Lifecycle` is the slot that enforces
//! "at most one live instance"; the browser build keeps a single slot in a
//! `thread_local!`, tests create as many as they like.
//!
//! TRADE-OFFS
//! ==========
//! `destroy` removes the stylesheet by id even when an earlier mount injected
//! it, because the stylesheet is shared by whichever instance is live.

#[cfg(test)]
#[path = "widget_test.rs"]
mod widget_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::chat::Chat;
use crate::config::WidgetConfig;
use crate::controller::{Controller, Effect, UiEvent};
use crate::host::{HostPage, WidgetError};
use crate::markup::{self, ROOT_ID};
use crate::styles::{self, STYLE_ID};
use crate::transport::ChatTransport;

/// What the event source has to do after a dispatch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// Suppress the browser's default action for the event.
    pub prevent_default: bool,
    /// Text to hand to `Chat::submit`.
    pub submit: Option<String>,
}

pub struct Widget<P, T> {
    page: Rc<P>,
    chat: Rc<Chat<P, T>>,
    controller: RefCell<Controller>,
    live: Rc<Cell<bool>>,
}

impl<P: HostPage, T: ChatTransport> Widget<P, T> {
    /// Inject styles (once per page), build the DOM and render the greeting.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyMounted` if a widget root is already in the document,
    /// or the page's error if styles or DOM could not be attached. On error
    /// nothing this call added is left behind.
    pub fn mount(page: Rc<P>, config: WidgetConfig, transport: T) -> Result<Self, WidgetError> {
        if page.contains(ROOT_ID) {
            return Err(WidgetError::AlreadyMounted);
        }
        for warning in config.warnings() {
            log::warn!("{warning}");
        }

        let injected_styles = !page.contains(STYLE_ID);
        if injected_styles {
            page.inject_stylesheet(STYLE_ID, &styles::stylesheet(&config))?;
        }
        if let Err(e) = page.mount(&markup::widget_root(&config)) {
            page.remove(ROOT_ID);
            if injected_styles {
                page.remove(STYLE_ID);
            }
            return Err(e);
        }

        let live = Rc::new(Cell::new(true));
        let chat = Rc::new(Chat::new(Rc::new(config), Rc::clone(&page), transport, Rc::clone(&live)));
        chat.greet();

        Ok(Self { page, chat, controller: RefCell::new(Controller::default()), live })
    }

    pub fn chat(&self) -> &Rc<Chat<P, T>> {
        &self.chat
    }

    pub fn page(&self) -> &Rc<P> {
        &self.page
    }

    pub fn is_live(&self) -> bool {
        self.live.get()
    }

    pub fn is_open(&self) -> bool {
        self.controller.borrow().is_open()
    }

    /// Run `event` through the controller and apply its DOM effects.
    pub fn dispatch(&self, event: UiEvent) -> Dispatch {
        let mut dispatch = Dispatch::default();
        if !self.is_live() {
            return dispatch;
        }
        let effects = self.controller.borrow_mut().handle(event);
        for effect in effects {
            match effect {
                Effect::PreventDefault => dispatch.prevent_default = true,
                Effect::Submit(text) => dispatch.submit = Some(text),
                other => self.page.apply(&other),
            }
        }
        dispatch
    }

    /// Detach the widget and its stylesheet. In-flight sends see the instance
    /// as dead and drop their replies. Calling it twice is harmless.
    pub fn destroy(&self) {
        if !self.live.replace(false) {
            return;
        }
        self.page.remove(ROOT_ID);
        self.page.remove(STYLE_ID);
    }
}

// =============================================================================
// LIFECYCLE
// =============================================================================

/// Slot holding the page's single live instance.
pub struct Lifecycle<W> {
    active: RefCell<Option<W>>,
}

impl<W> Default for Lifecycle<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> Lifecycle<W> {
    pub const fn new() -> Self {
        Self { active: RefCell::new(None) }
    }

    pub fn is_active(&self) -> bool {
        self.active.borrow().is_some()
    }

    /// Build and install an instance unless one is already live.
    ///
    /// Returns `Ok(false)` without calling `build` when an instance exists.
    ///
    /// # Errors
    ///
    /// Propagates the error from `build`; the slot stays empty.
    pub fn init(&self, build: impl FnOnce() -> Result<W, WidgetError>) -> Result<bool, WidgetError> {
        if self.is_active() {
            return Ok(false);
        }
        let instance = build()?;
        *self.active.borrow_mut() = Some(instance);
        Ok(true)
    }

    /// Remove the live instance and hand it to `destroy`. Returns `false`
    /// (and does nothing) when the slot is empty.
    pub fn teardown(&self, destroy: impl FnOnce(W)) -> bool {
        let taken = self.active.borrow_mut().take();
        match taken {
            Some(instance) => {
                destroy(instance);
                true
            }
            None => false,
        }
    }
}
