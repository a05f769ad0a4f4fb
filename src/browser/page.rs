//! `HostPage` over the real document.
//!
//! Markup trees are materialized node by node; message text always becomes a
//! DOM text node. Handles to the interactive parts are looked up once after
//! mount and dropped on removal.

use std::cell::RefCell;

use gloo_timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlButtonElement, HtmlElement, HtmlInputElement};

use crate::controller::Effect;
use crate::conversation::ChatMessage;
use crate::host::{ChatView, HostPage, WidgetError};
use crate::markup::{self, Element, Node, ROOT_ID, class};

fn dom_err(e: JsValue) -> WidgetError {
    WidgetError::Dom(format!("{e:?}"))
}

fn materialize(document: &Document, el: &Element) -> Result<web_sys::Element, WidgetError> {
    let node = match el.namespace.uri() {
        Some(ns) => document.create_element_ns(Some(ns), el.tag),
        None => document.create_element(el.tag),
    }
    .map_err(dom_err)?;
    for (name, value) in &el.attrs {
        node.set_attribute(name, value).map_err(dom_err)?;
    }
    for child in &el.children {
        match child {
            Node::Element(child) => {
                let child = materialize(document, child)?;
                node.append_child(&child).map_err(dom_err)?;
            }
            Node::Text(text) => {
                node.append_child(&document.create_text_node(text)).map_err(dom_err)?;
            }
        }
    }
    Ok(node)
}

fn find(root: &web_sys::Element, class_name: &str) -> Result<web_sys::Element, WidgetError> {
    root.query_selector(&format!(".{class_name}"))
        .map_err(dom_err)?
        .ok_or_else(|| WidgetError::Dom(format!("missing .{class_name}")))
}

fn cast<T: JsCast>(el: web_sys::Element, class_name: &str) -> Result<T, WidgetError> {
    el.dyn_into::<T>().map_err(|_| WidgetError::Dom(format!(".{class_name} has unexpected type")))
}

/// Handles into the mounted widget.
struct Parts {
    root: web_sys::Element,
    panel: web_sys::Element,
    dot: HtmlElement,
    scroller: web_sys::Element,
    messages: web_sys::Element,
    input: HtmlInputElement,
    send: HtmlButtonElement,
}

impl Parts {
    fn locate(root: web_sys::Element) -> Result<Self, WidgetError> {
        Ok(Self {
            panel: find(&root, class::PANEL)?,
            dot: cast(find(&root, class::UNREAD_DOT)?, class::UNREAD_DOT)?,
            scroller: find(&root, class::SCROLLER)?,
            messages: find(&root, class::MESSAGES)?,
            input: cast(find(&root, class::INPUT)?, class::INPUT)?,
            send: cast(find(&root, class::SEND)?, class::SEND)?,
            root,
        })
    }
}

pub struct BrowserPage {
    document: Document,
    parts: RefCell<Option<Parts>>,
}

impl BrowserPage {
    pub fn new(document: Document) -> Self {
        Self { document, parts: RefCell::new(None) }
    }

    /// The page this script is running in.
    ///
    /// # Errors
    ///
    /// Returns `NoDocument` outside a window context (e.g. a worker).
    pub fn current() -> Result<Self, WidgetError> {
        web_sys::window().and_then(|w| w.document()).map(Self::new).ok_or(WidgetError::NoDocument)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Element with `class_name` inside the mounted widget.
    pub fn part(&self, class_name: &str) -> Option<web_sys::Element> {
        let parts = self.parts.borrow();
        let root = &parts.as_ref()?.root;
        find(root, class_name).ok()
    }

    /// Current text of the message input.
    pub fn input_value(&self) -> String {
        self.parts.borrow().as_ref().map(|p| p.input.value()).unwrap_or_default()
    }

    fn append_to_messages(&self, tree: &Element) {
        let parts = self.parts.borrow();
        let Some(parts) = parts.as_ref() else {
            return;
        };
        let appended = materialize(&self.document, tree).and_then(|node| {
            parts.messages.append_child(&node).map_err(dom_err)
        });
        if let Err(e) = appended {
            log::warn!("could not render message: {e}");
            return;
        }
        parts.scroller.set_scroll_top(parts.scroller.scroll_height());
    }
}

fn local_clock() -> String {
    let now = js_sys::Date::new_0();
    markup::clock_label(now.get_hours(), now.get_minutes())
}

impl ChatView for BrowserPage {
    fn render_message(&self, message: &ChatMessage) {
        self.append_to_messages(&markup::message_bubble(message, &local_clock()));
    }

    fn show_typing(&self) {
        self.append_to_messages(&markup::typing_indicator());
    }

    fn hide_typing(&self) {
        let parts = self.parts.borrow();
        let Some(parts) = parts.as_ref() else {
            return;
        };
        if let Ok(Some(typing)) = parts.messages.query_selector(&format!(".{}", class::TYPING)) {
            typing.remove();
        }
    }

    fn clear_input(&self) {
        if let Some(parts) = self.parts.borrow().as_ref() {
            parts.input.set_value("");
            parts.send.set_disabled(true);
        }
    }
}

impl HostPage for BrowserPage {
    fn contains(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn inject_stylesheet(&self, id: &str, css: &str) -> Result<(), WidgetError> {
        let head = self.document.head().ok_or(WidgetError::NoDocument)?;
        let style = self.document.create_element("style").map_err(dom_err)?;
        style.set_id(id);
        style.set_text_content(Some(css));
        head.append_child(&style).map_err(dom_err)?;
        Ok(())
    }

    fn mount(&self, root: &Element) -> Result<(), WidgetError> {
        let body = self.document.body().ok_or(WidgetError::NoDocument)?;
        let node = materialize(&self.document, root)?;
        body.append_child(&node).map_err(dom_err)?;
        *self.parts.borrow_mut() = Some(Parts::locate(node)?);
        Ok(())
    }

    fn remove(&self, id: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.remove();
        }
        if id == ROOT_ID {
            self.parts.borrow_mut().take();
        }
    }

    fn apply(&self, effect: &Effect) {
        let parts = self.parts.borrow();
        let Some(parts) = parts.as_ref() else {
            return;
        };
        match effect {
            Effect::OpenPanel => {
                let _ = parts.panel.class_list().add_1(class::PANEL_OPEN);
            }
            Effect::ClosePanel => {
                let _ = parts.panel.class_list().remove_1(class::PANEL_OPEN);
            }
            Effect::HideUnreadDot => {
                let _ = parts.dot.style().set_property("display", "none");
            }
            Effect::FocusInput { delay_ms } => {
                let input = parts.input.clone();
                Timeout::new(*delay_ms, move || {
                    // The widget may have been destroyed during the delay.
                    if input.is_connected() {
                        let _ = input.focus();
                    }
                })
                .forget();
            }
            Effect::SetSendEnabled(enabled) => parts.send.set_disabled(!enabled),
            Effect::PreventDefault | Effect::Submit(_) => {}
        }
    }
}
