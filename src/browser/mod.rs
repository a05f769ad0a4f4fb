//! Browser entry points.
//!
//! SYSTEM CONTEXT
//! ==============
//! `start` runs when the wasm module is instantiated. It installs the panic
//! hook and console logger, publishes `window.DetailChatbotWidget`, and mounts
//! the widget once the document has parsed. `mount` and `destroy` are also
//! exported for hosts that drive the lifecycle themselves.
//!
//! DESIGN
//! ======
//! The single live instance sits in a `thread_local!` `Lifecycle`. DOM
//! listeners capture a `Weak` handle, so a listener that outlives its widget
//! does nothing. Listener closures are owned by the slot entry and dropped
//! with it; the document-level `keydown` listener is detached explicitly.
//!
//! ERROR HANDLING
//! ==============
//! Mount failures are logged to the console and leave the page untouched.
//! Nothing in here panics into the host page.

mod page;

pub use page::BrowserPage;

use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, EventTarget, KeyboardEvent};

use crate::config::{ConfigOverrides, WidgetConfig, is_secure_protocol};
use crate::controller::{MOBILE_MAX_WIDTH_PX, UiEvent};
use crate::host::{WidgetError, is_document_loading};
use crate::markup::class;
use crate::transport::HttpTransport;
use crate::widget::{Lifecycle, Widget};

/// Host-declared configuration object.
const CONFIG_GLOBAL: &str = "ChatbotAiConfig";
/// Object exposing `destroy()` to the host page.
const HOOK_GLOBAL: &str = "DetailChatbotWidget";

type BrowserWidget = Widget<BrowserPage, HttpTransport>;
type Listener = Closure<dyn FnMut(Event)>;

struct Mounted {
    widget: Rc<BrowserWidget>,
    _listeners: Listeners,
}

struct Listeners {
    document: Document,
    keydown: Listener,
    _elements: Vec<Listener>,
}

impl Drop for Listeners {
    fn drop(&mut self) {
        let _ = self
            .document
            .remove_event_listener_with_callback("keydown", self.keydown.as_ref().unchecked_ref());
    }
}

thread_local! {
    static ACTIVE: Lifecycle<Mounted> = const { Lifecycle::new() };
}

// =============================================================================
// EXPORTS
// =============================================================================

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = publish_hook(&window) {
        log::warn!("could not publish window.{HOOK_GLOBAL}: {e:?}");
    }
    let Some(document) = window.document() else {
        return;
    };
    if is_document_loading(&document.ready_state()) {
        let once = Closure::once_into_js(mount);
        if document.add_event_listener_with_callback("DOMContentLoaded", once.unchecked_ref()).is_err() {
            log::error!("could not wait for DOMContentLoaded");
        }
    } else {
        mount();
    }
}

/// Mount the widget unless an instance is already live.
#[wasm_bindgen]
pub fn mount() {
    match try_mount() {
        Ok(true) => log::info!("chat widget mounted"),
        Ok(false) | Err(WidgetError::AlreadyMounted) => log::debug!("chat widget already mounted"),
        Err(e) => log::error!("chat widget failed to mount: {e}"),
    }
}

/// Tear down the live instance. Safe to call at any time.
#[wasm_bindgen]
pub fn destroy() {
    let removed = ACTIVE.with(|slot| slot.teardown(|mounted| mounted.widget.destroy()));
    if removed {
        log::info!("chat widget destroyed");
    }
}

fn publish_hook(window: &web_sys::Window) -> Result<(), JsValue> {
    let hook = js_sys::Object::new();
    let destroy_fn = Closure::wrap(Box::new(destroy) as Box<dyn Fn()>);
    js_sys::Reflect::set(&hook, &JsValue::from_str("destroy"), destroy_fn.as_ref())?;
    destroy_fn.forget();
    js_sys::Reflect::set(window, &JsValue::from_str(HOOK_GLOBAL), &hook)?;
    Ok(())
}

// =============================================================================
// MOUNT
// =============================================================================

fn try_mount() -> Result<bool, WidgetError> {
    ACTIVE.with(|slot| {
        slot.init(|| {
            let page = Rc::new(BrowserPage::current()?);
            let widget = Rc::new(Widget::mount(page, read_config(), HttpTransport)?);
            match attach_listeners(&widget) {
                Ok(listeners) => Ok(Mounted { widget, _listeners: listeners }),
                Err(e) => {
                    widget.destroy();
                    Err(e)
                }
            }
        })
    })
}

/// Resolve `window.ChatbotAiConfig` against the defaults.
fn read_config() -> WidgetConfig {
    let Some(window) = web_sys::window() else {
        return WidgetConfig::defaults(false);
    };
    let secure = window.location().protocol().is_ok_and(|p| is_secure_protocol(&p));
    let declared = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)).unwrap_or(JsValue::UNDEFINED);
    if declared.is_undefined() || declared.is_null() {
        return WidgetConfig::resolve(ConfigOverrides::default(), secure);
    }

    let overrides = match js_sys::JSON::stringify(&declared).map(String::from) {
        Ok(json) => ConfigOverrides::from_json(&json).unwrap_or_else(|e| {
            log::warn!("window.{CONFIG_GLOBAL} is not an object ({e}); using defaults");
            ConfigOverrides::default()
        }),
        Err(e) => {
            log::warn!("window.{CONFIG_GLOBAL} could not be read ({e:?}); using defaults");
            ConfigOverrides::default()
        }
    };
    WidgetConfig::resolve(overrides, secure)
}

// =============================================================================
// LISTENERS
// =============================================================================

fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(MOBILE_MAX_WIDTH_PX)
}

/// Run `ui` through the widget and act on the dispatch.
fn dispatch(widget: &Weak<BrowserWidget>, event: &Event, ui: impl FnOnce(&BrowserWidget) -> UiEvent) {
    let Some(widget) = widget.upgrade() else {
        return;
    };
    let outcome = widget.dispatch(ui(&*widget));
    if outcome.prevent_default {
        event.prevent_default();
    }
    if let Some(text) = outcome.submit {
        let chat = Rc::clone(widget.chat());
        wasm_bindgen_futures::spawn_local(async move {
            chat.submit(&text).await;
        });
    }
}

fn listen(
    target: &EventTarget,
    kind: &str,
    widget: &Rc<BrowserWidget>,
    ui: fn(&BrowserWidget, &Event) -> UiEvent,
) -> Result<Listener, WidgetError> {
    let weak = Rc::downgrade(widget);
    let listener = Closure::wrap(Box::new(move |event: Event| {
        dispatch(&weak, &event, |w| ui(w, &event));
    }) as Box<dyn FnMut(Event)>);
    target
        .add_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())
        .map_err(|e| WidgetError::Dom(format!("{e:?}")))?;
    Ok(listener)
}

fn key_of(event: &Event) -> (String, bool) {
    event.dyn_ref::<KeyboardEvent>().map_or_else(|| (String::new(), false), |k| (k.key(), k.shift_key()))
}

fn attach_listeners(widget: &Rc<BrowserWidget>) -> Result<Listeners, WidgetError> {
    let page = widget.page();
    let part = |name: &str| page.part(name).ok_or_else(|| WidgetError::Dom(format!("missing .{name}")));

    let launcher = part(class::LAUNCHER)?;
    let close = part(class::CLOSE)?;
    let send = part(class::SEND)?;
    let input = part(class::INPUT)?;

    let elements = vec![
        listen(&launcher, "click", widget, |_, _| UiEvent::LauncherClicked { viewport_width: viewport_width() })?,
        listen(&close, "click", widget, |_, _| UiEvent::CloseClicked)?,
        listen(&send, "click", widget, |w, _| UiEvent::SendClicked { value: w.page().input_value() })?,
        listen(&input, "input", widget, |w, _| UiEvent::InputChanged { value: w.page().input_value() })?,
        listen(&input, "keydown", widget, |w, event| {
            let (key, shift) = key_of(event);
            UiEvent::InputKey { key, shift, value: w.page().input_value() }
        })?,
    ];

    let document = page.document().clone();
    let keydown = listen(&document, "keydown", widget, |_, event| UiEvent::DocumentKey { key: key_of(event).0 })?;

    Ok(Listeners { document, keydown, _elements: elements })
}
