//! Widget DOM structure as a plain element tree.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser layer materializes these trees with `createElement`,
//! `setAttribute` and `createTextNode`, so message text is never parsed as
//! markup. `Element::to_html` renders the same tree with escaping for tests
//! and diagnostics.

#[cfg(test)]
#[path = "markup_test.rs"]
mod markup_test;

use std::fmt::Write as _;

use crate::config::WidgetConfig;
use crate::conversation::ChatMessage;

/// Id of the widget's root container.
pub const ROOT_ID: &str = "detailchatbot-widget";

/// Class names shared by markup, styles and the browser layer.
pub mod class {
    pub const CONTAINER: &str = "dcb-widget-container";
    pub const LAUNCHER: &str = "dcb-chat-button";
    pub const LAUNCHER_ICON: &str = "dcb-chat-icon";
    pub const UNREAD_DOT: &str = "dcb-notification-dot";
    pub const PANEL: &str = "dcb-chat-window";
    pub const PANEL_OPEN: &str = "dcb-open";
    pub const HEADER: &str = "dcb-chat-header";
    pub const HEADER_INFO: &str = "dcb-header-info";
    pub const AVATAR: &str = "dcb-avatar";
    pub const BOT_INFO: &str = "dcb-bot-info";
    pub const BOT_NAME: &str = "dcb-bot-name";
    pub const BOT_STATUS: &str = "dcb-bot-status";
    pub const CLOSE: &str = "dcb-close-button";
    pub const SCROLLER: &str = "dcb-messages-container";
    pub const MESSAGES: &str = "dcb-messages";
    pub const MESSAGE: &str = "dcb-message";
    pub const USER_MESSAGE: &str = "dcb-user-message";
    pub const BOT_MESSAGE: &str = "dcb-bot-message";
    pub const MESSAGE_CONTENT: &str = "dcb-message-content";
    pub const MESSAGE_TIME: &str = "dcb-message-time";
    pub const TYPING: &str = "dcb-typing";
    pub const TYPING_DOTS: &str = "dcb-typing-dots";
    pub const DOT: &str = "dcb-dot";
    pub const INPUT_AREA: &str = "dcb-input-container";
    pub const INPUT_ROW: &str = "dcb-input-wrapper";
    pub const INPUT: &str = "dcb-message-input";
    pub const SEND: &str = "dcb-send-button";
    pub const BRANDING: &str = "dcb-branding";
}

const BOT_NAME: &str = "DetailChatbot";
const BOT_STATUS: &str = "Online now";
const INPUT_MAX_LENGTH: &str = "500";

const ICON_CHAT: &str = "M20 2H4c-1.1 0-2 .9-2 2v12c0 1.1.9 2 2 2h4l4 4 4-4h4c1.1 0 2-.9 2-2V4c0-1.1-.9-2-2-2z";
const ICON_AVATAR: &str = "M12 2C13.1 2 14 2.9 14 4C14 5.1 13.1 6 12 6C10.9 6 10 5.1 10 4C10 2.9 10.9 2 12 2ZM21 9V7L15 3.5L9 7V9L15 6.5L21 9ZM16 12C16 13.1 15.1 14 14 14S12 13.1 12 12 12.9 10 14 10 16 10.9 16 12ZM12 13.5C10.5 13.5 9 14 9 14V16H15V14S13.5 13.5 12 13.5Z";
const ICON_CLOSE: &str = "M19 6.41L17.59 5 12 10.59 6.41 5 5 6.41 10.59 12 5 17.59 6.41 19 12 13.41 17.59 19 19 17.59 13.41 12z";
const ICON_SEND: &str = "M2.01 21L23 12 2.01 3 2 10l15 2-15 2z";

// =============================================================================
// TREE
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Namespace {
    Html,
    Svg,
}

impl Namespace {
    pub fn uri(self) -> Option<&'static str> {
        match self {
            Self::Html => None,
            Self::Svg => Some("http://www.w3.org/2000/svg"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub namespace: Namespace,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self { tag, namespace: Namespace::Html, attrs: Vec::new(), children: Vec::new() }
    }

    pub fn svg(tag: &'static str) -> Self {
        Self { namespace: Namespace::Svg, ..Self::new(tag) }
    }

    #[must_use]
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    #[must_use]
    pub fn class(self, name: &str) -> Self {
        self.attr("class", name)
    }

    #[must_use]
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter().find(|(n, _)| *n == name).map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.get_attr("class").is_some_and(|c| c.split_whitespace().any(|c| c == name))
    }

    /// Depth-first search for the first element (self included) carrying `class`.
    pub fn find_class(&self, class: &str) -> Option<&Element> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children.iter().find_map(|child| match child {
            Node::Element(el) => el.find_class(class),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Serialize to HTML with attribute and text escaping.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_html(self, &mut out);
        out
    }
}

fn collect_text(el: &Element, out: &mut String) {
    for child in &el.children {
        match child {
            Node::Element(child) => collect_text(child, out),
            Node::Text(text) => out.push_str(text),
        }
    }
}

fn write_html(el: &Element, out: &mut String) {
    let _ = write!(out, "<{}", el.tag);
    for (name, value) in &el.attrs {
        let _ = write!(out, " {name}=\"{}\"", escape_html(value));
    }
    out.push('>');
    if el.tag == "input" {
        return;
    }
    for child in &el.children {
        match child {
            Node::Element(child) => write_html(child, out),
            Node::Text(text) => out.push_str(&escape_html(text)),
        }
    }
    let _ = write!(out, "</{}>", el.tag);
}

/// Escape text for inclusion in HTML text or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// =============================================================================
// WIDGET PARTS
// =============================================================================

fn icon(class_name: Option<&str>, path: &str) -> Element {
    let mut svg = Element::svg("svg").attr("viewBox", "0 0 24 24").attr("fill", "currentColor");
    if let Some(class_name) = class_name {
        svg = svg.class(class_name);
    }
    svg.attr("aria-hidden", "true").child(Element::svg("path").attr("d", path))
}

/// Round launcher button with the unread indicator dot.
pub fn launcher() -> Element {
    Element::new("button")
        .class(class::LAUNCHER)
        .attr("type", "button")
        .attr("aria-label", "Open chat")
        .child(icon(Some(class::LAUNCHER_ICON), ICON_CHAT))
        .child(Element::new("div").class(class::UNREAD_DOT))
}

fn header() -> Element {
    let info = Element::new("div")
        .class(class::HEADER_INFO)
        .child(Element::new("div").class(class::AVATAR).child(icon(None, ICON_AVATAR)))
        .child(
            Element::new("div")
                .class(class::BOT_INFO)
                .child(Element::new("div").class(class::BOT_NAME).text(BOT_NAME))
                .child(Element::new("div").class(class::BOT_STATUS).text(BOT_STATUS)),
        );
    let close = Element::new("button")
        .class(class::CLOSE)
        .attr("type", "button")
        .attr("aria-label", "Close chat")
        .child(icon(None, ICON_CLOSE));
    Element::new("div").class(class::HEADER).child(info).child(close)
}

fn input_area(config: &WidgetConfig) -> Element {
    let input = Element::new("input")
        .class(class::INPUT)
        .attr("type", "text")
        .attr("placeholder", config.placeholder.as_str())
        .attr("maxlength", INPUT_MAX_LENGTH)
        .attr("aria-label", "Message");
    let send = Element::new("button")
        .class(class::SEND)
        .attr("type", "button")
        .attr("aria-label", "Send message")
        .attr("disabled", "")
        .child(icon(None, ICON_SEND));
    let mut area = Element::new("div")
        .class(class::INPUT_AREA)
        .child(Element::new("div").class(class::INPUT_ROW).child(input).child(send));
    if config.show_branding {
        area = area.child(
            Element::new("div")
                .class(class::BRANDING)
                .text("Powered by ")
                .child(Element::new("strong").text("DetailChatbot.ai")),
        );
    }
    area
}

/// Chat panel: header, scrollable message list, input row, optional branding.
pub fn panel(config: &WidgetConfig) -> Element {
    Element::new("div")
        .class(class::PANEL)
        .attr("role", "dialog")
        .attr("aria-label", "Chat")
        .child(header())
        .child(
            Element::new("div")
                .class(class::SCROLLER)
                .child(Element::new("div").class(class::MESSAGES).attr("aria-live", "polite")),
        )
        .child(input_area(config))
}

/// Root container holding the launcher and panel.
pub fn widget_root(config: &WidgetConfig) -> Element {
    Element::new("div")
        .attr("id", ROOT_ID)
        .class(class::CONTAINER)
        .attr("data-theme", config.theme.as_str())
        .attr("data-position", config.position.as_str())
        .child(launcher())
        .child(panel(config))
}

/// One message bubble with its time label.
pub fn message_bubble(message: &ChatMessage, time: &str) -> Element {
    let side = if message.is_user() { class::USER_MESSAGE } else { class::BOT_MESSAGE };
    Element::new("div")
        .class(&format!("{} {side}", class::MESSAGE))
        .child(Element::new("div").class(class::MESSAGE_CONTENT).text(message.content.as_str()))
        .child(Element::new("div").class(class::MESSAGE_TIME).text(time))
}

/// Transient "assistant is typing" placeholder.
pub fn typing_indicator() -> Element {
    let mut dots = Element::new("div").class(class::TYPING_DOTS);
    for _ in 0..3 {
        dots = dots.child(Element::new("div").class(class::DOT));
    }
    Element::new("div")
        .class(&format!("{} {} {}", class::MESSAGE, class::BOT_MESSAGE, class::TYPING))
        .child(Element::new("div").class(class::MESSAGE_CONTENT).child(dots))
}

/// `HH:MM` label for a local wall-clock time.
pub fn clock_label(hours: u32, minutes: u32) -> String {
    format!("{hours:02}:{minutes:02}")
}
