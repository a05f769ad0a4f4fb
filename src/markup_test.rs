use super::*;
use crate::config::{Position, Theme};

fn config() -> WidgetConfig {
    let mut config = WidgetConfig::defaults(false);
    config.shop_id = Some("s1".into());
    config
}

// =============================================================
// Escaping
// =============================================================

#[test]
fn escape_html_covers_markup_characters() {
    assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    assert_eq!(escape_html("plain"), "plain");
}

#[test]
fn script_message_renders_as_literal_text() {
    let bubble = message_bubble(&ChatMessage::user("<script>alert(1)</script>"), "10:00");
    let html = bubble.to_html();
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(!html.contains("<script>"));
    let content = bubble.find_class(class::MESSAGE_CONTENT).unwrap();
    assert_eq!(content.children, vec![Node::Text("<script>alert(1)</script>".into())]);
}

#[test]
fn placeholder_attribute_is_escaped() {
    let mut config = config();
    config.placeholder = r#"Ask "anything" <here>"#.into();
    let html = panel(&config).to_html();
    assert!(html.contains(r#"placeholder="Ask &quot;anything&quot; &lt;here&gt;""#));
}

// =============================================================
// Structure
// =============================================================

#[test]
fn root_contains_launcher_and_panel() {
    let root = widget_root(&config());
    assert_eq!(root.get_attr("id"), Some(ROOT_ID));
    assert!(root.has_class(class::CONTAINER));
    assert!(root.find_class(class::LAUNCHER).is_some());
    assert!(root.find_class(class::UNREAD_DOT).is_some());
    assert!(root.find_class(class::PANEL).is_some());
    assert!(root.find_class(class::MESSAGES).is_some());
    assert!(root.find_class(class::INPUT).is_some());
    assert!(root.find_class(class::CLOSE).is_some());
}

#[test]
fn root_exposes_theme_and_position() {
    let mut config = config();
    config.theme = Theme::Dark;
    config.position = Position::BottomLeft;
    let root = widget_root(&config);
    assert_eq!(root.get_attr("data-theme"), Some("dark"));
    assert_eq!(root.get_attr("data-position"), Some("bottom-left"));
}

#[test]
fn branding_footer_present_only_when_enabled() {
    let mut config = config();
    config.show_branding = true;
    let branded = widget_root(&config);
    let footer = branded.find_class(class::BRANDING).unwrap();
    assert_eq!(footer.text_content(), "Powered by DetailChatbot.ai");

    config.show_branding = false;
    assert!(widget_root(&config).find_class(class::BRANDING).is_none());
}

#[test]
fn send_button_starts_disabled() {
    let root = widget_root(&config());
    let send = root.find_class(class::SEND).unwrap();
    assert_eq!(send.get_attr("disabled"), Some(""));
}

#[test]
fn input_carries_placeholder_and_length_cap() {
    let root = widget_root(&config());
    let input = root.find_class(class::INPUT).unwrap();
    assert_eq!(input.get_attr("placeholder"), Some(crate::config::DEFAULT_PLACEHOLDER));
    assert_eq!(input.get_attr("maxlength"), Some("500"));
    assert!(!input.to_html().contains("</input>"));
}

#[test]
fn icons_use_svg_namespace() {
    let launcher = launcher();
    let svg = launcher.find_class(class::LAUNCHER_ICON).unwrap();
    assert_eq!(svg.namespace, Namespace::Svg);
    assert_eq!(svg.namespace.uri(), Some("http://www.w3.org/2000/svg"));
    assert_eq!(Namespace::Html.uri(), None);
}

#[test]
fn header_names_the_bot() {
    let root = widget_root(&config());
    assert_eq!(root.find_class(class::BOT_NAME).unwrap().text_content(), "DetailChatbot");
    assert_eq!(root.find_class(class::BOT_STATUS).unwrap().text_content(), "Online now");
}

// =============================================================
// Messages
// =============================================================

#[test]
fn bubbles_are_sided_by_role() {
    let user = message_bubble(&ChatMessage::user("hi"), "09:05");
    assert!(user.has_class(class::MESSAGE));
    assert!(user.has_class(class::USER_MESSAGE));

    let bot = message_bubble(&ChatMessage::assistant("hello"), "09:05");
    assert!(bot.has_class(class::BOT_MESSAGE));
    assert_eq!(bot.find_class(class::MESSAGE_TIME).unwrap().text_content(), "09:05");
}

#[test]
fn typing_indicator_has_three_dots() {
    let typing = typing_indicator();
    assert!(typing.has_class(class::TYPING));
    let dots = typing.find_class(class::TYPING_DOTS).unwrap();
    assert_eq!(dots.children.len(), 3);
}

#[test]
fn clock_label_pads_fields() {
    assert_eq!(clock_label(9, 5), "09:05");
    assert_eq!(clock_label(23, 59), "23:59");
}
