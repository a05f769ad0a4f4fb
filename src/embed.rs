//! Host-page embed snippet.
//!
//! Renders the two `<script>` tags a business owner pastes into their site:
//! one declaring `window.ChatbotAiConfig`, one loading the widget script.
//! Config values are JSON-encoded, so quotes or `</script>` inside a greeting
//! cannot break out of the inline script.

#[cfg(test)]
#[path = "embed_test.rs"]
mod embed_test;

use serde::Serialize;

use crate::config::WidgetConfig;

/// Path the backend serves the widget script from.
pub const SCRIPT_PATH: &str = "/api/v1/widget/widget.js";

/// `window.ChatbotAiConfig` as the host page declares it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HostConfig<'a> {
    shop_id: &'a str,
    position: &'a str,
    theme: &'a str,
    primary_color: &'a str,
    greeting: &'a str,
    placeholder: &'a str,
    show_branding: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_url: Option<&'a str>,
}

/// Full URL of the widget script under `backend_url`.
pub fn script_url(backend_url: &str) -> String {
    format!("{}{SCRIPT_PATH}", backend_url.trim_end_matches('/'))
}

/// Render the embed snippet for `shop_id`.
///
/// `api_url` is only written into the snippet when given; otherwise the widget
/// falls back to its built-in default.
///
/// # Errors
///
/// Returns the serialization error if the config cannot be encoded as JSON.
pub fn snippet(
    shop_id: &str,
    config: &WidgetConfig,
    script_src: &str,
    api_url: Option<&str>,
) -> Result<String, serde_json::Error> {
    let host = HostConfig {
        shop_id,
        position: config.position.as_str(),
        theme: config.theme.as_str(),
        primary_color: &config.primary_color,
        greeting: &config.greeting,
        placeholder: &config.placeholder,
        show_branding: config.show_branding,
        api_url,
    };
    let json = serde_json::to_string_pretty(&host)?.replace("</", "<\\/");
    let json = json.replace('\n', "\n  ");
    let src = crate::markup::escape_html(script_src);

    Ok(format!(
        "<!-- DetailChatbot.ai Widget -->\n\
         <script>\n  window.ChatbotAiConfig = {json};\n</script>\n\
         <script src=\"{src}\" async></script>\n\
         <!-- End DetailChatbot.ai Widget -->"
    ))
}
