//! Widget configuration resolution.
//!
//! DESIGN
//! ======
//! The host page supplies a partial `window.ChatbotAiConfig` object. It is
//! read once at mount time, copied into `ConfigOverrides`, and shallow-merged
//! over built-in defaults into an immutable `WidgetConfig`. Nothing here
//! rejects a configuration: malformed colors or URLs flow through to the
//! rendered CSS and the chat request, and are only reported as warnings.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde_json::Value;

use crate::color;

pub const DEFAULT_PRIMARY_COLOR: &str = "#3B82F6";
pub const DEFAULT_GREETING: &str = "Hi! How can we help you with your detailing services?";
pub const DEFAULT_PLACEHOLDER: &str = "Ask about pricing, packages, or booking...";

const LOCAL_API_HOST: &str = "localhost:8000";

// =============================================================================
// ENUMS
// =============================================================================

/// Screen corner the launcher and panel are anchored to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Position {
    BottomLeft,
    #[default]
    BottomRight,
}

impl Position {
    /// Read a host-supplied position. Anything mentioning `right` anchors
    /// right; every other value anchors left.
    pub fn from_host(raw: &str) -> Self {
        if raw.contains("right") { Self::BottomRight } else { Self::BottomLeft }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
        }
    }

    pub fn is_right(self) -> bool {
        self == Self::BottomRight
    }
}

/// Visual theme. Only `Light` carries styles; `Dark` is exposed on the root
/// container as `data-theme="dark"` for host-side overrides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_host(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("dark") { Self::Dark } else { Self::Light }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

// =============================================================================
// OVERRIDES
// =============================================================================

/// Host-supplied partial configuration. `None` means "use the default".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub position: Option<String>,
    pub theme: Option<String>,
    pub primary_color: Option<String>,
    pub greeting: Option<String>,
    pub placeholder: Option<String>,
    pub show_branding: Option<bool>,
    pub api_url: Option<String>,
    pub shop_id: Option<String>,
}

impl ConfigOverrides {
    /// Pick recognized options out of a host config object.
    ///
    /// Options with the wrong JSON type are skipped with a warning so one bad
    /// field cannot discard the rest of the host's configuration. A
    /// non-object value yields no overrides at all.
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            if !value.is_null() {
                log::warn!("ChatbotAiConfig is not an object; using defaults");
            }
            return Self::default();
        };

        let text = |key: &str| -> Option<String> {
            match map.get(key)? {
                Value::String(s) => Some(s.clone()),
                Value::Null => None,
                other => {
                    log::warn!("ChatbotAiConfig.{key} should be a string, got {other}; ignoring");
                    None
                }
            }
        };

        let show_branding = match map.get("showBranding") {
            Some(Value::Bool(b)) => Some(*b),
            None | Some(Value::Null) => None,
            Some(other) => {
                log::warn!("ChatbotAiConfig.showBranding should be a boolean, got {other}; ignoring");
                None
            }
        };

        // Numeric ids are stringified.
        let shop_id = match map.get("shopId") {
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => text("shopId"),
        };

        Self {
            position: text("position"),
            theme: text("theme"),
            primary_color: text("primaryColor"),
            greeting: text("greeting"),
            placeholder: text("placeholder"),
            show_branding,
            api_url: text("apiUrl"),
            shop_id,
        }
    }

    /// Parse overrides from the JSON text of a host config object.
    ///
    /// # Errors
    ///
    /// Returns the parse error if `raw` is not valid JSON.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(raw)?;
        Ok(Self::from_value(&value))
    }
}

// =============================================================================
// EFFECTIVE CONFIG
// =============================================================================

/// Fully resolved widget configuration. Immutable once computed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetConfig {
    pub position: Position,
    pub theme: Theme,
    pub primary_color: String,
    pub greeting: String,
    pub placeholder: String,
    pub show_branding: bool,
    pub api_base_url: String,
    pub shop_id: Option<String>,
}

/// Whether a `location.protocol` value denotes a secure transport.
pub fn is_secure_protocol(protocol: &str) -> bool {
    protocol.eq_ignore_ascii_case("https:")
}

/// Local development backend used when the host sets no `apiUrl`.
pub fn default_api_base_url(secure: bool) -> String {
    let scheme = if secure { "https" } else { "http" };
    format!("{scheme}://{LOCAL_API_HOST}")
}

impl WidgetConfig {
    /// Built-in defaults for a host page served over `secure` transport.
    pub fn defaults(secure: bool) -> Self {
        Self {
            position: Position::default(),
            theme: Theme::default(),
            primary_color: DEFAULT_PRIMARY_COLOR.to_owned(),
            greeting: DEFAULT_GREETING.to_owned(),
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
            show_branding: true,
            api_base_url: default_api_base_url(secure),
            shop_id: None,
        }
    }

    /// Shallow-merge `overrides` over the defaults.
    pub fn resolve(overrides: ConfigOverrides, secure: bool) -> Self {
        let defaults = Self::defaults(secure);
        Self {
            position: overrides.position.as_deref().map_or(defaults.position, Position::from_host),
            theme: overrides.theme.as_deref().map_or(defaults.theme, Theme::from_host),
            primary_color: overrides.primary_color.unwrap_or(defaults.primary_color),
            greeting: overrides.greeting.unwrap_or(defaults.greeting),
            placeholder: overrides.placeholder.unwrap_or(defaults.placeholder),
            show_branding: overrides.show_branding.unwrap_or(defaults.show_branding),
            api_base_url: overrides.api_url.unwrap_or(defaults.api_base_url),
            shop_id: overrides.shop_id.or(defaults.shop_id),
        }
    }

    /// Problems the embedding developer should know about. None of them stop
    /// the widget from rendering.
    pub fn warnings(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        if self.shop_id.as_deref().is_none_or(|id| id.trim().is_empty()) {
            warnings.push(ConfigWarning::MissingShopId);
        }
        if color::parse_hex_rgb(&self.primary_color).is_none() || !self.primary_color.trim().starts_with('#') {
            warnings.push(ConfigWarning::PrimaryColor(self.primary_color.clone()));
        }
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            warnings.push(ConfigWarning::ApiUrlScheme(self.api_base_url.clone()));
        }
        warnings
    }
}

/// Non-fatal configuration problems, logged to the developer console.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigWarning {
    #[error("ChatbotAiConfig.shopId is missing; chat requests will fail")]
    MissingShopId,
    #[error("ChatbotAiConfig.primaryColor `{0}` is not a #rgb or #rrggbb color")]
    PrimaryColor(String),
    #[error("ChatbotAiConfig.apiUrl `{0}` has no http:// or https:// scheme")]
    ApiUrlScheme(String),
}
