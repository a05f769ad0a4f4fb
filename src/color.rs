//! Accent color helpers used by the stylesheet.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

/// Parse `#RGB` / `#RRGGBB` (leading `#` optional) into RGB channels.
pub fn parse_hex_rgb(raw: &str) -> Option<(u8, u8, u8)> {
    let hex = raw.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut digits = hex.chars().map(|c| c.to_string().repeat(2));
            Some((
                channel(&digits.next()?)?,
                channel(&digits.next()?)?,
                channel(&digits.next()?)?,
            ))
        }
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        _ => None,
    }
}

/// Lighten (positive `percent`) or darken (negative) a color by shifting every
/// channel by `round(2.55 * percent)`, clamped to `0..=255`.
///
/// Unparsable input is returned unchanged so a bad host color shows up in the
/// rendered CSS instead of failing the mount.
pub fn shade(raw: &str, percent: i32) -> String {
    let Some((r, g, b)) = parse_hex_rgb(raw) else {
        return raw.to_owned();
    };
    #[allow(clippy::cast_possible_truncation)]
    let amount = (f64::from(percent) * 2.55).round() as i32;
    let shift = |c: u8| -> u8 { u8::try_from((i32::from(c) + amount).clamp(0, 255)).unwrap_or(u8::MAX) };
    format!("#{:02x}{:02x}{:02x}", shift(r), shift(g), shift(b))
}

/// Append a two-digit hex alpha to a color, e.g. `#3B82F6` + `40`.
///
/// Short `#rgb` colors are expanded to `#rrggbb` first, since `#rgbaa` is
/// not a color.
pub fn with_alpha(raw: &str, alpha: &str) -> String {
    let color = raw.trim();
    if color.strip_prefix('#').unwrap_or(color).len() == 3 {
        if let Some((r, g, b)) = parse_hex_rgb(color) {
            return format!("#{r:02x}{g:02x}{b:02x}{alpha}");
        }
    }
    format!("{color}{alpha}")
}
