use super::*;

#[test]
fn parse_hex_rgb_accepts_short_long_and_bare_forms() {
    assert_eq!(parse_hex_rgb("#ABC"), Some((170, 187, 204)));
    assert_eq!(parse_hex_rgb("  #3B82F6 "), Some((59, 130, 246)));
    assert_eq!(parse_hex_rgb("3b82f6"), Some((59, 130, 246)));
}

#[test]
fn parse_hex_rgb_rejects_invalid_inputs() {
    assert_eq!(parse_hex_rgb("#12"), None);
    assert_eq!(parse_hex_rgb("#abcd"), None);
    assert_eq!(parse_hex_rgb("#12GG34"), None);
    assert_eq!(parse_hex_rgb("blue"), None);
    assert_eq!(parse_hex_rgb("#ééé"), None);
}

#[test]
fn shade_darkens_each_channel() {
    // round(2.55 * -20) = -51
    assert_eq!(shade("#3B82F6", -20), "#084fc3");
}

#[test]
fn shade_clamps_at_channel_bounds() {
    assert_eq!(shade("#000000", -20), "#000000");
    assert_eq!(shade("#ffffff", 20), "#ffffff");
    assert_eq!(shade("#1010f0", -20), "#0000bd");
}

#[test]
fn shade_expands_short_form() {
    assert_eq!(shade("#fff", -20), "#cccccc");
}

#[test]
fn shade_passes_unparsable_input_through() {
    assert_eq!(shade("tomato", -20), "tomato");
    assert_eq!(shade("", -10), "");
}

#[test]
fn with_alpha_appends_suffix() {
    assert_eq!(with_alpha("#3B82F6", "40"), "#3B82F640");
}

#[test]
fn with_alpha_expands_short_hex() {
    assert_eq!(with_alpha("#abc", "40"), "#aabbcc40");
    assert_eq!(with_alpha(" #F0A ", "60"), "#ff00aa60");
}

#[test]
fn with_alpha_passes_unparsable_color_through() {
    assert_eq!(with_alpha("red", "40"), "red40");
}
