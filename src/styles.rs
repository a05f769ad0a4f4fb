//! Scoped stylesheet for the widget.
//!
//! All selectors are prefixed `dcb-` so the host page's own styles and the
//! widget's rarely collide. The sheet is injected once per page under
//! `STYLE_ID`; a second mount reuses whatever sheet is already there.

#[cfg(test)]
#[path = "styles_test.rs"]
mod styles_test;

use crate::color;
use crate::config::WidgetConfig;

/// Id of the injected `<style>` element.
pub const STYLE_ID: &str = "dcb-widget-styles";

const TEMPLATE: &str = r"
.dcb-widget-container {
  position: fixed;
  $side: 20px;
  bottom: 20px;
  z-index: 9999;
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
  font-size: 14px;
  line-height: 1.4;
}
.dcb-widget-container *, .dcb-widget-container *::before, .dcb-widget-container *::after {
  box-sizing: border-box;
}
.dcb-chat-button {
  width: 60px;
  height: 60px;
  border-radius: 50%;
  background: linear-gradient(135deg, $accent, $launcher_shade);
  box-shadow: 0 4px 20px $glow;
  cursor: pointer;
  display: flex;
  align-items: center;
  justify-content: center;
  transition: all 0.3s ease;
  position: relative;
  border: none;
  padding: 0;
}
.dcb-chat-button:hover {
  transform: scale(1.1);
  box-shadow: 0 6px 25px $glow_hover;
}
.dcb-chat-icon {
  width: 24px;
  height: 24px;
  color: white;
}
.dcb-notification-dot {
  position: absolute;
  top: 8px;
  right: 8px;
  width: 12px;
  height: 12px;
  background: #EF4444;
  border-radius: 50%;
  border: 2px solid white;
  animation: dcb-pulse 2s infinite;
}
@keyframes dcb-pulse {
  0%, 100% { opacity: 1; }
  50% { opacity: 0.5; }
}
.dcb-chat-window {
  position: absolute;
  bottom: 70px;
  $side: 0;
  width: 350px;
  height: 500px;
  background: white;
  border-radius: 16px;
  box-shadow: 0 10px 40px rgba(0,0,0,0.15);
  display: flex;
  flex-direction: column;
  overflow: hidden;
  transform: translateY(10px) scale(0.95);
  opacity: 0;
  visibility: hidden;
  transition: all 0.3s cubic-bezier(0.4, 0, 0.2, 1);
  border: 1px solid #E5E7EB;
}
.dcb-chat-window.dcb-open {
  transform: translateY(0) scale(1);
  opacity: 1;
  visibility: visible;
}
.dcb-chat-header {
  background: linear-gradient(135deg, $accent, $header_shade);
  color: white;
  padding: 16px;
  display: flex;
  align-items: center;
  justify-content: space-between;
}
.dcb-header-info {
  display: flex;
  align-items: center;
}
.dcb-avatar {
  width: 32px;
  height: 32px;
  border-radius: 50%;
  background: rgba(255,255,255,0.2);
  display: flex;
  align-items: center;
  justify-content: center;
  margin-right: 12px;
}
.dcb-avatar svg {
  width: 18px;
  height: 18px;
}
.dcb-bot-name {
  font-weight: 600;
  font-size: 14px;
  margin-bottom: 2px;
}
.dcb-bot-status {
  font-size: 12px;
  opacity: 0.9;
}
.dcb-close-button {
  background: none;
  border: none;
  color: white;
  cursor: pointer;
  padding: 4px;
  border-radius: 4px;
  transition: background 0.2s;
}
.dcb-close-button:hover {
  background: rgba(255,255,255,0.1);
}
.dcb-close-button svg {
  width: 20px;
  height: 20px;
}
.dcb-messages-container {
  flex: 1;
  overflow-y: auto;
  background: #F8FAFC;
  padding: 0;
}
.dcb-messages {
  padding: 16px;
  display: flex;
  flex-direction: column;
  gap: 12px;
}
.dcb-message {
  display: flex;
  flex-direction: column;
}
.dcb-user-message {
  align-items: flex-end;
}
.dcb-bot-message {
  align-items: flex-start;
}
.dcb-message-content {
  padding: 12px 16px;
  border-radius: 18px;
  max-width: 80%;
  word-wrap: break-word;
  white-space: pre-wrap;
  box-shadow: 0 1px 3px rgba(0,0,0,0.1);
}
.dcb-user-message .dcb-message-content {
  background: $accent;
  color: white;
  border-bottom-right-radius: 4px;
}
.dcb-bot-message .dcb-message-content {
  background: white;
  color: #1F2937;
  border-bottom-left-radius: 4px;
}
.dcb-message-time {
  font-size: 11px;
  color: #64748B;
  margin-top: 4px;
  padding: 0 8px;
}
.dcb-typing-dots {
  display: flex;
  gap: 4px;
  padding: 8px 0;
}
.dcb-dot {
  width: 6px;
  height: 6px;
  border-radius: 50%;
  background: #64748B;
  animation: dcb-typing 1.4s infinite;
}
.dcb-dot:nth-child(2) { animation-delay: 0.2s; }
.dcb-dot:nth-child(3) { animation-delay: 0.4s; }
@keyframes dcb-typing {
  0%, 60%, 100% { opacity: 0.3; transform: translateY(0); }
  30% { opacity: 1; transform: translateY(-4px); }
}
.dcb-input-container {
  padding: 16px;
  background: white;
  border-top: 1px solid #E5E7EB;
}
.dcb-input-wrapper {
  display: flex;
  gap: 8px;
  margin-bottom: $branding_gap;
}
.dcb-message-input {
  flex: 1;
  padding: 12px 16px;
  border: 1px solid #E5E7EB;
  border-radius: 20px;
  outline: none;
  font-size: 14px;
  transition: border-color 0.2s;
}
.dcb-message-input:focus {
  border-color: $accent;
}
.dcb-send-button {
  width: 40px;
  height: 40px;
  background: $accent;
  border: none;
  border-radius: 50%;
  color: white;
  cursor: pointer;
  display: flex;
  align-items: center;
  justify-content: center;
  transition: all 0.2s;
}
.dcb-send-button:hover {
  background: $hover_shade;
  transform: scale(1.05);
}
.dcb-send-button:disabled {
  opacity: 0.5;
  cursor: not-allowed;
  transform: none;
}
.dcb-send-button svg {
  width: 16px;
  height: 16px;
}
.dcb-branding {
  text-align: center;
  font-size: 11px;
  color: #64748B;
}
@media (max-width: 480px) {
  .dcb-widget-container {
    right: 10px !important;
    left: 10px !important;
    bottom: 10px !important;
  }
  .dcb-chat-window {
    width: calc(100vw - 20px);
    height: calc(100vh - 100px);
    max-height: 600px;
    $side: -10px;
  }
  .dcb-chat-button {
    right: 0 !important;
  }
}
@media (max-height: 600px) {
  .dcb-chat-window {
    height: calc(100vh - 80px);
  }
}
";

/// Render the stylesheet for `config`.
pub fn stylesheet(config: &WidgetConfig) -> String {
    let accent = config.primary_color.trim();
    let side = if config.position.is_right() { "right" } else { "left" };
    let branding_gap = if config.show_branding { "12px" } else { "0" };

    // `$glow_hover` before `$glow`: tokens are replaced in order.
    [
        ("$launcher_shade", color::shade(accent, -20)),
        ("$header_shade", color::shade(accent, -15)),
        ("$hover_shade", color::shade(accent, -10)),
        ("$glow_hover", color::with_alpha(accent, "60")),
        ("$glow", color::with_alpha(accent, "40")),
        ("$branding_gap", branding_gap.to_owned()),
        ("$side", side.to_owned()),
        ("$accent", accent.to_owned()),
    ]
    .into_iter()
    .fold(TEMPLATE.trim_start().to_owned(), |css, (token, value)| css.replace(token, &value))
}
