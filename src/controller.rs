//! Interaction controller: open/closed state and the event → effect table.
//!
//! DESIGN
//! ======
//! The controller never touches the DOM. The browser layer translates DOM
//! events into `UiEvent`s, and the widget applies the returned `Effect`s to
//! the page. That keeps the keyboard and focus rules testable without a
//! browser.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

/// Delay before focusing the input after the panel opens, letting the open
/// transition start first.
pub const FOCUS_DELAY_MS: u32 = 300;

/// Viewports at or below this width skip auto-focus so the on-screen keyboard
/// does not pop up.
pub const MOBILE_MAX_WIDTH_PX: f64 = 768.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum PanelState {
    #[default]
    Closed,
    Open,
}

/// User input relevant to the widget.
#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent {
    LauncherClicked { viewport_width: f64 },
    CloseClicked,
    /// `keydown` anywhere in the document.
    DocumentKey { key: String },
    /// `keydown` in the message input, with the input's current value.
    InputKey { key: String, shift: bool, value: String },
    InputChanged { value: String },
    SendClicked { value: String },
}

/// Side effect requested by the controller.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    OpenPanel,
    ClosePanel,
    HideUnreadDot,
    FocusInput { delay_ms: u32 },
    SetSendEnabled(bool),
    PreventDefault,
    /// Send this (already trimmed, non-empty) text.
    Submit(String),
}

#[derive(Clone, Debug, Default)]
pub struct Controller {
    state: PanelState,
}

impl Controller {
    pub fn is_open(&self) -> bool {
        self.state == PanelState::Open
    }

    pub fn handle(&mut self, event: UiEvent) -> Vec<Effect> {
        match event {
            UiEvent::LauncherClicked { viewport_width } => match self.state {
                PanelState::Closed => {
                    self.state = PanelState::Open;
                    let mut effects = vec![Effect::OpenPanel, Effect::HideUnreadDot];
                    if viewport_width > MOBILE_MAX_WIDTH_PX {
                        effects.push(Effect::FocusInput { delay_ms: FOCUS_DELAY_MS });
                    }
                    effects
                }
                PanelState::Open => self.close(),
            },
            UiEvent::CloseClicked => self.close(),
            UiEvent::DocumentKey { key } => {
                if key == "Escape" && self.is_open() {
                    self.close()
                } else {
                    Vec::new()
                }
            }
            UiEvent::InputKey { key, shift, value } => {
                if key != "Enter" || shift {
                    return Vec::new();
                }
                let mut effects = vec![Effect::PreventDefault];
                effects.extend(submission(&value));
                effects
            }
            UiEvent::InputChanged { value } => vec![Effect::SetSendEnabled(!value.trim().is_empty())],
            UiEvent::SendClicked { value } => submission(&value).into_iter().collect(),
        }
    }

    fn close(&mut self) -> Vec<Effect> {
        self.state = PanelState::Closed;
        vec![Effect::ClosePanel]
    }
}

fn submission(value: &str) -> Option<Effect> {
    let text = value.trim();
    (!text.is_empty()).then(|| Effect::Submit(text.to_owned()))
}
