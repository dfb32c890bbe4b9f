//! Status banner with variants and a timed dismissal transition.
//!
//! Dismissing an alert does not remove it immediately: the banner enters an
//! exiting state (rendered dimmed), schedules a deferred callback via
//! [`Command::tick`], and emits [`Message::Dismissed`] once the callback
//! fires. Hosts typically drop the alert from their layout on `Dismissed`.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::time::Duration;
use taro_core::command::Command;
use taro_core::component::Component;

/// Total dismissal transition, in milliseconds.
const TRANSITION_MS: u64 = 500;
/// The dismissal callback fires before the transition fully ends, so the
/// host can drop the alert while the tail of the fade still renders.
const CALLBACK_MS: u64 = TRANSITION_MS - 300;

/// Visual/semantic variant of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertVariant {
    /// Informational (default).
    #[default]
    Info,
    /// Operation succeeded.
    Success,
    /// Needs attention.
    Warning,
    /// Operation failed.
    Danger,
}

impl AlertVariant {
    fn symbol(self) -> &'static str {
        match self {
            AlertVariant::Info => "ℹ",
            AlertVariant::Success => "✓",
            AlertVariant::Warning => "!",
            AlertVariant::Danger => "✗",
        }
    }
}

/// Messages for the alert component.
#[derive(Debug, Clone)]
pub enum Message {
    /// A key press event.
    KeyPress(KeyEvent),
    /// Begin the dismissal transition.
    Dismiss,
    /// The deferred dismissal callback fired.
    TransitionElapsed,
    /// Emitted once per dismissal, after the transition.
    Dismissed,
}

/// Style configuration for the alert.
#[derive(Debug, Clone)]
pub struct AlertStyle {
    /// Style for info banners.
    pub info: Style,
    /// Style for success banners.
    pub success: Style,
    /// Style for warning banners.
    pub warning: Style,
    /// Style for danger banners.
    pub danger: Style,
    /// Style overlay while the banner is exiting.
    pub exiting: Style,
    /// Style for the dismiss hint.
    pub hint: Style,
}

impl Default for AlertStyle {
    fn default() -> Self {
        Self {
            info: Style::default().fg(Color::Black).bg(Color::Gray),
            success: Style::default().fg(Color::Black).bg(Color::Green),
            warning: Style::default().fg(Color::Black).bg(Color::Yellow),
            danger: Style::default().fg(Color::White).bg(Color::Red),
            exiting: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
            hint: Style::default().add_modifier(Modifier::DIM),
        }
    }
}

/// A status banner.
pub struct Alert {
    text: String,
    variant: AlertVariant,
    dismissible: bool,
    exiting: bool,
    dismissed: bool,
    focus: bool,
    style: AlertStyle,
}

impl Alert {
    /// Create an info alert with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            variant: AlertVariant::default(),
            dismissible: false,
            exiting: false,
            dismissed: false,
            focus: false,
            style: AlertStyle::default(),
        }
    }

    /// Set the variant.
    pub fn with_variant(mut self, variant: AlertVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Allow the user to dismiss the alert (Esc or `x` while focused).
    pub fn dismissible(mut self) -> Self {
        self.dismissible = true;
        self
    }

    /// Set the style.
    pub fn with_style(mut self, style: AlertStyle) -> Self {
        self.style = style;
        self
    }

    /// Set focus state.
    pub fn set_focused(&mut self, focused: bool) {
        self.focus = focused;
    }

    /// The alert text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The variant.
    pub fn variant(&self) -> AlertVariant {
        self.variant
    }

    /// Whether the dismissal transition is in progress.
    pub fn is_exiting(&self) -> bool {
        self.exiting
    }

    /// Whether the alert has fully dismissed.
    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    fn begin_dismiss(&mut self) -> Command<Message> {
        if self.exiting || self.dismissed {
            return Command::none();
        }
        self.exiting = true;
        Command::tick(Duration::from_millis(CALLBACK_MS), |_| {
            Message::TransitionElapsed
        })
    }
}

impl Component for Alert {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus && self.dismissible => match key.code {
                KeyCode::Esc | KeyCode::Char('x') => self.begin_dismiss(),
                _ => Command::none(),
            },
            Message::Dismiss => self.begin_dismiss(),
            Message::TransitionElapsed => {
                if self.exiting {
                    self.exiting = false;
                    self.dismissed = true;
                    Command::message(Message::Dismissed)
                } else {
                    Command::none()
                }
            }
            _ => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if self.dismissed || area.height == 0 {
            return;
        }

        let base = match self.variant {
            AlertVariant::Info => self.style.info,
            AlertVariant::Success => self.style.success,
            AlertVariant::Warning => self.style.warning,
            AlertVariant::Danger => self.style.danger,
        };
        let style = if self.exiting { self.style.exiting } else { base };

        let mut spans = vec![Span::styled(
            format!(" {} {} ", self.variant.symbol(), self.text),
            style,
        )];
        if self.dismissible && !self.exiting {
            spans.push(Span::styled(" [x] ", style.patch(self.style.hint)));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).style(style), area);
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use taro_core::testing::ComponentHarness;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn dismiss_enters_exiting_and_schedules_callback() {
        let mut alert = Alert::new("saved").with_variant(AlertVariant::Success);
        let cmd = alert.update(Message::Dismiss);
        assert!(alert.is_exiting());
        assert!(!alert.is_dismissed());
        // the deferred callback is async, not an immediate message
        assert!(!cmd.is_none());
        assert!(cmd.into_message().is_none());
    }

    #[test]
    fn transition_elapsed_completes_dismissal() {
        let mut alert = Alert::new("saved");
        alert.update(Message::Dismiss);
        let cmd = alert.update(Message::TransitionElapsed);
        assert!(alert.is_dismissed());
        assert!(!alert.is_exiting());
        assert!(matches!(cmd.into_message(), Some(Message::Dismissed)));
    }

    #[test]
    fn double_dismiss_is_absorbed() {
        let mut alert = Alert::new("saved");
        alert.update(Message::Dismiss);
        let cmd = alert.update(Message::Dismiss);
        assert!(cmd.is_none());

        alert.update(Message::TransitionElapsed);
        // a stray late callback changes nothing
        let cmd = alert.update(Message::TransitionElapsed);
        assert!(cmd.is_none());
        assert!(alert.is_dismissed());
    }

    #[test]
    fn esc_dismisses_when_focused_and_dismissible() {
        let mut alert = Alert::new("heads up").dismissible();
        alert.set_focused(true);
        alert.update(Message::KeyPress(key(KeyCode::Esc)));
        assert!(alert.is_exiting());
    }

    #[test]
    fn keys_ignored_when_not_dismissible() {
        let mut alert = Alert::new("fyi");
        alert.set_focused(true);
        let cmd = alert.update(Message::KeyPress(key(KeyCode::Esc)));
        assert!(cmd.is_none());
        assert!(!alert.is_exiting());
    }

    #[test]
    fn view_renders_text_and_symbol() {
        let alert = Alert::new("deploy failed").with_variant(AlertVariant::Danger);
        let harness = ComponentHarness::new(alert);
        let output = harness.render_string(30, 1);
        assert!(output.contains("deploy failed"));
        assert!(output.contains('✗'));
    }

    #[test]
    fn dismissed_alert_renders_nothing() {
        let mut alert = Alert::new("gone");
        alert.update(Message::Dismiss);
        alert.update(Message::TransitionElapsed);
        let harness = ComponentHarness::new(alert);
        let output = harness.render_string(20, 1);
        assert_eq!(output.trim(), "");
    }
}
