//! Two-state toggle switch.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use taro_core::command::Command;
use taro_core::component::Component;

/// Messages for the toggle component.
#[derive(Debug, Clone)]
pub enum Message {
    /// A key press event.
    KeyPress(KeyEvent),
    /// Set the state explicitly.
    Set(bool),
    /// Emitted when the state changes, carrying the new state.
    Changed(bool),
}

/// Style configuration for the toggle.
#[derive(Debug, Clone)]
pub struct ToggleStyle {
    /// Style for the label text.
    pub label: Style,
    /// Style for the track while on.
    pub on: Style,
    /// Style for the track while off.
    pub off: Style,
    /// Style for the track while focused.
    pub focus: Style,
}

impl Default for ToggleStyle {
    fn default() -> Self {
        Self {
            label: Style::default(),
            on: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            off: Style::default().fg(Color::DarkGray),
            focus: Style::default().add_modifier(Modifier::UNDERLINED),
        }
    }
}

/// A labeled on/off switch. Space or Enter flips it while focused.
pub struct Toggle {
    label: String,
    checked: bool,
    focus: bool,
    style: ToggleStyle,
}

impl Toggle {
    /// Create an unchecked toggle with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            checked: false,
            focus: false,
            style: ToggleStyle::default(),
        }
    }

    /// Start in the checked state.
    pub fn checked(mut self) -> Self {
        self.checked = true;
        self
    }

    /// Set the style.
    pub fn with_style(mut self, style: ToggleStyle) -> Self {
        self.style = style;
        self
    }

    /// Whether the toggle is on.
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Set the state programmatically (no `Changed` message).
    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    /// Set focus state.
    pub fn set_focused(&mut self, focused: bool) {
        self.focus = focused;
    }

    fn flip(&mut self) -> Command<Message> {
        self.checked = !self.checked;
        Command::message(Message::Changed(self.checked))
    }
}

impl Component for Toggle {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus => match key.code {
                KeyCode::Char(' ') | KeyCode::Enter => self.flip(),
                _ => Command::none(),
            },
            Message::Set(checked) => {
                if checked != self.checked {
                    self.checked = checked;
                    Command::message(Message::Changed(self.checked))
                } else {
                    Command::none()
                }
            }
            _ => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }

        let track_style = if self.checked {
            self.style.on
        } else {
            self.style.off
        };
        let track_style = if self.focus {
            track_style.patch(self.style.focus)
        } else {
            track_style
        };
        let track = if self.checked { "[■ on ]" } else { "[ off □]" };

        let line = Line::from(vec![
            Span::styled(track, track_style),
            Span::raw(" "),
            Span::styled(self.label.clone(), self.style.label),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
