//! Search field: a single-line input that submits its term on Enter.
//!
//! Unlike the combobox this widget owns no candidate list — it reports the
//! term and the host runs the search. A host-settable loading flag renders a
//! busy marker and suppresses submission while a previous search is in
//! flight.

use crate::query::QueryBuffer;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use taro_core::command::Command;
use taro_core::component::Component;

/// Messages for the search component.
#[derive(Debug, Clone)]
pub enum Message {
    /// A key press event.
    KeyPress(KeyEvent),
    /// The term changed.
    Changed(String),
    /// Enter was pressed; carries the term to search for.
    Submit(String),
    /// The field was cleared (Esc).
    Cleared,
}

/// Style configuration for the search field.
#[derive(Debug, Clone)]
pub struct SearchStyle {
    /// Style for the magnifier prompt.
    pub prompt: Style,
    /// Style for the term text.
    pub text: Style,
    /// Style for the placeholder.
    pub placeholder: Style,
    /// Style for the cursor.
    pub cursor: Style,
    /// Style for the busy marker.
    pub busy: Style,
}

impl Default for SearchStyle {
    fn default() -> Self {
        Self {
            prompt: Style::default().fg(Color::Cyan),
            text: Style::default(),
            placeholder: Style::default().fg(Color::DarkGray),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            busy: Style::default().fg(Color::Yellow),
        }
    }
}

/// A submit-on-enter search input.
pub struct Search {
    editor: QueryBuffer,
    placeholder: String,
    loading: bool,
    focus: bool,
    style: SearchStyle,
}

impl Default for Search {
    fn default() -> Self {
        Self::new()
    }
}

impl Search {
    /// Create an empty search field.
    pub fn new() -> Self {
        Self {
            editor: QueryBuffer::new(),
            placeholder: "Search".to_string(),
            loading: false,
            focus: false,
            style: SearchStyle::default(),
        }
    }

    /// Set the placeholder text.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the style.
    pub fn with_style(mut self, style: SearchStyle) -> Self {
        self.style = style;
        self
    }

    /// The current term.
    pub fn term(&self) -> String {
        self.editor.value()
    }

    /// Set the term programmatically.
    pub fn set_term(&mut self, term: &str) {
        self.editor.set_value(term);
    }

    /// Whether a search is in flight. While set, Enter is suppressed.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Mark a search as started/finished.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Set focus state.
    pub fn set_focused(&mut self, focused: bool) {
        self.focus = focused;
    }
}

impl Component for Search {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) => match (key.code, key.modifiers) {
                (KeyCode::Enter, _) => {
                    if self.loading {
                        Command::none()
                    } else {
                        Command::message(Message::Submit(self.editor.value()))
                    }
                }
                (KeyCode::Esc, _) => {
                    if self.editor.is_empty() {
                        Command::none()
                    } else {
                        self.editor.reset();
                        Command::message(Message::Cleared)
                    }
                }
                (KeyCode::Backspace, _) => {
                    if self.editor.delete_back() {
                        Command::message(Message::Changed(self.editor.value()))
                    } else {
                        Command::none()
                    }
                }
                (KeyCode::Delete, _) => {
                    if self.editor.delete_forward() {
                        Command::message(Message::Changed(self.editor.value()))
                    } else {
                        Command::none()
                    }
                }
                (KeyCode::Left, _) => {
                    self.editor.move_left();
                    Command::none()
                }
                (KeyCode::Right, _) => {
                    self.editor.move_right();
                    Command::none()
                }
                (KeyCode::Home, _) => {
                    self.editor.move_home();
                    Command::none()
                }
                (KeyCode::End, _) => {
                    self.editor.move_end();
                    Command::none()
                }
                (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                    self.editor.insert_char(c);
                    Command::message(Message::Changed(self.editor.value()))
                }
                _ => Command::none(),
            },
            Message::Changed(_) | Message::Submit(_) | Message::Cleared => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }

        let mut spans = vec![Span::styled("⌕ ", self.style.prompt)];

        let chars = self.editor.chars();
        let cursor = self.editor.cursor();
        if chars.is_empty() {
            spans.push(Span::styled(self.placeholder.clone(), self.style.placeholder));
            if self.focus {
                spans.push(Span::styled(" ", self.style.cursor));
            }
        } else {
            let before: String = chars[..cursor].iter().collect();
            if !before.is_empty() {
                spans.push(Span::styled(before, self.style.text));
            }
            if cursor < chars.len() {
                let cursor_char: String = chars[cursor..cursor + 1].iter().collect();
                spans.push(Span::styled(cursor_char, self.style.cursor));
                let after: String = chars[cursor + 1..].iter().collect();
                if !after.is_empty() {
                    spans.push(Span::styled(after, self.style.text));
                }
            } else {
                spans.push(Span::styled(" ", self.style.cursor));
            }
        }

        if self.loading {
            spans.push(Span::styled(" …", self.style.busy));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use taro_core::testing::ComponentHarness;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_str(search: &mut Search, text: &str) {
        for c in text.chars() {
            search.update(Message::KeyPress(key(KeyCode::Char(c))));
        }
    }

    #[test]
    fn typing_updates_term() {
        let mut search = Search::new();
        type_str(&mut search, "rust");
        assert_eq!(search.term(), "rust");
    }

    #[test]
    fn enter_submits_term() {
        let mut search = Search::new();
        type_str(&mut search, "tui");
        let cmd = search.update(Message::KeyPress(key(KeyCode::Enter)));
        assert!(matches!(cmd.into_message(), Some(Message::Submit(t)) if t == "tui"));
    }

    #[test]
    fn loading_suppresses_submit() {
        let mut search = Search::new();
        type_str(&mut search, "tui");
        search.set_loading(true);
        let cmd = search.update(Message::KeyPress(key(KeyCode::Enter)));
        assert!(cmd.is_none());
    }

    #[test]
    fn esc_clears() {
        let mut search = Search::new();
        type_str(&mut search, "abc");
        let cmd = search.update(Message::KeyPress(key(KeyCode::Esc)));
        assert_eq!(search.term(), "");
        assert!(matches!(cmd.into_message(), Some(Message::Cleared)));

        // second Esc is a no-op
        let cmd = search.update(Message::KeyPress(key(KeyCode::Esc)));
        assert!(cmd.is_none());
    }

    #[test]
    fn view_shows_placeholder_then_term() {
        let mut search = Search::new().with_placeholder("Find things");
        {
            let harness = ComponentHarness::new(Search::new().with_placeholder("Find things"));
            assert!(harness.render_string(30, 1).contains("Find things"));
        }
        type_str(&mut search, "boba");
        let harness = ComponentHarness::new(search);
        assert!(harness.render_string(30, 1).contains("boba"));
    }

    #[test]
    fn view_shows_busy_marker() {
        let mut search = Search::new();
        search.set_loading(true);
        let harness = ComponentHarness::new(search);
        assert!(harness.render_string(30, 1).contains('…'));
    }
}
