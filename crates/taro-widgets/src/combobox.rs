//! Combobox: a filter input with a dropdown of candidates and, in multi
//! mode, selected-item chips with roving keyboard focus.
//!
//! The widget is a thin shell: all selection semantics live in
//! [`ComboState`](crate::combo::ComboState). Keys edit the query or steer
//! the dropdown highlight; engine effects surface as widget messages.
//!
//! # Example
//!
//! ```ignore
//! use taro_widgets::combobox::Combobox;
//!
//! let combo = Combobox::new(vec!["Red".into(), "Green".into(), "Blue".into()])
//!     .multi()
//!     .with_placeholder("Pick colors…")
//!     .with_max_visible(6);
//! ```

use crate::combo::{Active, ComboEffect, ComboEvent, ComboState};
use crate::item::Item;
use crate::query::QueryBuffer;
use crate::textwidth;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;
use taro_core::command::Command;
use taro_core::component::Component;

/// Messages for the combobox component.
#[derive(Debug, Clone)]
pub enum Message {
    /// A key press event.
    KeyPress(KeyEvent),
    /// The query changed.
    Changed(String),
    /// The selection changed; carries the full selection in display order.
    SelectionChanged(Vec<Item>),
    /// A created entry was accepted on a controlled candidate list.
    Created(Item),
    /// Deferred removal was requested for this item.
    RemoveRequested(Item),
    /// The dropdown was dismissed.
    Dismissed,
}

/// Style configuration for the combobox.
#[derive(Debug, Clone)]
pub struct ComboboxStyle {
    /// Style for the query text.
    pub input: Style,
    /// Style for the placeholder text.
    pub placeholder: Style,
    /// Style for the cursor.
    pub cursor: Style,
    /// Style for selected-item chips.
    pub chip: Style,
    /// Style for the chip holding roving focus.
    pub active_chip: Style,
    /// Style for unhighlighted dropdown items.
    pub item: Style,
    /// Style for the highlighted dropdown item.
    pub highlighted_item: Style,
    /// Style for the synthetic "create from query" entry.
    pub created_item: Style,
}

impl Default for ComboboxStyle {
    fn default() -> Self {
        Self {
            input: Style::default(),
            placeholder: Style::default().fg(Color::DarkGray),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            chip: Style::default().fg(Color::Black).bg(Color::Cyan),
            active_chip: Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            item: Style::default(),
            highlighted_item: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            created_item: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::ITALIC),
        }
    }
}

/// Filterable selection input with dropdown and chips.
pub struct Combobox {
    state: ComboState,
    editor: QueryBuffer,
    highlight: usize,
    scroll_offset: usize,
    max_visible: usize,
    focus: bool,
    placeholder: String,
    style: ComboboxStyle,
    dropdown_block: Option<Block<'static>>,
    max_chip_width: usize,
}

impl Combobox {
    /// Create a single-select combobox over the given candidates.
    pub fn new(candidates: Vec<Item>) -> Self {
        Self::from_state(ComboState::new(candidates))
    }

    /// Wrap an already-configured [`ComboState`] (custom projection,
    /// transform, diagnostics, deferred removal, …).
    pub fn from_state(state: ComboState) -> Self {
        Self {
            state,
            editor: QueryBuffer::new(),
            highlight: 0,
            scroll_offset: 0,
            max_visible: 8,
            focus: false,
            placeholder: String::new(),
            style: ComboboxStyle::default(),
            dropdown_block: None,
            max_chip_width: 24,
        }
    }

    /// Switch to multi-select.
    pub fn multi(mut self) -> Self {
        self.state = self.state.multi();
        self
    }

    /// Mark the candidate list as host-controlled.
    pub fn controlled(mut self) -> Self {
        self.state = self.state.controlled();
        self
    }

    /// Disable the synthetic "create from query" entry.
    pub fn without_creation(mut self) -> Self {
        self.state = self.state.without_creation();
        self
    }

    /// Set the placeholder text shown while the query is empty.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the maximum number of visible dropdown items before scrolling.
    pub fn with_max_visible(mut self, max: usize) -> Self {
        self.max_visible = max.max(1);
        self
    }

    /// Set the style.
    pub fn with_style(mut self, style: ComboboxStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the block (border/title container) for the dropdown overlay.
    pub fn with_dropdown_block(mut self, block: Block<'static>) -> Self {
        self.dropdown_block = Some(block);
        self
    }

    /// The selection engine, for reads.
    pub fn combo(&self) -> &ComboState {
        &self.state
    }

    /// Current query text.
    pub fn query(&self) -> &str {
        self.state.query()
    }

    /// The selection in display order.
    pub fn selected(&self) -> &[Item] {
        self.state.selected()
    }

    /// Whether the dropdown is currently visible.
    pub fn is_dropdown_visible(&self) -> bool {
        self.state.is_open() && !self.state.filtered().is_empty()
    }

    /// The dropdown item the highlight is on, if any.
    pub fn highlighted(&self) -> Option<Item> {
        self.state.filtered_candidates().nth(self.highlight)
    }

    /// Replace the candidate list (controlled hosts, resolved fetches).
    pub fn replace_candidates(&mut self, items: Vec<Item>) {
        self.state.apply(ComboEvent::ReplaceCandidates(items));
        self.clamp_highlight();
    }

    /// Set focus state. Losing focus closes the dropdown and clears the
    /// query, so no stale partial text lingers after blur.
    pub fn set_focused(&mut self, focused: bool) {
        self.focus = focused;
        if !focused {
            self.state.apply(ComboEvent::Close);
            self.sync_editor();
        }
    }

    fn sync_editor(&mut self) {
        if self.state.query() != self.editor.value() {
            let query = self.state.query().to_string();
            self.editor.set_value(&query);
        }
    }

    fn clamp_highlight(&mut self) {
        let len = self.state.filtered_candidates().count();
        if len == 0 {
            self.highlight = 0;
            self.scroll_offset = 0;
        } else if self.highlight >= len {
            self.highlight = len - 1;
        }
        self.ensure_highlight_visible();
    }

    fn ensure_highlight_visible(&mut self) {
        if self.highlight < self.scroll_offset {
            self.scroll_offset = self.highlight;
        } else if self.highlight >= self.scroll_offset + self.max_visible {
            self.scroll_offset = self.highlight.saturating_sub(self.max_visible - 1);
        }
    }

    fn edited(&mut self) -> Command<Message> {
        let effects = self
            .state
            .apply(ComboEvent::SetQuery(self.editor.value()));
        self.state.apply(ComboEvent::Open);
        self.highlight = 0;
        self.scroll_offset = 0;
        self.effects_to_command(effects)
    }

    fn commit_highlighted(&mut self) -> Command<Message> {
        let item = self.highlighted();
        let effects = self.state.apply(ComboEvent::Commit(item));
        self.sync_editor();
        self.highlight = 0;
        self.scroll_offset = 0;
        self.effects_to_command(effects)
    }

    fn remove_chip(&mut self, index: usize) -> Command<Message> {
        let Some(item) = self.state.selected().get(index).cloned() else {
            return Command::none();
        };
        let effects = self.state.apply(ComboEvent::Remove(item));
        self.effects_to_command(effects)
    }

    /// Move roving chip focus so it lands where the key points spatially:
    /// chips sit left of the input, so Left from the input jumps to the last
    /// chip and Right from the last chip returns to the input.
    fn rove_left(&mut self) {
        let delta = match self.state.active() {
            Active::None | Active::Input => self.state.selected().len() as isize,
            Active::Chip(_) => -1,
        };
        self.state.apply(ComboEvent::MoveActive(delta));
    }

    fn rove_right(&mut self) {
        if let Active::Chip(chip) = self.state.active() {
            let last = self.state.selected().len().saturating_sub(1);
            let delta = if chip == last { -(chip as isize) - 1 } else { 1 };
            self.state.apply(ComboEvent::MoveActive(delta));
        }
    }

    fn effects_to_command(&self, effects: Vec<ComboEffect>) -> Command<Message> {
        Command::batch(effects.into_iter().map(|effect| {
            Command::message(match effect {
                ComboEffect::InputValueChanged { query, .. } => Message::Changed(query),
                ComboEffect::ItemCreated(item) => Message::Created(item),
                ComboEffect::RemoveRequested(item) => Message::RemoveRequested(item),
                ComboEffect::SelectionChanged(selected) => Message::SelectionChanged(selected),
            })
        }))
    }

    fn on_key(&mut self, key: KeyEvent) -> Command<Message> {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => {
                if self.state.is_open() {
                    let effects = self.state.apply(ComboEvent::Close);
                    self.sync_editor();
                    Command::batch([
                        self.effects_to_command(effects),
                        Command::message(Message::Dismissed),
                    ])
                } else {
                    Command::none()
                }
            }
            (KeyCode::Down, _) => {
                if self.state.is_open() {
                    let len = self.state.filtered_candidates().count();
                    if self.highlight + 1 < len {
                        self.highlight += 1;
                        self.ensure_highlight_visible();
                    }
                } else {
                    self.state.apply(ComboEvent::Open);
                }
                Command::none()
            }
            (KeyCode::Up, _) if self.state.is_open() => {
                if self.highlight > 0 {
                    self.highlight -= 1;
                    self.ensure_highlight_visible();
                }
                Command::none()
            }
            (KeyCode::Enter, _) | (KeyCode::Tab, _) => {
                if self.state.is_open() {
                    self.commit_highlighted()
                } else {
                    self.state.apply(ComboEvent::Open);
                    Command::none()
                }
            }
            (KeyCode::Backspace, _) => {
                if self.editor.delete_back() {
                    self.edited()
                } else if let Active::Chip(chip) = self.state.active() {
                    self.remove_chip(chip)
                } else if !self.state.selected().is_empty() {
                    // empty query: peel off the most recent chip
                    self.remove_chip(self.state.selected().len() - 1)
                } else {
                    Command::none()
                }
            }
            (KeyCode::Delete, _) => {
                if self.editor.delete_forward() {
                    self.edited()
                } else if let Active::Chip(chip) = self.state.active() {
                    self.remove_chip(chip)
                } else {
                    Command::none()
                }
            }
            (KeyCode::Left, _) => {
                if self.editor.is_empty() && !self.state.selected().is_empty() {
                    self.rove_left();
                } else {
                    self.editor.move_left();
                }
                Command::none()
            }
            (KeyCode::Right, _) => {
                if self.editor.is_empty() && !self.state.selected().is_empty() {
                    self.rove_right();
                } else {
                    self.editor.move_right();
                }
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
                self.edited()
            }
            _ => Command::none(),
        }
    }
}

impl Component for Combobox {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) => self.on_key(key),
            Message::Changed(_)
            | Message::SelectionChanged(_)
            | Message::Created(_)
            | Message::RemoveRequested(_)
            | Message::Dismissed => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }

        // Input line: chips, then the query with a cursor
        let input_area = Rect { height: 1, ..area };
        let mut spans = Vec::new();

        for (index, item) in self.state.selected().iter().enumerate() {
            let style = if self.state.active() == Active::Chip(index) {
                self.style.active_chip
            } else {
                self.style.chip
            };
            let label = textwidth::truncate(item.label(), self.max_chip_width);
            spans.push(Span::styled(format!(" {label} "), style));
            spans.push(Span::raw(" "));
        }

        let chars = self.editor.chars();
        let cursor = self.editor.cursor();
        if chars.is_empty() {
            if !self.placeholder.is_empty() {
                spans.push(Span::styled(
                    self.placeholder.clone(),
                    self.style.placeholder,
                ));
            } else if self.focus {
                spans.push(Span::styled(" ", self.style.cursor));
            }
        } else {
            let before: String = chars[..cursor].iter().collect();
            if !before.is_empty() {
                spans.push(Span::styled(before, self.style.input));
            }
            if cursor < chars.len() {
                let cursor_char: String = chars[cursor..cursor + 1].iter().collect();
                spans.push(Span::styled(cursor_char, self.style.cursor));
                let after: String = chars[cursor + 1..].iter().collect();
                if !after.is_empty() {
                    spans.push(Span::styled(after, self.style.input));
                }
            } else {
                spans.push(Span::styled(" ", self.style.cursor));
            }
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), input_area);

        // Dropdown overlay below the input
        let filtered = self.state.filtered();
        if !(self.state.is_open() && !filtered.is_empty() && area.height > 1) {
            return;
        }

        let visible_count = filtered.len().min(self.max_visible);
        let dropdown_height = if self.dropdown_block.is_some() {
            (visible_count as u16 + 2).min(area.height - 1) // +2 for borders
        } else {
            (visible_count as u16).min(area.height - 1)
        };
        let dropdown_area = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: dropdown_height,
        };

        frame.render_widget(Clear, dropdown_area);

        let inner = if let Some(ref block) = self.dropdown_block {
            let inner = block.inner(dropdown_area);
            frame.render_widget(block.clone(), dropdown_area);
            inner
        } else {
            dropdown_area
        };

        let end = (self.scroll_offset + self.max_visible).min(filtered.len());
        for (row, index) in (self.scroll_offset..end).enumerate() {
            if row as u16 >= inner.height {
                break;
            }
            let item_area = Rect {
                x: inner.x,
                y: inner.y + row as u16,
                width: inner.width,
                height: 1,
            };
            let item = &filtered[index];
            let style = if index == self.highlight {
                self.style.highlighted_item
            } else if item.is_created() {
                self.style.created_item
            } else {
                self.style.item
            };
            let prefix = if index == self.highlight { "▸ " } else { "  " };
            let label = if item.is_created() {
                format!("{prefix}+ {}", item.label())
            } else {
                format!("{prefix}{}", item.label())
            };
            let max_width = item_area.width as usize;
            frame.render_widget(
                Paragraph::new(Span::styled(textwidth::truncate(&label, max_width), style)),
                item_area,
            );
        }
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
