//! Month calendar with keyboard-driven date focus.
//!
//! One date holds the focus; arrow keys move it a day or a week at a time
//! (crossing month boundaries), PageUp/PageDown move a month, Home/End jump
//! within the focused week. Enter selects the focused date and closes the
//! calendar; Esc closes without selecting. Opening decides whether the day
//! grid or the header receives focus — the same bookkeeping a focus trap
//! needs, kept here so hosts can drive real focus from it.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use taro_core::command::Command;
use taro_core::component::Component;

/// Messages for the calendar component.
#[derive(Debug, Clone)]
pub enum Message {
    /// A key press event.
    KeyPress(KeyEvent),
    /// Open the calendar. `focus_day` puts focus on the day grid instead of
    /// the header.
    Open {
        /// Whether the day grid should receive focus immediately.
        focus_day: bool,
    },
    /// Close the calendar without selecting.
    Close,
    /// Emitted when a date is selected.
    DateChanged(NaiveDate),
    /// Emitted when the calendar closes.
    Closed,
}

/// Style configuration for the calendar.
#[derive(Debug, Clone)]
pub struct CalendarStyle {
    /// Style for the month/year header.
    pub header: Style,
    /// Style for the weekday column captions.
    pub weekdays: Style,
    /// Style for ordinary days.
    pub day: Style,
    /// Style for the focused day.
    pub focused_day: Style,
    /// Style for the selected day.
    pub selected_day: Style,
}

impl Default for CalendarStyle {
    fn default() -> Self {
        Self {
            header: Style::default().add_modifier(Modifier::BOLD),
            weekdays: Style::default().fg(Color::DarkGray),
            day: Style::default(),
            focused_day: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            selected_day: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),
        }
    }
}

/// A month calendar for picking one date.
pub struct Calendar {
    focused_date: NaiveDate,
    selected: Option<NaiveDate>,
    open: bool,
    day_focusable: bool,
    header_focused: bool,
    week_start: Weekday,
    focus: bool,
    style: CalendarStyle,
}

impl Calendar {
    /// Create a calendar focused on the given date.
    pub fn new(focused_date: NaiveDate) -> Self {
        Self {
            focused_date,
            selected: None,
            open: false,
            day_focusable: false,
            header_focused: false,
            week_start: Weekday::Sun,
            focus: false,
            style: CalendarStyle::default(),
        }
    }

    /// Set the first day of the week (default Sunday).
    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    /// Set the style.
    pub fn with_style(mut self, style: CalendarStyle) -> Self {
        self.style = style;
        self
    }

    /// The date currently holding keyboard focus.
    pub fn focused_date(&self) -> NaiveDate {
        self.focused_date
    }

    /// The selected date, if any.
    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    /// Whether the calendar is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the day grid is focusable (vs. the header).
    pub fn day_focusable(&self) -> bool {
        self.day_focusable
    }

    /// Whether the header holds focus.
    pub fn header_focused(&self) -> bool {
        self.header_focused
    }

    /// Set widget-level focus state.
    pub fn set_focused(&mut self, focused: bool) {
        self.focus = focused;
        if !focused {
            self.day_focusable = false;
        }
    }

    /// Offset of `date`'s weekday from the configured week start, 0–6.
    fn week_offset(&self, date: NaiveDate) -> u64 {
        let day = date.weekday().num_days_from_monday() as u64;
        let start = self.week_start.num_days_from_monday() as u64;
        (7 + day - start) % 7
    }

    fn shift_days(&mut self, days: i64) {
        let next = if days >= 0 {
            self.focused_date.checked_add_days(Days::new(days as u64))
        } else {
            self.focused_date.checked_sub_days(Days::new((-days) as u64))
        };
        if let Some(date) = next {
            self.focused_date = date;
        }
    }

    fn shift_months(&mut self, months: i32) {
        let next = if months >= 0 {
            self.focused_date.checked_add_months(Months::new(months as u32))
        } else {
            self.focused_date.checked_sub_months(Months::new((-months) as u32))
        };
        if let Some(date) = next {
            self.focused_date = date;
        }
    }

    /// The focused month as week rows; `None` cells pad the first and last
    /// week to the configured week start.
    pub fn month_grid(&self) -> Vec<Vec<Option<NaiveDate>>> {
        let Some(first) = self.focused_date.with_day(1) else {
            return Vec::new();
        };
        let leading = self.week_offset(first) as usize;
        let days_in_month = first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .map(|last| last.day() as usize)
            .unwrap_or(28);

        let mut weeks = Vec::new();
        let mut week: Vec<Option<NaiveDate>> = vec![None; leading];
        for day in 1..=days_in_month {
            week.push(first.with_day(day as u32));
            if week.len() == 7 {
                weeks.push(std::mem::take(&mut week));
            }
        }
        if !week.is_empty() {
            week.resize(7, None);
            weeks.push(week);
        }
        weeks
    }

    fn select_focused(&mut self) -> Command<Message> {
        self.selected = Some(self.focused_date);
        let date = self.focused_date;
        self.close();
        Command::batch([
            Command::message(Message::DateChanged(date)),
            Command::message(Message::Closed),
        ])
    }

    fn close(&mut self) {
        self.open = false;
        self.day_focusable = false;
        self.header_focused = false;
    }

    fn on_key(&mut self, key: KeyEvent) -> Command<Message> {
        if !self.open {
            return Command::none();
        }
        match key.code {
            KeyCode::Left => {
                self.shift_days(-1);
                Command::none()
            }
            KeyCode::Right => {
                self.shift_days(1);
                Command::none()
            }
            KeyCode::Up => {
                self.shift_days(-7);
                Command::none()
            }
            KeyCode::Down => {
                self.shift_days(7);
                Command::none()
            }
            KeyCode::PageUp => {
                self.shift_months(-1);
                Command::none()
            }
            KeyCode::PageDown => {
                self.shift_months(1);
                Command::none()
            }
            KeyCode::Home => {
                let offset = self.week_offset(self.focused_date) as i64;
                self.shift_days(-offset);
                Command::none()
            }
            KeyCode::End => {
                let offset = self.week_offset(self.focused_date) as i64;
                self.shift_days(6 - offset);
                Command::none()
            }
            KeyCode::Enter => self.select_focused(),
            KeyCode::Esc => {
                self.close();
                Command::message(Message::Closed)
            }
            _ => Command::none(),
        }
    }
}

impl Component for Calendar {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) => self.on_key(key),
            Message::Open { focus_day } => {
                self.open = true;
                self.day_focusable = focus_day;
                self.header_focused = !focus_day;
                Command::none()
            }
            Message::Close => {
                if self.open {
                    self.close();
                    Command::message(Message::Closed)
                } else {
                    Command::none()
                }
            }
            Message::DateChanged(_) | Message::Closed => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if !self.open || area.height == 0 {
            return;
        }

        let header = self.focused_date.format("%B %Y").to_string();
        frame.render_widget(
            Paragraph::new(Span::styled(format!(" {header}"), self.style.header)),
            Rect { height: 1, ..area },
        );

        if area.height < 2 {
            return;
        }

        // Weekday captions in week-start order
        let mut captions = Vec::new();
        let mut weekday = self.week_start;
        for _ in 0..7 {
            let caption = match weekday {
                Weekday::Mon => "Mo",
                Weekday::Tue => "Tu",
                Weekday::Wed => "We",
                Weekday::Thu => "Th",
                Weekday::Fri => "Fr",
                Weekday::Sat => "Sa",
                Weekday::Sun => "Su",
            };
            captions.push(Span::styled(format!(" {caption}"), self.style.weekdays));
            weekday = weekday.succ();
        }
        frame.render_widget(
            Paragraph::new(Line::from(captions)),
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );

        for (row, week) in self.month_grid().iter().enumerate() {
            let y = area.y + 2 + row as u16;
            if y >= area.y + area.height {
                break;
            }
            let mut spans = Vec::new();
            for cell in week {
                match cell {
                    Some(date) => {
                        let style = if *date == self.focused_date && self.day_focusable {
                            self.style.focused_day
                        } else if Some(*date) == self.selected {
                            self.style.selected_day
                        } else {
                            self.style.day
                        };
                        spans.push(Span::styled(format!("{:>3}", date.day()), style));
                    }
                    None => spans.push(Span::raw("   ")),
                }
            }
            frame.render_widget(
                Paragraph::new(Line::from(spans)),
                Rect { y, height: 1, ..area },
            );
        }
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn open_calendar(focused: NaiveDate) -> Calendar {
        let mut cal = Calendar::new(focused);
        cal.update(Message::Open { focus_day: true });
        cal
    }

    #[test]
    fn arrows_cross_month_boundaries() {
        let mut cal = open_calendar(date(2026, 1, 31));
        cal.update(Message::KeyPress(key(KeyCode::Right)));
        assert_eq!(cal.focused_date(), date(2026, 2, 1));

        cal.update(Message::KeyPress(key(KeyCode::Left)));
        assert_eq!(cal.focused_date(), date(2026, 1, 31));
    }

    #[test]
    fn up_down_move_a_week() {
        let mut cal = open_calendar(date(2026, 8, 7));
        cal.update(Message::KeyPress(key(KeyCode::Down)));
        assert_eq!(cal.focused_date(), date(2026, 8, 14));
        cal.update(Message::KeyPress(key(KeyCode::Up)));
        cal.update(Message::KeyPress(key(KeyCode::Up)));
        assert_eq!(cal.focused_date(), date(2026, 7, 31));
    }

    #[test]
    fn page_keys_move_a_month_and_clamp_day() {
        let mut cal = open_calendar(date(2026, 1, 31));
        cal.update(Message::KeyPress(key(KeyCode::PageDown)));
        // February has no 31st; the day clamps
        assert_eq!(cal.focused_date(), date(2026, 2, 28));
        cal.update(Message::KeyPress(key(KeyCode::PageUp)));
        assert_eq!(cal.focused_date(), date(2026, 1, 28));
    }

    #[test]
    fn home_end_jump_within_week() {
        // 2026-08-07 is a Friday; with Sunday week start the week runs 08-02..08-08
        let mut cal = open_calendar(date(2026, 8, 7));
        cal.update(Message::KeyPress(key(KeyCode::Home)));
        assert_eq!(cal.focused_date(), date(2026, 8, 2));
        cal.update(Message::KeyPress(key(KeyCode::End)));
        assert_eq!(cal.focused_date(), date(2026, 8, 8));
    }

    #[test]
    fn week_start_affects_home() {
        let mut cal = Calendar::new(date(2026, 8, 7)).with_week_start(Weekday::Mon);
        cal.update(Message::Open { focus_day: true });
        cal.update(Message::KeyPress(key(KeyCode::Home)));
        assert_eq!(cal.focused_date(), date(2026, 8, 3));
    }

    #[test]
    fn enter_selects_and_closes() {
        let mut cal = open_calendar(date(2026, 8, 7));
        let cmd = cal.update(Message::KeyPress(key(KeyCode::Enter)));
        assert_eq!(cal.selected(), Some(date(2026, 8, 7)));
        assert!(!cal.is_open());
        let msgs = cmd.into_messages();
        assert!(matches!(msgs[0], Message::DateChanged(d) if d == date(2026, 8, 7)));
        assert!(matches!(msgs[1], Message::Closed));
    }

    #[test]
    fn esc_closes_without_selecting() {
        let mut cal = open_calendar(date(2026, 8, 7));
        let cmd = cal.update(Message::KeyPress(key(KeyCode::Esc)));
        assert!(cal.selected().is_none());
        assert!(!cal.is_open());
        assert!(matches!(cmd.into_message(), Some(Message::Closed)));
    }

    #[test]
    fn open_decides_initial_focus() {
        let mut cal = Calendar::new(date(2026, 8, 7));
        cal.update(Message::Open { focus_day: false });
        assert!(cal.header_focused());
        assert!(!cal.day_focusable());

        cal.update(Message::Close);
        cal.update(Message::Open { focus_day: true });
        assert!(cal.day_focusable());
        assert!(!cal.header_focused());
    }

    #[test]
    fn keys_ignored_while_closed() {
        let mut cal = Calendar::new(date(2026, 8, 7));
        let cmd = cal.update(Message::KeyPress(key(KeyCode::Right)));
        assert!(cmd.is_none());
        assert_eq!(cal.focused_date(), date(2026, 8, 7));
    }

    #[test]
    fn month_grid_shape() {
        // August 2026 starts on a Saturday; Sunday week start gives 6 leading pads
        let cal = Calendar::new(date(2026, 8, 7));
        let grid = cal.month_grid();
        assert!(grid.iter().all(|week| week.len() == 7));
        assert_eq!(grid[0].iter().filter(|cell| cell.is_none()).count(), 6);
        assert_eq!(grid[0][6], Some(date(2026, 8, 1)));
        let days: usize = grid
            .iter()
            .flatten()
            .filter(|cell| cell.is_some())
            .count();
        assert_eq!(days, 31);
    }
}
