//! # Combobox Example
//!
//! A multi-select tag picker with creatable entries: type to filter, Enter
//! to select, type something new and Enter to create it. Selected tags show
//! as chips; with an empty input, Left/Right rove across them and
//! Backspace/Delete remove.
//!
//! Run with: `cargo run --example combobox`

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::{DefaultTerminal, Frame};
use taro::widgets::combobox::{self, Combobox};
use taro::widgets::item::Item;
use taro::Component;
use tokio::sync::mpsc;

const LANGUAGES: &[&str] = &[
    "C", "C++", "Elixir", "Erlang", "Go", "Haskell", "Java", "JavaScript", "Kotlin", "Lua",
    "OCaml", "Python", "Ruby", "Rust", "Scala", "Swift", "TypeScript", "Zig",
];

struct App {
    combo: Combobox,
    status: String,
}

impl App {
    fn new() -> Self {
        let mut combo = Combobox::new(LANGUAGES.iter().map(|&l| Item::text(l)).collect())
            .multi()
            .with_placeholder("Type to filter, Enter to select…")
            .with_max_visible(8)
            .with_dropdown_block(Block::default().borders(Borders::ALL).title(" Languages "));
        combo.set_focused(true);
        App {
            combo,
            status: String::new(),
        }
    }

    fn update(&mut self, msg: combobox::Message) -> taro::Command<combobox::Message> {
        match &msg {
            combobox::Message::SelectionChanged(selected) => {
                self.status = format!("{} selected", selected.len());
            }
            combobox::Message::Created(item) => {
                self.status = format!("created \"{}\"", item.value());
            }
            _ => {}
        }
        self.combo.update(msg)
    }

    fn view(&self, frame: &mut Frame) {
        let [title_area, input_area, _dropdown_area, status_area, help_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(11),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        frame.render_widget(
            Paragraph::new(Span::styled(
                "Language Picker",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            title_area,
        );

        // The combobox gets the input row plus the space below for its dropdown
        let combo_area = Rect {
            height: 12,
            ..input_area
        };
        self.combo.view(frame, combo_area);

        if !self.status.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    &self.status,
                    Style::default().fg(Color::Green),
                )),
                status_area,
            );
        }

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Type", Style::default().fg(Color::DarkGray)),
                Span::raw(" filter/create  "),
                Span::styled("Enter", Style::default().fg(Color::DarkGray)),
                Span::raw(" select  "),
                Span::styled("←/→", Style::default().fg(Color::DarkGray)),
                Span::raw(" chips  "),
                Span::styled("Ctrl+C", Style::default().fg(Color::DarkGray)),
                Span::raw(" quit"),
            ])),
            help_area,
        );
    }
}

async fn run(terminal: &mut DefaultTerminal) -> std::io::Result<()> {
    let mut app = App::new();
    let mut events = EventStream::new();
    let (tx, mut rx) = mpsc::unbounded_channel();

    loop {
        terminal.draw(|frame| app.view(frame))?;

        tokio::select! {
            Some(Ok(event)) = events.next() => {
                if let Event::Key(key) = event {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        return Ok(());
                    }
                    app.update(combobox::Message::KeyPress(key)).dispatch(&tx);
                }
            }
            Some(msg) = rx.recv() => {
                app.update(msg).dispatch(&tx);
            }
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let mut terminal = ratatui::init();
    let result = run(&mut terminal).await;
    ratatui::restore();
    result
}
