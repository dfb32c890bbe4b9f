//! # Form Example
//!
//! A small settings form: a search field, a toggle, and a status banner
//! that fades out through the deferred dismissal callback. Tab moves focus
//! between the fields; submitting the search raises a success alert that
//! auto-dismisses after two seconds.
//!
//! Run with: `cargo run --example form`

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{DefaultTerminal, Frame};
use std::time::Duration;
use taro::widgets::alert::{self, Alert, AlertVariant};
use taro::widgets::search::{self, Search};
use taro::widgets::toggle::{self, Toggle};
use taro::{Command, Component};
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
enum Msg {
    Search(search::Message),
    Toggle(toggle::Message),
    Banner(alert::Message),
    FocusNext,
}

struct App {
    search: Search,
    toggle: Toggle,
    banner: Option<Alert>,
    focus: usize,
}

impl App {
    fn new() -> Self {
        let mut search = Search::new().with_placeholder("Search settings");
        search.set_focused(true);
        App {
            search,
            toggle: Toggle::new("Case-sensitive matching"),
            banner: None,
            focus: 0,
        }
    }

    fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % 2;
        self.search.set_focused(self.focus == 0);
        self.toggle.set_focused(self.focus == 1);
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Search(search::Message::Submit(ref term)) => {
                let banner = Alert::new(format!("searched for \"{term}\""))
                    .with_variant(AlertVariant::Success)
                    .dismissible();
                self.banner = Some(banner);
                // auto-dismiss shortly after the result lands
                Command::tick(Duration::from_secs(2), |_| {
                    Msg::Banner(alert::Message::Dismiss)
                })
            }
            Msg::Search(m) => self.search.update(m).map(Msg::Search),
            Msg::Toggle(m) => self.toggle.update(m).map(Msg::Toggle),
            Msg::Banner(alert::Message::Dismissed) => {
                self.banner = None;
                Command::none()
            }
            Msg::Banner(m) => match self.banner.as_mut() {
                Some(banner) => banner.update(m).map(Msg::Banner),
                None => Command::none(),
            },
            Msg::FocusNext => {
                self.focus_next();
                Command::none()
            }
        }
    }

    fn on_key(&mut self, key: crossterm::event::KeyEvent) -> Command<Msg> {
        if key.code == KeyCode::Tab {
            return self.update(Msg::FocusNext);
        }
        match self.focus {
            0 => self.update(Msg::Search(search::Message::KeyPress(key))),
            _ => self.update(Msg::Toggle(toggle::Message::KeyPress(key))),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let [title_area, banner_area, search_area, toggle_area, _rest, help_area] =
            Layout::vertical([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Fill(1),
                Constraint::Length(1),
            ])
            .areas(frame.area());

        frame.render_widget(
            Paragraph::new(Span::styled(
                "Settings",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            title_area,
        );

        if let Some(ref banner) = self.banner {
            banner.view(frame, banner_area);
        }
        self.search.view(frame, search_area);
        self.toggle.view(frame, toggle_area);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Tab", Style::default().fg(Color::DarkGray)),
                Span::raw(" focus  "),
                Span::styled("Enter", Style::default().fg(Color::DarkGray)),
                Span::raw(" submit/flip  "),
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
                    app.on_key(key).dispatch(&tx);
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
