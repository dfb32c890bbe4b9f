//! File intake with drag-state bookkeeping, validation, and per-file
//! processing status.
//!
//! The widget tracks state only — the host wires real drag/drop or file
//! dialog events into [`Message`]s and performs the actual transfer.
//! Dropped files are validated against the configured accept list and size
//! bounds; rejected files stay in the list with their errors attached, so
//! the user can see why. [`Message::Send`] hands every valid, not-yet
//! processed file back to the host via [`Message::SendRequested`]; the host
//! reports progress and completion per file.

use crate::textwidth;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use std::path::PathBuf;
use taro_core::command::Command;
use taro_core::component::Component;
use thiserror::Error;

/// Why a file was rejected at intake.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// The file's extension is not in the accept list.
    #[error("file type .{0} is not accepted")]
    TypeNotAccepted(String),
    /// The file exceeds the maximum size.
    #[error("file is larger than {max} bytes")]
    TooLarge {
        /// The configured maximum.
        max: u64,
    },
    /// The file is below the minimum size.
    #[error("file is smaller than {min} bytes")]
    TooSmall {
        /// The configured minimum.
        min: u64,
    },
}

/// Hover/validation state of the drop zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// Nothing hovering, no errors.
    #[default]
    Default,
    /// Something hovers; acceptability unknown.
    DragActive,
    /// Something hovers and would be accepted.
    DragAccept,
    /// Something hovers and would be rejected.
    DragReject,
    /// The file list currently carries errors.
    Error,
}

/// Per-file processing status, absent until sending starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    /// Queued for sending.
    Pending,
    /// Transfer under way.
    Uploading(u8),
    /// Transfer completed.
    Finished,
    /// Transfer failed.
    Failed,
}

/// A file as it arrives from the host (drop or dialog).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingFile {
    /// Path of the file.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
}

/// A file in the intake list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path of the file.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
    /// Validation errors, empty for accepted files.
    pub errors: Vec<UploadError>,
    /// Processing status, `None` until sending starts.
    pub status: Option<ProcessStatus>,
}

impl FileEntry {
    fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Messages for the uploader component.
#[derive(Debug, Clone)]
pub enum Message {
    /// A key press event.
    KeyPress(KeyEvent),
    /// Something started hovering the drop zone. `accepted` is the host's
    /// acceptability hint, if it has one.
    DragEnter {
        /// Whether the hovering payload would pass validation, when known.
        accepted: Option<bool>,
    },
    /// The hover left the drop zone.
    DragLeave,
    /// Files were dropped or picked.
    Drop(Vec<IncomingFile>),
    /// Queue every valid, unprocessed file for sending.
    Send,
    /// Emitted per queued file; the host performs the transfer.
    SendRequested(usize),
    /// Transfer progress for one file, 0–100.
    Progress {
        /// Index into the file list.
        index: usize,
        /// Percent complete.
        percent: u8,
    },
    /// One file finished transferring.
    Finished {
        /// Index into the file list.
        index: usize,
    },
    /// One file failed to transfer.
    Failed {
        /// Index into the file list.
        index: usize,
        /// What went wrong, attached to the entry.
        errors: Vec<UploadError>,
    },
    /// The user asked to open a file dialog (`o` while focused).
    BrowseRequested,
    /// The file list changed (drop or removal).
    FilesChanged,
}

/// Style configuration for the uploader.
#[derive(Debug, Clone)]
pub struct UploaderStyle {
    /// Border style per drag state: default.
    pub zone: Style,
    /// Border style while hovering.
    pub zone_active: Style,
    /// Border style while hovering with an accepted payload.
    pub zone_accept: Style,
    /// Border style while hovering with a rejected payload, or with errors.
    pub zone_reject: Style,
    /// Style for file rows.
    pub file: Style,
    /// Style for the file row under the cursor.
    pub cursor: Style,
    /// Style for error annotations.
    pub error: Style,
    /// Style for finished annotations.
    pub done: Style,
}

impl Default for UploaderStyle {
    fn default() -> Self {
        Self {
            zone: Style::default().fg(Color::DarkGray),
            zone_active: Style::default().fg(Color::Blue),
            zone_accept: Style::default().fg(Color::Green),
            zone_reject: Style::default().fg(Color::Red),
            file: Style::default(),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            error: Style::default().fg(Color::Red),
            done: Style::default().fg(Color::Green),
        }
    }
}

/// File intake state machine.
pub struct Uploader {
    files: Vec<FileEntry>,
    hover: Option<Option<bool>>,
    error_message: Option<String>,
    cursor: usize,
    accept: Vec<String>,
    max_size: Option<u64>,
    min_size: Option<u64>,
    max_files: Option<usize>,
    multiple: bool,
    focus: bool,
    style: UploaderStyle,
}

impl Default for Uploader {
    fn default() -> Self {
        Self::new()
    }
}

impl Uploader {
    /// Create an empty uploader accepting any file.
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            hover: None,
            error_message: None,
            cursor: 0,
            accept: Vec::new(),
            max_size: None,
            min_size: None,
            max_files: None,
            multiple: true,
            focus: false,
            style: UploaderStyle::default(),
        }
    }

    /// Restrict intake to the given extensions (without dots).
    pub fn with_accept(mut self, extensions: Vec<impl Into<String>>) -> Self {
        self.accept = extensions
            .into_iter()
            .map(|ext| ext.into().to_lowercase())
            .collect();
        self
    }

    /// Set the maximum file size in bytes.
    pub fn with_max_size(mut self, max: u64) -> Self {
        self.max_size = Some(max);
        self
    }

    /// Set the minimum file size in bytes.
    pub fn with_min_size(mut self, min: u64) -> Self {
        self.min_size = Some(min);
        self
    }

    /// Cap the number of files in the list.
    pub fn with_max_files(mut self, max: usize) -> Self {
        self.max_files = Some(max);
        self
    }

    /// Accept only one file; a new drop replaces the list.
    pub fn single(mut self) -> Self {
        self.multiple = false;
        self
    }

    /// Set the style.
    pub fn with_style(mut self, style: UploaderStyle) -> Self {
        self.style = style;
        self
    }

    /// Set focus state.
    pub fn set_focused(&mut self, focused: bool) {
        self.focus = focused;
    }

    /// The intake list.
    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    /// The derived aggregate error, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Current drop-zone state, derived from errors and hover.
    pub fn drag_state(&self) -> DragState {
        if self.error_message.is_some() {
            return DragState::Error;
        }
        match self.hover {
            Some(Some(true)) => DragState::DragAccept,
            Some(Some(false)) => DragState::DragReject,
            Some(None) => DragState::DragActive,
            None => DragState::Default,
        }
    }

    /// Validate one incoming file against the configured constraints.
    pub fn validate(&self, file: &IncomingFile) -> Vec<UploadError> {
        let mut errors = Vec::new();
        if !self.accept.is_empty() {
            let ext = file
                .path
                .extension()
                .map(|ext| ext.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            if !self.accept.contains(&ext) {
                errors.push(UploadError::TypeNotAccepted(ext));
            }
        }
        if let Some(max) = self.max_size {
            if file.size > max {
                errors.push(UploadError::TooLarge { max });
            }
        }
        if let Some(min) = self.min_size {
            if file.size < min {
                errors.push(UploadError::TooSmall { min });
            }
        }
        errors
    }

    fn derive_error_message(&mut self) {
        let any_errors = self.files.iter().any(|file| !file.errors.is_empty());
        let over_cap = self
            .max_files
            .map(|max| self.files.len() > max)
            .unwrap_or(false);
        self.error_message = if any_errors {
            Some("Files must not have any errors.".to_string())
        } else if over_cap {
            self.max_files
                .map(|max| format!("Number of files must be less than or equal to {max}"))
        } else {
            None
        };
    }

    fn accept_drop(&mut self, incoming: Vec<IncomingFile>) {
        if !self.multiple {
            self.files.clear();
        }
        let take = if self.multiple { incoming.len() } else { 1 };
        for file in incoming.into_iter().take(take) {
            let errors = self.validate(&file);
            self.files.push(FileEntry {
                path: file.path,
                size: file.size,
                errors,
                status: None,
            });
        }
        self.clamp_cursor();
        self.derive_error_message();
    }

    fn remove_at_cursor(&mut self) -> bool {
        if self.cursor >= self.files.len() {
            return false;
        }
        self.files.remove(self.cursor);
        self.clamp_cursor();
        self.derive_error_message();
        true
    }

    fn clamp_cursor(&mut self) {
        if self.files.is_empty() {
            self.cursor = 0;
        } else if self.cursor >= self.files.len() {
            self.cursor = self.files.len() - 1;
        }
    }

    fn queue_sendable(&mut self) -> Command<Message> {
        if self.error_message.is_some() {
            return Command::none();
        }
        let mut requests = Vec::new();
        for (index, file) in self.files.iter_mut().enumerate() {
            if file.errors.is_empty() && file.status.is_none() {
                file.status = Some(ProcessStatus::Pending);
                requests.push(Command::message(Message::SendRequested(index)));
            }
        }
        Command::batch(requests)
    }

    fn on_key(&mut self, key: KeyEvent) -> Command<Message> {
        match key.code {
            KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                Command::none()
            }
            KeyCode::Down => {
                if self.cursor + 1 < self.files.len() {
                    self.cursor += 1;
                }
                Command::none()
            }
            KeyCode::Delete | KeyCode::Backspace => {
                if self.remove_at_cursor() {
                    Command::message(Message::FilesChanged)
                } else {
                    Command::none()
                }
            }
            KeyCode::Char('o') => Command::message(Message::BrowseRequested),
            KeyCode::Enter => self.queue_sendable(),
            _ => Command::none(),
        }
    }
}

impl Component for Uploader {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus => self.on_key(key),
            Message::DragEnter { accepted } => {
                self.hover = Some(accepted);
                Command::none()
            }
            Message::DragLeave => {
                self.hover = None;
                Command::none()
            }
            Message::Drop(incoming) => {
                self.hover = None;
                self.accept_drop(incoming);
                Command::message(Message::FilesChanged)
            }
            Message::Send => self.queue_sendable(),
            Message::Progress { index, percent } => {
                if let Some(file) = self.files.get_mut(index) {
                    file.status = Some(ProcessStatus::Uploading(percent.min(100)));
                }
                Command::none()
            }
            Message::Finished { index } => {
                if let Some(file) = self.files.get_mut(index) {
                    file.status = Some(ProcessStatus::Finished);
                }
                Command::none()
            }
            Message::Failed { index, errors } => {
                if let Some(file) = self.files.get_mut(index) {
                    file.status = Some(ProcessStatus::Failed);
                    file.errors = errors;
                }
                self.derive_error_message();
                Command::none()
            }
            _ => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }

        let zone_style = match self.drag_state() {
            DragState::Default => self.style.zone,
            DragState::DragActive => self.style.zone_active,
            DragState::DragAccept => self.style.zone_accept,
            DragState::DragReject | DragState::Error => self.style.zone_reject,
        };

        let title = match self.error_message() {
            Some(error) => format!(" {error} "),
            None => " Drop files here, or press o to browse ".to_string(),
        };
        let zone_height = area.height.min(3);
        let zone = Block::default()
            .borders(Borders::ALL)
            .border_style(zone_style)
            .title(title);
        frame.render_widget(
            zone,
            Rect {
                height: zone_height,
                ..area
            },
        );

        // File rows below the drop zone
        for (index, file) in self.files.iter().enumerate() {
            let y = area.y + zone_height + index as u16;
            if y >= area.y + area.height {
                break;
            }
            let row_area = Rect {
                x: area.x,
                y,
                width: area.width,
                height: 1,
            };

            let base = if self.focus && index == self.cursor {
                self.style.cursor
            } else {
                self.style.file
            };
            let annotation = if let Some(error) = file.errors.first() {
                Span::styled(format!(" ({error})"), self.style.error)
            } else {
                match file.status {
                    Some(ProcessStatus::Pending) => Span::styled(" queued", self.style.file),
                    Some(ProcessStatus::Uploading(pct)) => {
                        Span::styled(format!(" {pct}%"), self.style.file)
                    }
                    Some(ProcessStatus::Finished) => Span::styled(" done", self.style.done),
                    Some(ProcessStatus::Failed) => Span::styled(" failed", self.style.error),
                    None => Span::raw(""),
                }
            };

            let name = textwidth::truncate(&file.name(), area.width.saturating_sub(12) as usize);
            let line = Line::from(vec![Span::styled(format!("  {name}"), base), annotation]);
            frame.render_widget(Paragraph::new(line), row_area);
        }
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
