//! Accessible form and selection widgets for [`ratatui`].
//!
//! `taro` re-exports the component model from [`taro_core`] and the widget
//! set from [`taro_widgets`]. Widgets are host-driven: your application owns
//! the event loop, maps input events to widget messages, applies the
//! returned [`Command`]s, and renders each widget into the area it chooses.
//!
//! # Quick example
//!
//! ```ignore
//! use taro::widgets::combobox::{self, Combobox};
//! use taro::{Command, Component};
//!
//! let mut combo = Combobox::new(vec!["Red".into(), "Green".into(), "Blue".into()])
//!     .multi()
//!     .with_placeholder("Pick colors…");
//! combo.set_focused(true);
//!
//! // in the event loop:
//! // let cmd = combo.update(combobox::Message::KeyPress(key_event));
//! // cmd.dispatch(&message_sender);
//! // ...
//! // combo.view(frame, area);
//! ```
//!
//! See the `demos/` directory for complete programs.

pub use taro_core::{
    command::Command,
    component::Component,
    diag::{Advisory, CollectDiagnostics, Diagnostics, NullDiagnostics},
    testing,
};
pub use taro_widgets as widgets;
