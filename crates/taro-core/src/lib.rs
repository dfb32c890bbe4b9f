//! Core component model for the **taro** widget library.
//!
//! `taro-core` provides the small contract every taro widget is built on:
//! a pure **update -> view** cycle with side effects pushed to the edges
//! through [`Command`] values that the host executes.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Component`] | Widget trait (update / view / focused) |
//! | [`Command`] | Describes a side effect for the host to execute |
//! | [`Diagnostics`] | Injectable sink for development-mode advisories |
//! | [`ComponentHarness`](testing::ComponentHarness) | Headless harness for unit-testing a [`Component`] without a terminal |
//!
//! # Architecture
//!
//! 1. **event** — The host receives an input event (key press, paste, drop)
//!    and maps it into the widget's `Message` type.
//! 2. **update** — [`Component::update`] receives the message, mutates state
//!    synchronously, and returns a [`Command`] for follow-up effects.
//! 3. **effects** — The host applies the command: feeding immediate messages
//!    back in, or handing deferred/async work to tokio via
//!    [`Command::dispatch`].
//! 4. **view** — The host calls [`Component::view`] with the area the widget
//!    should occupy.
//!
//! There is no built-in event loop: the host (an application, a test
//! harness, a demo) owns the loop and the widget instances.

pub mod command;
pub mod component;
pub mod diag;
pub mod testing;

pub use command::Command;
pub use component::Component;
pub use diag::{Advisory, CollectDiagnostics, Diagnostics, NullDiagnostics};
