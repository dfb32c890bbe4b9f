use crate::command::{Command, CommandInner};
use crate::component::Component;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;

/// A headless harness that drives a [`Component`] without a real terminal.
///
/// `ComponentHarness` lets you exercise the full update/view cycle in a plain
/// `#[test]` function — no tokio runtime or TTY required. Immediate messages
/// produced by [`Command::message`] are recorded (see
/// [`emitted`](ComponentHarness::emitted)) and queued; call
/// [`drain`](ComponentHarness::drain) to feed the queue back through
/// `update` until it is quiescent. Async commands are silently ignored.
///
/// # Example
///
/// ```rust,ignore
/// use taro_core::testing::ComponentHarness;
///
/// let mut harness = ComponentHarness::new(Toggle::new("Notifications"));
/// harness.send(toggle::Message::KeyPress(key(KeyCode::Enter)));
/// assert!(harness.component().is_checked());
///
/// let output = harness.render_string(30, 1);
/// assert!(output.contains("Notifications"));
/// ```
pub struct ComponentHarness<C: Component> {
    component: C,
    pending: Vec<C::Message>,
    emitted: Vec<C::Message>,
}

impl<C: Component> ComponentHarness<C>
where
    C::Message: Clone,
{
    /// Wrap an already-constructed component.
    pub fn new(component: C) -> Self {
        Self {
            component,
            pending: Vec::new(),
            emitted: Vec::new(),
        }
    }

    /// Send a message, triggering a single update cycle.
    ///
    /// Immediate messages in the returned command are recorded and enqueued;
    /// call [`drain`](ComponentHarness::drain) to process them.
    pub fn send(&mut self, msg: C::Message) {
        let cmd = self.component.update(msg);
        self.collect(cmd);
    }

    /// Feed pending messages back through `update` until none remain.
    ///
    /// Useful for message-chaining scenarios where one update produces a
    /// message that triggers another update.
    pub fn drain(&mut self) {
        while !self.pending.is_empty() {
            let messages: Vec<_> = self.pending.drain(..).collect();
            for msg in messages {
                let cmd = self.component.update(msg);
                self.collect(cmd);
            }
        }
    }

    /// Every immediate message the component has produced so far, in order.
    ///
    /// This is how callback-style effects are asserted: a widget that would
    /// notify its host does so by emitting a message.
    pub fn emitted(&self) -> &[C::Message] {
        &self.emitted
    }

    /// Drop the recorded messages, keeping component state.
    pub fn clear_emitted(&mut self) {
        self.emitted.clear();
    }

    /// Shared reference to the component for assertions.
    pub fn component(&self) -> &C {
        &self.component
    }

    /// Mutable reference to the component for direct test setup.
    ///
    /// This bypasses the message-driven update cycle, which can be useful
    /// for arranging state before sending messages.
    pub fn component_mut(&mut self) -> &mut C {
        &mut self.component
    }

    /// Render the component to a ratatui [`Buffer`] of the given dimensions.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let backend = ratatui::backend::TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("test backend");
        terminal
            .draw(|frame| {
                self.component.view(frame, frame.area());
            })
            .expect("draw");
        terminal.backend().buffer().clone()
    }

    /// Render the component and return the visible content as a plain string.
    ///
    /// Each buffer row becomes a line; rows are separated by newlines and
    /// trailing whitespace within a row is preserved.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        let buf = self.render(width, height);
        let area = Rect::new(0, 0, width, height);
        let mut output = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let cell = &buf[(x, y)];
                output.push_str(cell.symbol());
            }
            if y < area.bottom() - 1 {
                output.push('\n');
            }
        }
        output
    }

    fn collect(&mut self, cmd: Command<C::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Message(msg) => {
                self.emitted.push(msg.clone());
                self.pending.push(msg);
            }
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.collect(cmd);
                }
            }
            // Async commands can't be executed synchronously in tests
            CommandInner::Future(_) => {}
        }
    }
}
