use crate::command::Command;
use ratatui::{layout::Rect, Frame};

/// A reusable widget that renders into a given [`Rect`] area.
///
/// Every taro widget implements this trait: state transitions go through
/// [`update`](Component::update), which mutates the component and returns a
/// [`Command`] describing any follow-up effects, and rendering goes through
/// [`view`](Component::view), which draws into the rectangle the host chose.
///
/// All transitions are synchronous and applied in the order the host
/// dispatches them; a component instance is owned by exactly one host, so no
/// locking discipline is required.
///
/// # Composition pattern
///
/// A parent wraps the child's message type in a variant of its own message
/// and uses [`Command::map`] to translate commands:
///
/// ```rust,ignore
/// use taro_core::{Command, Component};
///
/// enum AppMsg { Filter(search::Message) }
///
/// struct App { filter: Search }
///
/// impl App {
///     fn update(&mut self, msg: AppMsg) -> Command<AppMsg> {
///         match msg {
///             AppMsg::Filter(m) => self.filter.update(m).map(AppMsg::Filter),
///         }
///     }
/// }
/// ```
pub trait Component: Send + 'static {
    /// The component's internal message type.
    ///
    /// Parents typically wrap this in one of their own message variants so
    /// that events can be routed to the correct child.
    type Message: Send + 'static;

    /// Process a message, mutate state, and return a [`Command`] for side effects.
    ///
    /// The returned command uses the component's own `Message` type; the
    /// parent should call [`.map()`](Command::map) to lift it into the parent
    /// message type.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into a specific `area` of the [`Frame`].
    ///
    /// Implementations should confine all rendering to the given rectangle.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Whether this component currently has keyboard focus.
    ///
    /// This is a hint for input routing. A parent can query `focused()` to
    /// decide which child should receive key events. The default
    /// implementation returns `false`.
    fn focused(&self) -> bool {
        false
    }
}
