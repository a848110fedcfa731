use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::{layout::Rect, Frame};

/// A reusable sub-model that renders into the [`Rect`] its parent hands it.
///
/// Every piece of a listing (search field, filter select, data table,
/// pagination strip) is a `Component`. The parent wraps the child's message
/// type in one of its own variants and lifts commands with
/// [`Command::map`]:
///
/// ```rust,ignore
/// use roster_core::{Command, Component};
///
/// enum ListingMsg { Pages(pagination::Message) }
///
/// fn update(&mut self, msg: ListingMsg) -> Command<ListingMsg> {
///     match msg {
///         // Outbound request from the strip: route it to the list state.
///         ListingMsg::Pages(pagination::Message::PageRequested(n)) => self.set_page(n),
///         ListingMsg::Pages(m) => self.pagination.update(m).map(ListingMsg::Pages),
///     }
/// }
/// ```
///
/// Outbound messages (a child telling its parent that something happened)
/// travel the same way: the child returns `Command::message(..)`, the
/// parent sees it come back through its own `update` and intercepts it.
pub trait Component: Send + 'static {
    /// The component's message type.
    type Message: Send + 'static;

    /// Process a message, mutate state, and return follow-up work.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into `area`. Implementations must stay inside it.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Subscriptions this component needs right now. The parent collects
    /// them into its own list, mapping messages on the way.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }

    /// Whether this component currently takes keyboard input.
    fn focused(&self) -> bool {
        false
    }
}
