use crate::event::TerminalEvent;
use crate::subscription::{Subscription, SubscriptionId, SubscriptionSource};
use crossterm::event::EventStream;
use futures::stream::BoxStream;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// Subscription source for terminal input.
pub struct TerminalEvents;

impl SubscriptionSource for TerminalEvents {
    type Output = TerminalEvent;

    fn id(&self) -> SubscriptionId {
        SubscriptionId::of::<Self>()
    }

    fn stream(self) -> BoxStream<'static, TerminalEvent> {
        EventStream::new()
            .filter_map(|result| async move {
                result.ok().and_then(TerminalEvent::from_crossterm)
            })
            .boxed()
    }
}

/// Subscribe to terminal input, mapping each event to a message or `None`
/// to drop it.
///
/// ```rust,ignore
/// terminal_events(|event| match event {
///     TerminalEvent::Key(key) => Some(Msg::Key(key)),
///     _ => None,
/// })
/// ```
pub fn terminal_events<Msg: Send + 'static>(
    map: impl Fn(TerminalEvent) -> Option<Msg> + Send + Sync + 'static,
) -> Subscription<Msg> {
    // The EventStream is created inside the task. `subscriptions()` runs on
    // every update, and constructing a stream there would poke crossterm's
    // global reader while the live stream is polling it.
    Subscription {
        id: SubscriptionId::of::<TerminalEvents>(),
        spawn: Box::new(move |tx: mpsc::UnboundedSender<Msg>| -> AbortHandle {
            tokio::spawn(async move {
                let mut events = EventStream::new();
                while let Some(result) = events.next().await {
                    let Some(msg) = result
                        .ok()
                        .and_then(TerminalEvent::from_crossterm)
                        .and_then(&map)
                    else {
                        continue;
                    };
                    if tx.send(msg).is_err() {
                        break;
                    }
                }
            })
            .abort_handle()
        }),
    }
}
