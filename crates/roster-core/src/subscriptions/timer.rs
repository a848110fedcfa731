use crate::subscription::{SubscriptionId, SubscriptionSource};
use futures::stream::BoxStream;
use futures::StreamExt;
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;

/// A repeating timer.
///
/// Listings declare one while a remote page is loading to animate the
/// table's spinner; once loading ends the declaration disappears and the
/// runtime aborts the timer.
///
/// ```rust,ignore
/// subscribe(Every::new(Duration::from_millis(80), "listing-spinner"))
///     .map(|_| Msg::SpinnerTick)
/// ```
pub struct Every {
    /// Time between ticks.
    pub interval: Duration,
    /// Distinguishes concurrent timers.
    pub id: &'static str,
    /// Owning component instance, from [`owner_key`](crate::owner_key).
    pub owner: u64,
}

impl Every {
    /// Create a repeating timer.
    pub fn new(interval: Duration, id: &'static str) -> Self {
        Self {
            interval,
            id,
            owner: 0,
        }
    }

    /// Tie the timer to one component instance.
    pub fn owned_by(mut self, owner: u64) -> Self {
        self.owner = owner;
        self
    }
}

impl SubscriptionSource for Every {
    type Output = Instant;

    fn id(&self) -> SubscriptionId {
        SubscriptionId::keyed::<Self>((self.id, self.owner))
    }

    fn stream(self) -> BoxStream<'static, Instant> {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio_stream::wrappers::IntervalStream::new(interval)
            .map(|tick| tick.into_std())
            .boxed()
    }
}

/// A one-shot timer that emits its generation number after `delay`.
///
/// The generation is part of the subscription identity, so declaring a timer
/// with a newer generation makes the runtime abort the older one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTimer {
    /// Which debounce this timer belongs to.
    pub key: &'static str,
    /// Owning component instance, from [`owner_key`](crate::owner_key).
    pub owner: u64,
    /// Generation of the value waiting on this timer.
    pub generation: u64,
    /// Quiet period before firing.
    pub delay: Duration,
}

impl SubscriptionSource for DebounceTimer {
    type Output = u64;

    fn id(&self) -> SubscriptionId {
        SubscriptionId::keyed::<Self>((self.key, self.owner, self.generation))
    }

    fn stream(self) -> BoxStream<'static, u64> {
        futures::stream::once(async move {
            tokio::time::sleep(self.delay).await;
            self.generation
        })
        .boxed()
    }
}
