//! Cancellable debounce resource.

use crate::subscription::{owner_key, subscribe, Subscription};
use crate::subscriptions::DebounceTimer;
use std::time::Duration;

/// Holds the latest value of a rapidly changing input until it has been
/// quiet for `delay`.
///
/// The timer is not a detached callback: while a value is pending,
/// [`subscription`](Debounce::subscription) declares a [`DebounceTimer`]
/// keyed by the current generation. Pushing a new value bumps the
/// generation, so the runtime aborts the old timer and starts a new one.
/// When the owning component is dropped its subscription is no longer
/// declared and the timer is aborted with it; nothing fires after teardown.
///
/// ```rust,ignore
/// // update():
/// Msg::Edited(term) => { self.debounce.push(term); Command::none() }
/// Msg::Elapsed(generation) => match self.debounce.fire(generation) {
///     Some(term) => Command::message(Msg::Settled(term)),
///     None => Command::none(),
/// }
///
/// // subscriptions():
/// self.debounce.subscription(Msg::Elapsed).into_iter().collect()
/// ```
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    key: &'static str,
    owner: u64,
    delay: Duration,
    generation: u64,
    pending: Option<T>,
}

impl<T: Send + 'static> Debounce<T> {
    /// Create an idle debounce. `key` distinguishes debounces living in the
    /// same model.
    pub fn new(key: &'static str, delay: Duration) -> Self {
        Self {
            key,
            owner: owner_key(),
            delay,
            generation: 0,
            pending: None,
        }
    }

    /// Quiet period before a pending value is released.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Generation of the pending value (or of the last one).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a value is waiting for its timer.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Replace the pending value and restart the quiet period.
    pub fn push(&mut self, value: T) {
        self.generation += 1;
        self.pending = Some(value);
    }

    /// Release the pending value if `generation` is still the latest.
    ///
    /// A timer that lost the race with a newer [`push`](Debounce::push) or a
    /// [`cancel`](Debounce::cancel) reports an old generation and gets `None`.
    pub fn fire(&mut self, generation: u64) -> Option<T> {
        if generation == self.generation {
            self.pending.take()
        } else {
            None
        }
    }

    /// Take the pending value now, skipping the rest of the quiet period.
    pub fn flush(&mut self) -> Option<T> {
        let value = self.pending.take();
        if value.is_some() {
            self.generation += 1;
        }
        value
    }

    /// Drop the pending value; any in-flight timer becomes stale.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            self.generation += 1;
        }
    }

    /// The timer subscription while a value is pending.
    pub fn subscription<Msg: Send + 'static>(
        &self,
        on_elapsed: impl Fn(u64) -> Msg + Send + Sync + 'static,
    ) -> Option<Subscription<Msg>> {
        self.pending.as_ref()?;
        Some(
            subscribe(DebounceTimer {
                key: self.key,
                owner: self.owner,
                generation: self.generation,
                delay: self.delay,
            })
            .map(on_elapsed),
        )
    }
}
