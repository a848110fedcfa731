//! Built-in subscription sources.
//!
//! - **Terminal input** ([`terminal_events`], [`TerminalEvents`]): keys,
//!   paste and resize events.
//! - **Timers** ([`Every`], [`DebounceTimer`]): a repeating tick for loading
//!   spinners and the one-shot timer behind [`Debounce`](crate::Debounce).

mod terminal;
mod timer;

pub use terminal::*;
pub use timer::*;
