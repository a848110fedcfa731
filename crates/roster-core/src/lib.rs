//! Runtime for roster's terminal listings.
//!
//! Programs follow the Elm architecture: state lives in a [`Model`], input
//! arrives as messages, [`Model::update`] folds each message into the state
//! and returns a [`Command`] describing follow-up work, and [`Model::view`]
//! draws the result with ratatui.
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Model`] | Top-level application (init / update / view) |
//! | [`Component`] | Reusable piece that renders into a [`ratatui::layout::Rect`] |
//! | [`Command`] | Follow-up work: a message, a future, a terminal tweak, quit |
//! | [`Subscription`] | Long-lived source such as key input or a timer |
//! | [`Debounce`] | Latest-value holder whose timer dies with its owner |
//! | [`Program`] | Drives a [`Model`] against the real terminal |
//! | [`TestProgram`](testing::TestProgram) | Headless harness for tests |
//!
//! Work never runs inside `update`. A page fetch is a [`Command`] whose
//! future resolves to a message; a debounce is a [`Subscription`] that the
//! model keeps declaring while a value is pending. Both are owned by the
//! runtime, so tearing down the model that asked for them is enough to stop
//! them.

pub mod command;
pub mod component;
pub mod debounce;
pub mod event;
pub mod model;
pub mod runtime;
pub mod subscription;
pub mod subscriptions;
pub mod testing;

pub use command::{Action, Command, TerminalCommand};
pub use component::Component;
pub use debounce::Debounce;
pub use event::TerminalEvent;
pub use model::Model;
pub use runtime::{Program, ProgramError, ProgramOptions};
pub use subscription::{owner_key, subscribe, Subscription, SubscriptionId, SubscriptionSource};
pub use subscriptions::{terminal_events, DebounceTimer, Every, TerminalEvents};

/// Run `M` with default options and return the final model.
pub async fn run<M: Model>(flags: M::Flags) -> Result<M, ProgramError> {
    Program::new(flags)?.run().await
}

/// Run `M` with custom options and return the final model.
pub async fn run_with<M: Model>(
    flags: M::Flags,
    options: ProgramOptions,
) -> Result<M, ProgramError> {
    Program::with_options(flags, options)?.run().await
}
