use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A side effect returned from [`Model::update`](crate::Model::update) or
/// [`Component::update`](crate::Component::update).
///
/// Listings use commands for the two things that cannot happen inside an
/// update: running a remote page fetch, and feeding an outbound message
/// (e.g. "search settled") back to the parent.
///
/// ```rust,ignore
/// // Nothing to do:
/// let cmd = Command::none();
///
/// // Fetch a page and route the result back as a message:
/// let cmd = Command::perform(fetch, move |result| Msg::Loaded { request, result });
///
/// // Leave the console:
/// let cmd = Command::quit();
/// ```
pub struct Command<Msg: Send + 'static> {
    pub(crate) inner: CommandInner<Msg>,
}

pub(crate) enum CommandInner<Msg: Send + 'static> {
    None,
    Action(Action<Msg>),
    Future(BoxFuture<'static, Msg>),
    Batch(Vec<Command<Msg>>),
    Terminal(TerminalCommand),
}

/// Actions the runtime handles synchronously, without spawning a task.
pub enum Action<Msg> {
    /// Deliver a message on the next loop iteration.
    Message(Msg),
    /// Stop the program.
    Quit,
}

/// Terminal management the runtime performs on the model's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCommand {
    /// Set the terminal window title.
    SetTitle(String),
    /// Make the cursor visible.
    ShowCursor,
    /// Hide the cursor.
    HideCursor,
    /// Clear the whole screen before the next frame.
    ClearScreen,
}

impl<Msg: Send + 'static> Command<Msg> {
    /// No-op command.
    pub fn none() -> Self {
        Command {
            inner: CommandInner::None,
        }
    }

    /// Run `future` on the runtime and turn its output into a message.
    pub fn perform<F, T>(future: F, map: impl FnOnce(T) -> Msg + Send + 'static) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Command {
            inner: CommandInner::Future(Box::pin(async move { map(future.await) })),
        }
    }

    /// Send a message immediately.
    pub fn message(msg: Msg) -> Self {
        Command {
            inner: CommandInner::Action(Action::Message(msg)),
        }
    }

    /// Quit the program.
    pub fn quit() -> Self {
        Command {
            inner: CommandInner::Action(Action::Quit),
        }
    }

    /// Run several commands concurrently. Empty and single-element batches
    /// collapse to `none` and the element itself.
    pub fn batch(cmds: impl IntoIterator<Item = Command<Msg>>) -> Self {
        let mut cmds: Vec<_> = cmds.into_iter().filter(|cmd| !cmd.is_none()).collect();
        match cmds.len() {
            0 => Command::none(),
            1 => cmds.pop().unwrap_or_else(Command::none),
            _ => Command {
                inner: CommandInner::Batch(cmds),
            },
        }
    }

    /// Terminal management command.
    pub fn terminal(cmd: TerminalCommand) -> Self {
        Command {
            inner: CommandInner::Terminal(cmd),
        }
    }

    /// Set the terminal window title.
    pub fn set_title(title: impl Into<String>) -> Self {
        Command::terminal(TerminalCommand::SetTitle(title.into()))
    }

    /// Fire once after `duration`.
    pub fn tick(duration: Duration, map: impl FnOnce(Instant) -> Msg + Send + 'static) -> Self {
        Command::perform(
            async move {
                tokio::time::sleep(duration).await;
                Instant::now()
            },
            map,
        )
    }

    /// Lift the message type into a parent's message type.
    pub fn map<NewMsg: Send + 'static>(
        self,
        f: impl Fn(Msg) -> NewMsg + Send + Sync + 'static,
    ) -> Command<NewMsg> {
        self.map_with(Arc::new(f))
    }

    fn map_with<NewMsg: Send + 'static>(
        self,
        f: Arc<dyn Fn(Msg) -> NewMsg + Send + Sync>,
    ) -> Command<NewMsg> {
        match self.inner {
            CommandInner::None => Command::none(),
            CommandInner::Action(Action::Message(msg)) => Command::message(f(msg)),
            CommandInner::Action(Action::Quit) => Command::quit(),
            CommandInner::Future(fut) => Command {
                inner: CommandInner::Future(Box::pin(async move { f(fut.await) })),
            },
            CommandInner::Batch(cmds) => Command {
                inner: CommandInner::Batch(
                    cmds.into_iter()
                        .map(|cmd| cmd.map_with(f.clone()))
                        .collect(),
                ),
            },
            CommandInner::Terminal(tcmd) => Command::terminal(tcmd),
        }
    }

    // --- Inspection, mostly for tests ---

    /// Returns `true` if this is a no-op command.
    pub fn is_none(&self) -> bool {
        matches!(self.inner, CommandInner::None)
    }

    /// Returns `true` if this command runs an async future.
    pub fn is_async(&self) -> bool {
        matches!(self.inner, CommandInner::Future(_))
    }

    /// Returns `true` if this command quits the program.
    pub fn is_quit(&self) -> bool {
        matches!(self.inner, CommandInner::Action(Action::Quit))
    }

    /// If this command is an immediate message, return it.
    pub fn into_message(self) -> Option<Msg> {
        match self.inner {
            CommandInner::Action(Action::Message(msg)) => Some(msg),
            _ => None,
        }
    }

    /// If this command runs a future, return it so a test can await it.
    pub fn into_future(self) -> Option<BoxFuture<'static, Msg>> {
        match self.inner {
            CommandInner::Future(fut) => Some(fut),
            _ => None,
        }
    }

    /// If this command is a batch, return the inner commands.
    pub fn into_batch(self) -> Option<Vec<Command<Msg>>> {
        match self.inner {
            CommandInner::Batch(cmds) => Some(cmds),
            _ => None,
        }
    }
}
