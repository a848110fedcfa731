use crate::command::{Action, Command, CommandInner, TerminalCommand};
use crate::model::Model;
use crate::subscription::SubscriptionManager;
use crossterm::{
    cursor,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout, Stdout};
use std::sync::Once;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// Errors raised while setting up, driving or restoring the terminal.
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// Terminal I/O failed.
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Runtime configuration for a [`Program`].
///
/// ```rust,ignore
/// let opts = ProgramOptions {
///     title: Some("Roster".into()),
///     ..ProgramOptions::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ProgramOptions {
    /// Upper bound on redraws per second (clamped to 1..=120).
    pub fps: u32,
    /// Draw on the alternate screen.
    pub alt_screen: bool,
    /// Deliver pasted text as a single event.
    pub bracketed_paste: bool,
    /// Initial terminal title.
    pub title: Option<String>,
    /// Restore the terminal before a panic message is printed.
    pub catch_panics: bool,
    /// Quit on SIGINT.
    pub handle_signals: bool,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            fps: 60,
            alt_screen: true,
            bracketed_paste: true,
            title: None,
            catch_panics: true,
            handle_signals: true,
        }
    }
}

/// Drives a [`Model`] against the real terminal until it quits.
///
/// ```rust,ignore
/// #[tokio::main]
/// async fn main() -> Result<(), ProgramError> {
///     let console = Program::<Console>::new(flags)?.run().await?;
///     Ok(())
/// }
/// ```
pub struct Program<M: Model> {
    model: M,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    msg_tx: mpsc::UnboundedSender<M::Message>,
    msg_rx: mpsc::UnboundedReceiver<M::Message>,
    subscriptions: SubscriptionManager<M::Message>,
    options: ProgramOptions,
    needs_redraw: bool,
    should_quit: bool,
}

impl<M: Model> Program<M> {
    /// Create a program with default options.
    pub fn new(flags: M::Flags) -> Result<Self, ProgramError> {
        Self::with_options(flags, ProgramOptions::default())
    }

    /// Create a program with custom options.
    pub fn with_options(flags: M::Flags, options: ProgramOptions) -> Result<Self, ProgramError> {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let terminal = init_terminal(&options)?;
        let (model, init_cmd) = M::init(flags);

        let mut program = Self {
            model,
            terminal,
            subscriptions: SubscriptionManager::new(msg_tx.clone()),
            msg_tx,
            msg_rx,
            options,
            needs_redraw: true,
            should_quit: false,
        };
        tracing::info!("program initialized");

        program.execute(init_cmd);
        let subs = program.model.subscriptions();
        program.subscriptions.reconcile(subs);

        Ok(program)
    }

    /// A sender for injecting messages from outside the loop.
    pub fn sender(&self) -> mpsc::UnboundedSender<M::Message> {
        self.msg_tx.clone()
    }

    /// Run until the model quits, then restore the terminal and hand back
    /// the final model.
    pub async fn run(mut self) -> Result<M, ProgramError> {
        let outcome = self.event_loop().await;
        tracing::info!("shutting down");
        self.subscriptions.shutdown();
        restore_terminal(self.options.alt_screen)?;
        outcome.map(|()| self.model)
    }

    async fn event_loop(&mut self) -> Result<(), ProgramError> {
        self.render()?;

        let fps = self.options.fps.clamp(1, 120);
        let mut frames = tokio::time::interval(Duration::from_secs_f64(1.0 / f64::from(fps)));
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let handle_signals = self.options.handle_signals;

        loop {
            tokio::select! {
                biased;

                _ = tokio::signal::ctrl_c(), if handle_signals => {
                    tracing::info!("received SIGINT");
                    return Ok(());
                }

                Some(msg) = self.msg_rx.recv() => {
                    self.process(msg);

                    // Drain whatever else is already queued (bounded) before
                    // the next frame.
                    let deadline = Instant::now() + Duration::from_micros(100);
                    let mut drained = 0u32;
                    while Instant::now() < deadline && drained < 100 {
                        let Ok(msg) = self.msg_rx.try_recv() else { break };
                        self.process(msg);
                        drained += 1;
                    }

                    if self.should_quit {
                        return Ok(());
                    }
                }

                _ = frames.tick() => {
                    if self.needs_redraw {
                        self.render()?;
                        self.needs_redraw = false;
                    }
                }
            }
        }
    }

    fn process(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.execute(cmd);
        let subs = self.model.subscriptions();
        self.subscriptions.reconcile(subs);
        self.needs_redraw = true;
    }

    fn execute(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => {
                let _ = self.msg_tx.send(msg);
            }
            CommandInner::Action(Action::Quit) => {
                self.should_quit = true;
            }
            CommandInner::Future(fut) => {
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    // The receiver is gone only once the program has exited.
                    let _ = tx.send(fut.await);
                });
            }
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.execute(cmd);
                }
            }
            CommandInner::Terminal(tcmd) => {
                if let Err(err) = self.apply_terminal(tcmd) {
                    tracing::warn!(%err, "terminal command failed");
                }
            }
        }
    }

    fn apply_terminal(&mut self, cmd: TerminalCommand) -> io::Result<()> {
        let mut out = stdout();
        match cmd {
            TerminalCommand::SetTitle(title) => execute!(out, SetTitle(title)),
            TerminalCommand::ShowCursor => execute!(out, cursor::Show),
            TerminalCommand::HideCursor => execute!(out, cursor::Hide),
            TerminalCommand::ClearScreen => {
                execute!(out, Clear(ClearType::All))?;
                self.terminal.clear()
            }
        }
    }

    fn render(&mut self) -> Result<(), ProgramError> {
        self.terminal.draw(|frame| self.model.view(frame))?;
        Ok(())
    }
}

fn init_terminal(options: &ProgramOptions) -> Result<Terminal<CrosstermBackend<Stdout>>, ProgramError> {
    if options.catch_panics {
        static HOOK: Once = Once::new();
        let alt_screen = options.alt_screen;
        HOOK.call_once(|| {
            let previous = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                let _ = restore_terminal(alt_screen);
                previous(info);
            }));
        });
    }

    enable_raw_mode()?;
    let mut out = stdout();
    if options.alt_screen {
        execute!(out, EnterAlternateScreen)?;
    }
    if options.bracketed_paste {
        execute!(out, EnableBracketedPaste)?;
    }
    if let Some(title) = &options.title {
        execute!(out, SetTitle(title))?;
    }
    execute!(out, cursor::Hide)?;

    Ok(Terminal::new(CrosstermBackend::new(out))?)
}

/// Best-effort restore: every step runs even if an earlier one failed, and
/// only the raw-mode error is reported.
fn restore_terminal(alt_screen: bool) -> io::Result<()> {
    let raw = disable_raw_mode();
    let mut out = stdout();
    execute!(out, DisableBracketedPaste).ok();
    execute!(out, cursor::Show).ok();
    if alt_screen {
        execute!(out, LeaveAlternateScreen).ok();
    }
    raw
}
