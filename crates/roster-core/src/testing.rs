use crate::command::{Action, Command, CommandInner};
use crate::model::Model;
use futures::future::BoxFuture;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;

/// Headless harness that drives a [`Model`] without a terminal.
///
/// Synchronous commands ([`Command::message`]) are queued and flushed by
/// [`drain_messages`](TestProgram::drain_messages). Futures (page fetches,
/// one-shot ticks) are parked rather than dropped; [`settle`](TestProgram::settle)
/// awaits them in the order they were issued and feeds their results back
/// through `update`. Tests that care about arrival order can instead pull
/// them out with [`take_futures`](TestProgram::take_futures) and resolve
/// them by hand.
///
/// ```rust,ignore
/// let mut prog = TestProgram::<Console>::new(flags);
/// prog.settle().await;                       // first page lands
/// prog.send(Msg::Employees(listing::Message::SetPage(2)));
/// prog.settle().await;
/// assert!(prog.render_string(80, 20).contains("Page 2"));
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    pending_messages: Vec<M::Message>,
    pending_futures: Vec<BoxFuture<'static, M::Message>>,
    quit_requested: bool,
}

impl<M: Model> TestProgram<M> {
    /// Call [`Model::init`] and queue whatever it returned.
    pub fn new(flags: M::Flags) -> Self {
        let (model, init_cmd) = M::init(flags);
        let mut program = Self {
            model,
            pending_messages: Vec::new(),
            pending_futures: Vec::new(),
            quit_requested: false,
        };
        program.collect(init_cmd);
        program
    }

    /// Run one update cycle. Follow-up commands are queued, not run.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.collect(cmd);
    }

    /// Run queued synchronous messages until none are left.
    pub fn drain_messages(&mut self) {
        while !self.pending_messages.is_empty() {
            let messages: Vec<_> = self.pending_messages.drain(..).collect();
            for msg in messages {
                self.send(msg);
            }
        }
    }

    /// Await every parked future, feeding results back, until the model is
    /// quiet. Synchronous messages are drained between rounds.
    pub async fn settle(&mut self) {
        loop {
            self.drain_messages();
            if self.pending_futures.is_empty() {
                break;
            }
            let futures: Vec<_> = self.pending_futures.drain(..).collect();
            for fut in futures {
                let msg = fut.await;
                self.send(msg);
            }
        }
    }

    /// Remove the parked futures without running them.
    pub fn take_futures(&mut self) -> Vec<BoxFuture<'static, M::Message>> {
        std::mem::take(&mut self.pending_futures)
    }

    /// Number of parked futures.
    pub fn pending_futures(&self) -> usize {
        self.pending_futures.len()
    }

    /// Whether any command so far asked to quit.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Render into an off-screen buffer.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let mut terminal =
            Terminal::new(TestBackend::new(width, height)).expect("test backend is infallible");
        terminal
            .draw(|frame| self.model.view(frame))
            .expect("test backend is infallible");
        terminal.backend().buffer().clone()
    }

    /// Render and flatten the buffer into newline-separated rows.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        buffer_to_string(&self.render(width, height))
    }

    fn collect(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None | CommandInner::Terminal(_) => {}
            CommandInner::Action(Action::Message(msg)) => self.pending_messages.push(msg),
            CommandInner::Action(Action::Quit) => self.quit_requested = true,
            CommandInner::Future(fut) => self.pending_futures.push(fut),
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.collect(cmd);
                }
            }
        }
    }
}

/// Flatten a buffer into text, one line per row.
pub fn buffer_to_string(buf: &Buffer) -> String {
    let area = buf.area;
    let mut rows = Vec::with_capacity(usize::from(area.height));
    for y in area.top()..area.bottom() {
        let row: String = (area.left()..area.right())
            .map(|x| buf[(x, y)].symbol())
            .collect();
        rows.push(row);
    }
    rows.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;
    use ratatui::Frame;

    struct Tally {
        total: u32,
        seen: Vec<u32>,
    }

    enum Msg {
        Add(u32),
        AddLater(u32),
        AddTwice(u32),
        Stop,
    }

    impl Model for Tally {
        type Message = Msg;
        type Flags = u32;

        fn init(start: u32) -> (Self, Command<Msg>) {
            (
                Tally {
                    total: start,
                    seen: Vec::new(),
                },
                Command::none(),
            )
        }

        fn update(&mut self, msg: Msg) -> Command<Msg> {
            match msg {
                Msg::Add(n) => {
                    self.total += n;
                    self.seen.push(n);
                    Command::none()
                }
                Msg::AddLater(n) => Command::perform(async move { n }, Msg::Add),
                Msg::AddTwice(n) => {
                    Command::batch([Command::message(Msg::Add(n)), Command::message(Msg::Add(n))])
                }
                Msg::Stop => Command::quit(),
            }
        }

        fn view(&self, frame: &mut Frame) {
            frame.render_widget(Paragraph::new(format!("total {}", self.total)), frame.area());
        }
    }

    #[test]
    fn sync_messages_wait_for_drain() {
        let mut prog = TestProgram::<Tally>::new(1);
        prog.send(Msg::AddTwice(2));
        assert_eq!(prog.model().total, 1);
        prog.drain_messages();
        assert_eq!(prog.model().total, 5);
    }

    #[tokio::test]
    async fn settle_runs_parked_futures() {
        let mut prog = TestProgram::<Tally>::new(0);
        prog.send(Msg::AddLater(3));
        prog.send(Msg::AddLater(4));
        assert_eq!(prog.pending_futures(), 2);
        prog.settle().await;
        assert_eq!(prog.model().seen, vec![3, 4]);
        assert_eq!(prog.pending_futures(), 0);
    }

    #[tokio::test]
    async fn taken_futures_can_resolve_out_of_order() {
        let mut prog = TestProgram::<Tally>::new(0);
        prog.send(Msg::AddLater(1));
        prog.send(Msg::AddLater(2));
        let mut futures = prog.take_futures();
        let second = futures.pop();
        let first = futures.pop();
        if let Some(fut) = second {
            prog.send(fut.await);
        }
        if let Some(fut) = first {
            prog.send(fut.await);
        }
        assert_eq!(prog.model().seen, vec![2, 1]);
    }

    #[test]
    fn quit_is_recorded() {
        let mut prog = TestProgram::<Tally>::new(0);
        assert!(!prog.quit_requested());
        prog.send(Msg::Stop);
        assert!(prog.quit_requested());
    }

    #[test]
    fn render_string_shows_view() {
        let prog = TestProgram::<Tally>::new(7);
        let out = prog.render_string(12, 2);
        assert!(out.starts_with("total 7"));
        assert_eq!(out.lines().count(), 2);
    }
}
