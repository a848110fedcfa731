use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::Frame;

/// The top-level application trait.
///
/// The runtime drives an **init → update → view** cycle: [`init`](Model::init)
/// builds the first state (and may kick off work such as mounting the first
/// listing), messages arrive from subscriptions and finished commands,
/// [`update`](Model::update) folds each one into the state, and
/// [`view`](Model::view) draws the result.
///
/// ```rust,ignore
/// struct Console { employees: Listing<Employee> }
///
/// impl Model for Console {
///     type Message = Msg;
///     type Flags = ConsoleFlags;
///
///     fn init(flags: ConsoleFlags) -> (Self, Command<Msg>) {
///         let mut employees = employee_listing(&flags);
///         let cmd = employees.mount().map(Msg::Employees);
///         (Console { employees }, cmd)
///     }
///
///     fn update(&mut self, msg: Msg) -> Command<Msg> {
///         match msg {
///             Msg::Employees(m) => self.employees.update(m).map(Msg::Employees),
///         }
///     }
///
///     fn view(&self, frame: &mut Frame) {
///         self.employees.view(frame, frame.area());
///     }
/// }
/// ```
pub trait Model: Sized + Send + 'static {
    /// The application's message type.
    type Message: Send + 'static;

    /// Startup data passed to [`Model::init`]. Use `()` when none is needed.
    type Flags: Send + 'static;

    /// Create the initial state and an optional startup command.
    fn init(flags: Self::Flags) -> (Self, Command<Self::Message>);

    /// Fold one message into the state and return follow-up work.
    ///
    /// After `update` returns, the runtime re-renders and reconciles
    /// [`subscriptions`](Model::subscriptions).
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Draw the current state. Must not mutate anything.
    fn view(&self, frame: &mut Frame);

    /// Subscriptions that should be active for the current state.
    ///
    /// Called after every update; the runtime starts new ones and aborts
    /// the ones that disappeared.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }
}
