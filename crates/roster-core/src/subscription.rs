use futures::stream::BoxStream;
use futures::StreamExt;
use std::any::TypeId;
use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

type Spawn<Msg> = Box<dyn FnOnce(mpsc::UnboundedSender<Msg>) -> AbortHandle + Send>;

/// A long-lived event source owned by the runtime.
///
/// Subscriptions are declared, not started: a model returns the set it
/// wants from [`Model::subscriptions`](crate::Model::subscriptions) and the
/// runtime diffs that set by [`SubscriptionId`] after every update. A
/// subscription that stops being declared has its task aborted, which is
/// how debounce timers get cancelled when a listing is torn down.
pub struct Subscription<Msg: Send + 'static> {
    pub(crate) id: SubscriptionId,
    pub(crate) spawn: Spawn<Msg>,
}

/// Identity used to diff subscriptions between update cycles.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId {
    type_id: TypeId,
    discriminant: u64,
}

impl SubscriptionId {
    /// Identity for a source type with a numeric discriminant.
    pub fn new<T: 'static>(discriminant: u64) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            discriminant,
        }
    }

    /// Identity for a singleton source type.
    pub fn of<T: 'static>() -> Self {
        Self::new::<T>(0)
    }

    /// Identity for a source type keyed by any hashable value.
    pub fn keyed<T: 'static>(key: impl Hash) -> Self {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        Self::new::<T>(hasher.finish())
    }
}

/// A type that produces a stream of values for a [`Subscription`].
///
/// The stream is created once when the subscription starts and dropped
/// when it is aborted.
pub trait SubscriptionSource: Send + 'static {
    /// Value emitted by the stream.
    type Output: Send + 'static;

    /// Identity of this particular source instance.
    fn id(&self) -> SubscriptionId;

    /// Build the stream.
    fn stream(self) -> BoxStream<'static, Self::Output>;
}

/// A process-unique number for a component to fold into the keys of the
/// subscriptions it declares, so two instances of the same component never
/// share a running task.
pub fn owner_key() -> u64 {
    static NEXT: AtomicU64 = AtomicU64::new(1);
    NEXT.fetch_add(1, Ordering::Relaxed)
}

/// Turn a [`SubscriptionSource`] into a [`Subscription`].
pub fn subscribe<S: SubscriptionSource>(source: S) -> Subscription<S::Output> {
    let id = source.id();
    Subscription {
        id,
        spawn: Box::new(move |tx| forward(source.stream(), tx)),
    }
}

/// Drive `stream` on a task, pushing every item into `tx` until either side
/// goes away.
fn forward<Msg: Send + 'static>(
    mut stream: BoxStream<'static, Msg>,
    tx: mpsc::UnboundedSender<Msg>,
) -> AbortHandle {
    tokio::spawn(async move {
        while let Some(msg) = stream.next().await {
            if tx.send(msg).is_err() {
                break;
            }
        }
    })
    .abort_handle()
}

impl<Msg: Send + 'static> Subscription<Msg> {
    /// Build a subscription from an already-constructed stream.
    pub fn from_stream(id: SubscriptionId, stream: BoxStream<'static, Msg>) -> Self {
        Subscription {
            id,
            spawn: Box::new(move |tx| forward(stream, tx)),
        }
    }

    /// The identity the runtime diffs on.
    pub fn id(&self) -> &SubscriptionId {
        &self.id
    }

    /// Lift the message type into a parent's message type.
    pub fn map<NewMsg: Send + 'static>(
        self,
        f: impl Fn(Msg) -> NewMsg + Send + Sync + 'static,
    ) -> Subscription<NewMsg> {
        let f = Arc::new(f);
        let spawn = self.spawn;
        Subscription {
            id: self.id,
            spawn: Box::new(move |outer: mpsc::UnboundedSender<NewMsg>| {
                let (inner_tx, mut inner_rx) = mpsc::unbounded_channel::<Msg>();
                let source = spawn(inner_tx);
                // Aborting the source drops `inner_tx`, which ends this relay.
                tokio::spawn(async move {
                    while let Some(msg) = inner_rx.recv().await {
                        if outer.send(f(msg)).is_err() {
                            break;
                        }
                    }
                });
                source
            }),
        }
    }
}

/// Tracks running subscriptions and reconciles them against each new
/// declaration.
pub(crate) struct SubscriptionManager<Msg: Send + 'static> {
    active: HashMap<SubscriptionId, AbortHandle>,
    msg_tx: mpsc::UnboundedSender<Msg>,
}

impl<Msg: Send + 'static> SubscriptionManager<Msg> {
    pub fn new(msg_tx: mpsc::UnboundedSender<Msg>) -> Self {
        Self {
            active: HashMap::new(),
            msg_tx,
        }
    }

    /// Start newly declared subscriptions, abort vanished ones, leave the
    /// rest running.
    pub fn reconcile(&mut self, declared: Vec<Subscription<Msg>>) {
        let mut declared: HashMap<SubscriptionId, Subscription<Msg>> = declared
            .into_iter()
            .map(|sub| (sub.id.clone(), sub))
            .collect();

        self.active.retain(|id, handle| {
            if declared.contains_key(id) {
                true
            } else {
                tracing::trace!(?id, "stopping subscription");
                handle.abort();
                false
            }
        });

        for (id, sub) in declared.drain() {
            if !self.active.contains_key(&id) {
                tracing::trace!(?id, "starting subscription");
                let handle = (sub.spawn)(self.msg_tx.clone());
                self.active.insert(id, handle);
            }
        }
    }

    /// Abort everything.
    pub fn shutdown(&mut self) {
        for (_, handle) in self.active.drain() {
            handle.abort();
        }
    }

    #[cfg(test)]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}
