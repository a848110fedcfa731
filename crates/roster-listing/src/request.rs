use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_REQUEST: AtomicU64 = AtomicU64::new(1);

/// Identifies one remote fetch. Unique for the life of the process, so a
/// response addressed to a listing that has since been replaced can never
/// match a request issued by its successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    fn next() -> Self {
        Self(NEXT_REQUEST.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Last-request-wins bookkeeping for one listing.
///
/// Every query change issues a new id; only a response carrying the most
/// recently issued id is accepted, and accepting it settles the tracker.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: Option<RequestId>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue an id for a new request, superseding any in flight.
    pub fn issue(&mut self) -> RequestId {
        let id = RequestId::next();
        if let Some(previous) = self.latest.replace(id) {
            tracing::debug!(%previous, superseded_by = %id, "request superseded");
        }
        id
    }

    /// Whether `id` is the request currently awaited.
    pub fn is_latest(&self, id: RequestId) -> bool {
        self.latest == Some(id)
    }

    /// Accept the response for `id` if it is the one awaited.
    pub fn settle(&mut self, id: RequestId) -> bool {
        if self.is_latest(id) {
            self.latest = None;
            true
        } else {
            tracing::debug!(%id, "discarding stale response");
            false
        }
    }

    /// Stop awaiting anything; every outstanding response becomes stale.
    pub fn cancel(&mut self) {
        self.latest = None;
    }

    pub fn in_flight(&self) -> bool {
        self.latest.is_some()
    }
}
