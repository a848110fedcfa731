use crate::error::ListError;
use crate::page::Page;
use crate::query::QueryParams;
use crate::request::{RequestId, RequestTracker};
use crate::state::ListState;
use futures::future::BoxFuture;
use std::fmt;
use std::sync::Arc;

/// One GET against a listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Path relative to the API base, e.g. `attendance`.
    pub endpoint: String,
    pub page: usize,
    pub page_size: usize,
    /// Encoded query pairs, including page and limit.
    pub query: Vec<(String, String)>,
}

/// Transport seam for remote listings.
///
/// [`ApiClient`](crate::ApiClient) is the HTTP implementation; tests script
/// their own.
pub trait PageFetcher<T>: Send + Sync {
    /// Fetch one page. The future always resolves, to a page or an error.
    fn fetch(&self, request: PageRequest) -> BoxFuture<'static, Result<Page<T>, ListError>>;
}

/// Pages served by a remote endpoint, with last-request-wins tracking.
pub struct RemoteSource<T> {
    fetcher: Arc<dyn PageFetcher<T>>,
    endpoint: String,
    params: QueryParams,
    tracker: RequestTracker,
}

impl<T> fmt::Debug for RemoteSource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteSource")
            .field("endpoint", &self.endpoint)
            .field("params", &self.params)
            .field("tracker", &self.tracker)
            .finish_non_exhaustive()
    }
}

impl<T: Send + 'static> RemoteSource<T> {
    pub fn new(fetcher: Arc<dyn PageFetcher<T>>, endpoint: impl Into<String>) -> Self {
        Self {
            fetcher,
            endpoint: endpoint.into(),
            params: QueryParams::default(),
            tracker: RequestTracker::new(),
        }
    }

    /// Use custom query parameter names.
    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The request `state` maps to.
    pub fn request(&self, state: &ListState) -> PageRequest {
        PageRequest {
            endpoint: self.endpoint.clone(),
            page: state.page(),
            page_size: state.page_size(),
            query: self.params.encode(state),
        }
    }

    /// Start fetching the page for `state`, superseding whatever is in
    /// flight. The caller runs the future and hands the outcome back with
    /// [`accept`](RemoteSource::accept).
    pub fn issue(
        &mut self,
        state: &ListState,
    ) -> (RequestId, BoxFuture<'static, Result<Page<T>, ListError>>) {
        let request = self.request(state);
        let id = self.tracker.issue();
        tracing::debug!(
            %id,
            endpoint = %request.endpoint,
            page = request.page,
            page_size = request.page_size,
            "issuing page request"
        );
        (id, self.fetcher.fetch(request))
    }

    /// Whether the response for `id` should be applied. Settles the
    /// tracker when it should.
    pub fn accept(&mut self, id: RequestId) -> bool {
        self.tracker.settle(id)
    }

    /// Make every outstanding response stale.
    pub fn cancel(&mut self) {
        self.tracker.cancel();
    }

    pub fn in_flight(&self) -> bool {
        self.tracker.in_flight()
    }
}
