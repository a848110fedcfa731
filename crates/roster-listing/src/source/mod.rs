//! Where a listing's pages come from.

mod memory;
mod remote;

pub use memory::MemorySource;
pub use remote::{PageFetcher, PageRequest, RemoteSource};

/// The data behind a listing: either held in memory and sliced locally, or
/// fetched page by page from an endpoint.
#[derive(Debug)]
pub enum ListDataSource<T> {
    Memory(MemorySource<T>),
    Remote(RemoteSource<T>),
}

impl<T> ListDataSource<T> {
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

impl<T> From<MemorySource<T>> for ListDataSource<T> {
    fn from(source: MemorySource<T>) -> Self {
        Self::Memory(source)
    }
}

impl<T> From<RemoteSource<T>> for ListDataSource<T> {
    fn from(source: RemoteSource<T>) -> Self {
        Self::Remote(source)
    }
}
