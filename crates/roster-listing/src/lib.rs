//! Terminal-free core of roster listings.
//!
//! A [`ListState`] describes what the user is looking at: page, page size,
//! search term and filter selections. A [`ListDataSource`] turns that state
//! into a [`Page`], either by filtering and slicing a collection held in
//! memory ([`MemorySource`]) or by asking a REST endpoint
//! ([`RemoteSource`] over a [`PageFetcher`] such as [`ApiClient`]).
//!
//! Remote responses are matched against the latest [`RequestId`] so that a
//! slow reply to an old query can never overwrite a newer one.

pub mod client;
pub mod config;
pub mod error;
pub mod page;
pub mod pagination;
pub mod query;
pub mod request;
pub mod session;
pub mod shape;
pub mod source;
pub mod state;

pub use client::ApiClient;
pub use config::{ApiConfig, ConsoleSettings, ListingConfig};
pub use error::ListError;
pub use page::Page;
pub use pagination::PageSlot;
pub use query::QueryParams;
pub use request::{RequestId, RequestTracker};
pub use session::Session;
pub use shape::ResponseShape;
pub use source::{ListDataSource, MemorySource, PageFetcher, PageRequest, RemoteSource};
pub use state::ListState;
