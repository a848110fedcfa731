//! Listing components for roster consoles.
//!
//! Every widget implements [`roster_core::Component`]. Most callers only
//! need [`Listing`](listing::Listing), which composes the rest around a
//! [`ListDataSource`](roster_listing::ListDataSource).
//!
//! # Components
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`listing`] | Filter bar, table and pagination bound to a data source |
//! | [`data_table`] | Column-driven table with loading / empty / populated body |
//! | [`pagination`] | Page-number strip with ellipsis and page-size selector |
//! | [`filter_bar`] | Debounced search plus dropdown filters |
//! | [`filter_select`] | Single dropdown filter with an "All" entry |
//! | [`search_field`] | Single-line text input |
//!
//! # Utilities
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`key`] | Key combinations, bindings and hint lines |
//! | [`chrome`] | Panel borders, row stripes and spinner frames |

pub mod chrome;
pub mod data_table;
pub mod filter_bar;
pub mod filter_select;
pub mod key;
pub mod listing;
pub mod pagination;
pub mod search_field;

pub use data_table::{BodyState, Column, DataTable};
pub use filter_bar::{BarSlot, FilterBar};
pub use filter_select::{FilterOption, FilterSelect, SelectMode};
pub use listing::{Listing, Zone};
pub use pagination::Pagination;
pub use search_field::SearchField;
