//! **roster**: paginated, filterable listings for terminal HR consoles.
//!
//! Umbrella crate that re-exports everything needed to build a console
//! from a single dependency:
//!
//! * the runtime from [`roster_core`] at the crate root ([`Model`],
//!   [`Component`], [`Command`], [`Subscription`], [`Program`], [`run`],
//!   [`run_with`], ...),
//! * the components under [`widgets`] ([`widgets::Listing`],
//!   [`widgets::DataTable`], [`widgets::FilterBar`], ...),
//! * the terminal-free listing layer under [`listing`]
//!   ([`listing::ListState`], [`listing::MemorySource`],
//!   [`listing::ApiClient`], ...),
//! * [`ratatui`], [`crossterm`] and [`tokio`].
//!
//! # Quick start
//!
//! ```ignore
//! use roster::listing::{ListingConfig, MemorySource};
//! use roster::widgets::{Column, Listing};
//!
//! let mut employees = Listing::new(
//!     "Employees",
//!     MemorySource::new(staff).search_field(|e: &Employee| e.name.clone()),
//!     vec![Column::text("Name", |e: &Employee| e.name.clone())],
//!     &ListingConfig::default(),
//! );
//! let cmd = employees.mount();
//! ```
//!
//! The `roster-console` binary in this crate is a complete example with
//! in-memory and remote tabs.

pub use roster_core::*;

pub mod widgets {
    pub use roster_widgets::*;
}

pub mod listing {
    pub use roster_listing::*;
}

pub use crossterm;
pub use ratatui;
pub use tokio;
