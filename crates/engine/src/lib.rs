//! Sheetmark Engine library.
//!
//! Favorites aggregation and custom sort for character sheets.
//!
//! ## Structure
//!
//! - `favorites/` - Pure core: classifier, sort coordinator, view model
//! - `use_cases/` - Sheet commands orchestrating the core and the item store
//! - `infrastructure/` - Ports and their adapters (store, configuration, tracing)
//! - `api/` - Request dispatch for the host UI layer
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod favorites;
pub mod infrastructure;
pub mod use_cases;

/// End-to-end flows through the in-memory store.
#[cfg(test)]
mod e2e_tests;

pub use app::App;
