//! Search endpoint core
//!
//! Resolves the platform handler, leases a configured browser page for the
//! duration of one search, and folds every outcome into a JSON envelope.

mod error;
mod executor;
mod models;

pub use error::SearchError;
pub use executor::Search;
pub use models::*;
