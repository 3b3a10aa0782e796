//! Result types produced by platform handlers

mod types;

pub use types::*;
