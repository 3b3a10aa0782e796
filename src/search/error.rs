//! Search endpoint errors

use crate::browser::BrowserError;
use thiserror::Error;

/// Everything that can end a search without results
///
/// The `Display` text is what the client sees; handler failures keep their
/// full chain for the operator log.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Query must not be empty")]
    EmptyQuery,

    #[error(transparent)]
    Browser(#[from] BrowserError),

    #[error("{0}")]
    Handler(anyhow::Error),
}
