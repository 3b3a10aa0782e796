//! Search request and response models

use crate::results::SearchResult;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A search for `query` on one platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// The search query string
    pub query: String,
    /// Platform identifier (amazon, flipkart, ebay)
    pub platform: String,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            platform: platform.into(),
        }
    }
}

/// Successful search payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSuccess {
    pub platform: String,
    pub query: String,
    pub results: Vec<SearchResult>,
    /// Seconds spent in the platform search, rounded to two decimals
    pub time_taken: f64,
}

/// JSON envelope returned for every search
///
/// Success and failure share one schema family, distinguished by the
/// presence of `results` or `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchResponse {
    Success(SearchSuccess),
    Error { error: String },
}

impl SearchResponse {
    pub fn error(message: impl Into<String>) -> Self {
        SearchResponse::Error {
            error: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SearchResponse::Success(_))
    }
}

/// Round an elapsed duration to seconds with two decimals
pub fn round_seconds(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 100.0).round() / 100.0
}
