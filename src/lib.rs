//! PriceDrop scraper: a browser-backed product search service
//!
//! Accepts a query and a storefront name, scrapes the storefront's search
//! page in a fresh headless-browser context, and returns the products found
//! as JSON.

pub mod browser;
pub mod config;
pub mod platforms;
pub mod results;
pub mod search;
pub mod web;

pub use config::Settings;
pub use platforms::{Platform, PlatformHandler};
pub use results::{Product, SearchResult};
pub use search::{Search, SearchRequest, SearchResponse};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
