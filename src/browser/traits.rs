//! Browser seams used by the search endpoint and platform handlers

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised by the browser layer
#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Failed to create browser context: {0}")]
    Context(String),

    #[error("Page error: {0}")]
    Page(String),

    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("Browser resources already released")]
    Released,
}

impl From<chromiumoxide::error::CdpError> for BrowserError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        BrowserError::Page(err.to_string())
    }
}

/// Page viewport in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A single browser tab used for one search and then discarded
#[async_trait]
pub trait BrowserPage: Send + Sync {
    /// Headers sent with every request the page makes
    async fn set_extra_http_headers(
        &self,
        headers: HashMap<String, String>,
    ) -> Result<(), BrowserError>;

    /// Resize the page viewport
    async fn set_viewport_size(&self, viewport: Viewport) -> Result<(), BrowserError>;

    /// Navigate and wait for the load to finish
    async fn goto(&self, url: &str) -> Result<(), BrowserError>;

    /// Rendered HTML of the current document
    async fn content(&self) -> Result<String, BrowserError>;

    /// Close the tab
    async fn close(&self) -> Result<(), BrowserError>;
}

/// An isolated browser session (cookies, storage) that owns pages
#[async_trait]
pub trait BrowserContext: Send + Sync {
    async fn new_page(&self) -> Result<Box<dyn BrowserPage>, BrowserError>;

    async fn close(&self) -> Result<(), BrowserError>;
}

/// Source of browser contexts, one per request
#[async_trait]
pub trait ContextProvider: Send + Sync {
    async fn acquire(&self) -> Result<Box<dyn BrowserContext>, BrowserError>;
}
