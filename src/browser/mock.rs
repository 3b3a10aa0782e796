//! Recording browser doubles for tests

use super::traits::{BrowserContext, BrowserError, BrowserPage, ContextProvider, Viewport};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Default)]
struct Recorded {
    events: Vec<&'static str>,
    headers: Option<HashMap<String, String>>,
    viewport: Option<Viewport>,
    visited: Vec<String>,
}

/// Shared view of everything the mock browser saw
#[derive(Debug, Clone, Default)]
pub struct MockStats {
    inner: Arc<Mutex<Recorded>>,
}

impl MockStats {
    fn record(&self, event: &'static str) {
        self.inner.lock().unwrap().events.push(event);
    }

    fn count(&self, event: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .events
            .iter()
            .filter(|e| **e == event)
            .count()
    }

    pub fn events(&self) -> Vec<&'static str> {
        self.inner.lock().unwrap().events.clone()
    }

    pub fn contexts_acquired(&self) -> usize {
        self.count("acquire")
    }

    pub fn pages_opened(&self) -> usize {
        self.count("new_page")
    }

    pub fn pages_closed(&self) -> usize {
        self.count("page.close")
    }

    pub fn contexts_closed(&self) -> usize {
        self.count("context.close")
    }

    pub fn headers(&self) -> Option<HashMap<String, String>> {
        self.inner.lock().unwrap().headers.clone()
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.inner.lock().unwrap().viewport
    }

    pub fn visited(&self) -> Vec<String> {
        self.inner.lock().unwrap().visited.clone()
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Failures {
    acquire: bool,
    new_page: bool,
    page_close: bool,
    viewport: bool,
}

/// Context provider that records calls instead of driving a browser
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    stats: MockStats,
    html: Arc<String>,
    failures: Failures,
    page_close_delay: Option<Duration>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// HTML returned by every page's `content()`
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Arc::new(html.into());
        self
    }

    pub fn fail_acquire(mut self) -> Self {
        self.failures.acquire = true;
        self
    }

    pub fn fail_new_page(mut self) -> Self {
        self.failures.new_page = true;
        self
    }

    pub fn fail_page_close(mut self) -> Self {
        self.failures.page_close = true;
        self
    }

    pub fn fail_viewport(mut self) -> Self {
        self.failures.viewport = true;
        self
    }

    /// Pages take `delay` to close
    pub fn slow_page_close(mut self, delay: Duration) -> Self {
        self.page_close_delay = Some(delay);
        self
    }

    pub fn stats(&self) -> MockStats {
        self.stats.clone()
    }

    /// A standalone page, for exercising handlers directly
    pub fn page(&self) -> MockPage {
        MockPage {
            stats: self.stats.clone(),
            html: self.html.clone(),
            failures: self.failures,
            close_delay: self.page_close_delay,
        }
    }
}

#[async_trait]
impl ContextProvider for MockProvider {
    async fn acquire(&self) -> Result<Box<dyn BrowserContext>, BrowserError> {
        if self.failures.acquire {
            return Err(BrowserError::Context("mock acquire failure".to_string()));
        }
        self.stats.record("acquire");
        Ok(Box::new(MockContext {
            provider: self.clone(),
        }))
    }
}

struct MockContext {
    provider: MockProvider,
}

#[async_trait]
impl BrowserContext for MockContext {
    async fn new_page(&self) -> Result<Box<dyn BrowserPage>, BrowserError> {
        if self.provider.failures.new_page {
            return Err(BrowserError::Page("mock new_page failure".to_string()));
        }
        self.provider.stats.record("new_page");
        Ok(Box::new(self.provider.page()))
    }

    async fn close(&self) -> Result<(), BrowserError> {
        self.provider.stats.record("context.close");
        Ok(())
    }
}

pub struct MockPage {
    stats: MockStats,
    html: Arc<String>,
    failures: Failures,
    close_delay: Option<Duration>,
}

#[async_trait]
impl BrowserPage for MockPage {
    async fn set_extra_http_headers(
        &self,
        headers: HashMap<String, String>,
    ) -> Result<(), BrowserError> {
        self.stats.record("page.headers");
        self.stats.inner.lock().unwrap().headers = Some(headers);
        Ok(())
    }

    async fn set_viewport_size(&self, viewport: Viewport) -> Result<(), BrowserError> {
        if self.failures.viewport {
            return Err(BrowserError::Page("mock viewport failure".to_string()));
        }
        self.stats.record("page.viewport");
        self.stats.inner.lock().unwrap().viewport = Some(viewport);
        Ok(())
    }

    async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        self.stats.record("page.goto");
        self.stats.inner.lock().unwrap().visited.push(url.to_string());
        Ok(())
    }

    async fn content(&self) -> Result<String, BrowserError> {
        Ok(self.html.as_ref().clone())
    }

    async fn close(&self) -> Result<(), BrowserError> {
        if let Some(delay) = self.close_delay {
            tokio::time::sleep(delay).await;
        }
        self.stats.record("page.close");
        if self.failures.page_close {
            return Err(BrowserError::Page("mock close failure".to_string()));
        }
        Ok(())
    }
}
