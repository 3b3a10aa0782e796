//! Scoped ownership of a request's browser context and page
//!
//! A `PageLease` is released explicitly with [`PageLease::release`]. If it is
//! dropped first (the request future was cancelled or a handler panicked),
//! the drop guard schedules the same release on the tokio runtime. The
//! release itself runs as its own task, so cancelling the caller while a
//! close is in flight does not abandon the remaining steps.

use super::traits::{BrowserContext, BrowserError, BrowserPage, ContextProvider};
use tracing::{debug, warn};

pub struct PageLease {
    page: Option<Box<dyn BrowserPage>>,
    context: Option<Box<dyn BrowserContext>>,
}

impl PageLease {
    /// Acquire a context and open a page in it
    ///
    /// If the page cannot be created the context is closed before the error
    /// is returned.
    pub async fn acquire(provider: &dyn ContextProvider) -> Result<Self, BrowserError> {
        let context = provider.acquire().await?;

        // Held by the lease from here on so the drop guard covers page creation
        let mut lease = Self {
            page: None,
            context: Some(context),
        };

        let opened = match lease.context.as_deref() {
            Some(context) => context.new_page().await,
            None => Err(BrowserError::Released),
        };

        match opened {
            Ok(page) => {
                lease.page = Some(page);
                Ok(lease)
            }
            Err(e) => {
                lease.release().await;
                Err(e)
            }
        }
    }

    /// The leased page
    pub fn page(&self) -> Result<&dyn BrowserPage, BrowserError> {
        self.page.as_deref().ok_or(BrowserError::Released)
    }

    /// Close the page, then the context
    ///
    /// Completes even if the returned future is dropped part way.
    pub async fn release(mut self) {
        let task = tokio::spawn(release_parts(self.page.take(), self.context.take()));
        if let Err(e) = task.await {
            warn!("Page lease release task failed: {}", e);
        }
    }
}

impl Drop for PageLease {
    fn drop(&mut self) {
        let page = self.page.take();
        let context = self.context.take();
        if page.is_none() && context.is_none() {
            return;
        }

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                debug!("Page lease dropped before release, closing in background");
                handle.spawn(release_parts(page, context));
            }
            Err(_) => {
                warn!("Page lease dropped outside a runtime; browser resources leaked");
            }
        }
    }
}

async fn release_parts(page: Option<Box<dyn BrowserPage>>, context: Option<Box<dyn BrowserContext>>) {
    if let Some(page) = page {
        if let Err(e) = page.close().await {
            warn!("Failed to close page: {}", e);
        }
    }
    if let Some(context) = context {
        close_context(context.as_ref()).await;
    }
}

async fn close_context(context: &dyn BrowserContext) {
    if let Err(e) = context.close().await {
        warn!("Failed to close browser context: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::mock::MockProvider;
    use std::time::Duration;

    #[tokio::test]
    async fn test_release_closes_page_then_context_once() {
        let provider = MockProvider::new();
        let lease = PageLease::acquire(&provider).await.unwrap();
        assert!(lease.page().is_ok());

        lease.release().await;

        let stats = provider.stats();
        assert_eq!(stats.contexts_acquired(), 1);
        assert_eq!(stats.pages_opened(), 1);
        assert_eq!(stats.pages_closed(), 1);
        assert_eq!(stats.contexts_closed(), 1);
        assert_eq!(stats.events(), vec!["acquire", "new_page", "page.close", "context.close"]);
    }

    #[tokio::test]
    async fn test_failed_page_creation_closes_context() {
        let provider = MockProvider::new().fail_new_page();
        let result = PageLease::acquire(&provider).await;
        assert!(result.is_err());

        let stats = provider.stats();
        assert_eq!(stats.contexts_acquired(), 1);
        assert_eq!(stats.pages_opened(), 0);
        assert_eq!(stats.contexts_closed(), 1);
    }

    #[tokio::test]
    async fn test_failed_acquire_touches_nothing() {
        let provider = MockProvider::new().fail_acquire();
        assert!(PageLease::acquire(&provider).await.is_err());
        assert_eq!(provider.stats().contexts_closed(), 0);
    }

    #[tokio::test]
    async fn test_drop_without_release_closes_in_background() {
        let provider = MockProvider::new();
        let lease = PageLease::acquire(&provider).await.unwrap();
        drop(lease);

        for _ in 0..50 {
            if provider.stats().contexts_closed() == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        let stats = provider.stats();
        assert_eq!(stats.pages_closed(), 1);
        assert_eq!(stats.contexts_closed(), 1);
    }

    #[tokio::test]
    async fn test_close_failure_still_closes_context() {
        let provider = MockProvider::new().fail_page_close();
        let lease = PageLease::acquire(&provider).await.unwrap();
        lease.release().await;

        let stats = provider.stats();
        assert_eq!(stats.pages_closed(), 1);
        assert_eq!(stats.contexts_closed(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_release_still_closes_everything() {
        let provider = MockProvider::new().slow_page_close(Duration::from_millis(50));
        let lease = PageLease::acquire(&provider).await.unwrap();

        let cancelled = tokio::time::timeout(Duration::from_millis(10), lease.release()).await;
        assert!(cancelled.is_err());
        assert_eq!(provider.stats().contexts_closed(), 0);

        for _ in 0..50 {
            if provider.stats().contexts_closed() == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        let stats = provider.stats();
        assert_eq!(stats.pages_closed(), 1);
        assert_eq!(stats.contexts_closed(), 1, "context never closed");
        assert_eq!(stats.events(), vec!["acquire", "new_page", "page.close", "context.close"]);
    }
}
