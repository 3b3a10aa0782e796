//! Search execution: one platform, one page, guaranteed cleanup

use super::error::SearchError;
use super::models::{round_seconds, SearchRequest, SearchResponse, SearchSuccess};
use crate::browser::{identity_headers, ContextProvider, PageLease, VIEWPORT};
use crate::platforms::{PlatformHandler, PlatformRegistry};
use crate::results::SearchResult;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Search executor that runs a query against one platform handler
pub struct Search {
    /// Platform registry
    registry: Arc<PlatformRegistry>,
    /// Source of per-request browser contexts
    provider: Arc<dyn ContextProvider>,
}

impl Search {
    /// Create a new search executor
    pub fn new(registry: Arc<PlatformRegistry>, provider: Arc<dyn ContextProvider>) -> Self {
        Self { registry, provider }
    }

    /// Execute a search, always producing a response envelope
    pub async fn execute(&self, request: &SearchRequest) -> SearchResponse {
        let span = info_span!(
            "search",
            request_id = %Uuid::new_v4(),
            platform = %request.platform,
            query = %request.query
        );

        async move {
            match self.run(request).await {
                Ok(success) => {
                    info!(
                        "Returned {} results in {:.2}s",
                        success.results.len(),
                        success.time_taken
                    );
                    SearchResponse::Success(success)
                }
                Err(e) => {
                    match &e {
                        SearchError::Handler(cause) => error!("Platform search failed: {:?}", cause),
                        SearchError::Browser(cause) => error!("Browser failure: {:?}", cause),
                        _ => warn!("Search rejected: {}", e),
                    }
                    SearchResponse::error(e.to_string())
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run(&self, request: &SearchRequest) -> Result<SearchSuccess, SearchError> {
        let handler = self
            .registry
            .get(&request.platform)
            .ok_or_else(|| SearchError::UnsupportedPlatform(request.platform.clone()))?;

        if request.query.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let lease = PageLease::acquire(self.provider.as_ref()).await?;
        let outcome = Self::search_on(handler.as_ref(), &lease, &request.query).await;
        lease.release().await;

        let (results, elapsed) = outcome?;

        Ok(SearchSuccess {
            platform: request.platform.clone(),
            query: request.query.clone(),
            results,
            time_taken: round_seconds(elapsed),
        })
    }

    /// Configure the leased page and run the handler on it
    async fn search_on(
        handler: &dyn PlatformHandler,
        lease: &PageLease,
        query: &str,
    ) -> Result<(Vec<SearchResult>, Duration), SearchError> {
        let page = lease.page()?;
        page.set_extra_http_headers(identity_headers()).await?;
        page.set_viewport_size(VIEWPORT).await?;

        let start = Instant::now();
        let results = handler
            .search(page, query)
            .await
            .map_err(SearchError::Handler)?;

        Ok((results, start.elapsed()))
    }
}
