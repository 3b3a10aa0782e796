//! Amazon (India) storefront

use super::traits::*;
use crate::browser::BrowserPage;
use crate::config::{PlatformConfig, DEFAULT_MAX_RESULTS};
use crate::results::SearchResult;
use anyhow::Result;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::Selector;
use url::Url;

static BASE_URL: Lazy<Url> = Lazy::new(|| Url::parse("https://www.amazon.in").unwrap());

static SELECTORS: Lazy<CardSelectors> = Lazy::new(|| CardSelectors {
    card: Selector::parse(r#"div[data-component-type="s-search-result"]"#).unwrap(),
    title: Selector::parse("h2 span, h2").unwrap(),
    price: Selector::parse("span.a-price-whole").unwrap(),
    image: Selector::parse("img.s-image").unwrap(),
    link: Selector::parse("a.s-no-outline, h2 a, a.a-link-normal").unwrap(),
});

/// Amazon product search
pub struct Amazon {
    base_url: Url,
    max_results: usize,
}

impl Amazon {
    pub fn new() -> Self {
        Self {
            base_url: BASE_URL.clone(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl Default for Amazon {
    fn default() -> Self {
        Self::new()
    }
}

impl Storefront for Amazon {
    fn search_url(&self, query: &str) -> Result<Url> {
        let mut url = self.base_url.join("/s")?;
        url.query_pairs_mut().append_pair("k", query);
        Ok(url)
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn max_results(&self) -> usize {
        self.max_results
    }

    fn selectors(&self) -> &CardSelectors {
        &SELECTORS
    }
}

#[async_trait]
impl PlatformHandler for Amazon {
    fn platform(&self) -> Platform {
        Platform::Amazon
    }

    fn configure(&mut self, config: &PlatformConfig) -> Result<()> {
        if let Some(base_url) = base_url_override(config)? {
            self.base_url = base_url;
        }
        self.max_results = config.max_results();
        Ok(())
    }

    async fn search(&self, page: &dyn BrowserPage, query: &str) -> Result<Vec<SearchResult>> {
        scrape(self, page, query).await
    }
}
