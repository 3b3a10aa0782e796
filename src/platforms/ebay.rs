//! eBay storefront

use super::traits::*;
use crate::browser::BrowserPage;
use crate::config::{PlatformConfig, DEFAULT_MAX_RESULTS};
use crate::results::SearchResult;
use anyhow::Result;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};
use url::Url;

static BASE_URL: Lazy<Url> = Lazy::new(|| Url::parse("https://www.ebay.com").unwrap());

static SELECTORS: Lazy<CardSelectors> = Lazy::new(|| CardSelectors {
    card: Selector::parse("li.s-item").unwrap(),
    title: Selector::parse(".s-item__title").unwrap(),
    price: Selector::parse(".s-item__price").unwrap(),
    image: Selector::parse(".s-item__image-wrapper img, .s-item__image img").unwrap(),
    link: Selector::parse("a.s-item__link").unwrap(),
});

/// eBay renders a hidden template card first
const PLACEHOLDER_TITLE: &str = "Shop on eBay";
const NEW_LISTING_PREFIX: &str = "New Listing";

/// eBay product search
pub struct Ebay {
    base_url: Url,
    max_results: usize,
}

impl Ebay {
    pub fn new() -> Self {
        Self {
            base_url: BASE_URL.clone(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl Default for Ebay {
    fn default() -> Self {
        Self::new()
    }
}

impl Storefront for Ebay {
    fn search_url(&self, query: &str) -> Result<Url> {
        let mut url = self.base_url.join("/sch/i.html")?;
        url.query_pairs_mut().append_pair("_nkw", query);
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

    fn title(&self, card: &ElementRef<'_>) -> String {
        let title = first_text(card, &SELECTORS.title);
        let title = match title.strip_prefix(NEW_LISTING_PREFIX) {
            Some(rest) => rest.trim_start().to_string(),
            None => title,
        };

        if title == PLACEHOLDER_TITLE {
            String::new()
        } else {
            title
        }
    }

    // Lazy-loaded thumbnails keep the real URL in data-src
    fn image<'a>(&self, card: &ElementRef<'a>) -> Option<&'a str> {
        card.select(&SELECTORS.image).next().and_then(|i| {
            i.value()
                .attr("data-src")
                .or_else(|| i.value().attr("src"))
        })
    }
}

#[async_trait]
impl PlatformHandler for Ebay {
    fn platform(&self) -> Platform {
        Platform::Ebay
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
