//! Platform handler traits and types

use crate::browser::BrowserPage;
use crate::config::PlatformConfig;
use crate::results::{Product, SearchResult};
use anyhow::Result;
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Storefronts the scraper knows how to search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Platform {
    Amazon,
    Flipkart,
    Ebay,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Amazon, Platform::Flipkart, Platform::Ebay];

    /// Identifier used in the `platform` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Amazon => "amazon",
            Platform::Flipkart => "flipkart",
            Platform::Ebay => "ebay",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown platform: {0}")]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPlatform(s.to_string()))
    }
}

/// A platform-specific object that can search one storefront
#[async_trait]
pub trait PlatformHandler: Send + Sync {
    /// Which platform this handler serves
    fn platform(&self) -> Platform;

    /// Apply per-platform settings (called once on startup)
    fn configure(&mut self, _config: &PlatformConfig) -> Result<()> {
        Ok(())
    }

    /// Search the storefront using a page prepared by the caller
    async fn search(&self, page: &dyn BrowserPage, query: &str) -> Result<Vec<SearchResult>>;
}

/// Where the parts of a product card live in a results page
pub struct CardSelectors {
    pub card: Selector,
    pub title: Selector,
    pub price: Selector,
    pub image: Selector,
    pub link: Selector,
}

/// A storefront whose search-results page is scraped from rendered HTML
///
/// Implementors declare selectors and override the per-card hooks where the
/// markup needs it. The card loop itself lives in `parse_results`.
pub trait Storefront: Send + Sync {
    /// Search URL for a query
    fn search_url(&self, query: &str) -> Result<Url>;

    /// Base that relative product links are resolved against
    fn base_url(&self) -> &Url;

    /// Cap on products extracted from one page
    fn max_results(&self) -> usize;

    fn selectors(&self) -> &CardSelectors;

    /// Product title of a card. Empty means the card is skipped.
    fn title(&self, card: &ElementRef<'_>) -> String {
        first_text(card, &self.selectors().title)
    }

    /// Image URL of a card
    fn image<'a>(&self, card: &ElementRef<'a>) -> Option<&'a str> {
        card.select(&self.selectors().image)
            .next()
            .and_then(|i| i.value().attr("src"))
    }

    /// Extract product cards from the search-results HTML
    fn parse_results(&self, html: &str) -> Vec<Product> {
        let document = Html::parse_document(html);
        let selectors = self.selectors();
        let mut products = Vec::new();

        for card in document.select(&selectors.card) {
            if products.len() >= self.max_results() {
                break;
            }

            let title = self.title(&card);
            if title.is_empty() {
                continue;
            }

            let mut product = Product::new(title);

            if let Some(price) = card.select(&selectors.price).next() {
                product = product.with_price(&price.text().collect::<String>());
            }

            if let Some(src) = self.image(&card) {
                product = product.with_image(src);
            }

            if let Some(href) = card
                .select(&selectors.link)
                .next()
                .and_then(|a| a.value().attr("href"))
            {
                product = product.with_link(self.base_url(), href);
            }

            products.push(product);
        }

        products
    }
}

/// Navigate to the storefront's search page and scrape it
pub async fn scrape<S: Storefront + ?Sized>(
    store: &S,
    page: &dyn BrowserPage,
    query: &str,
) -> Result<Vec<SearchResult>> {
    let url = store.search_url(query)?;
    debug!("Navigating to {}", url);

    page.goto(url.as_str()).await?;
    let html = page.content().await?;

    let products = store.parse_results(&html);
    debug!("Extracted {} products from {}", products.len(), url);

    Ok(products.into_iter().map(Product::into_result).collect())
}

/// Parse a base URL override from settings
pub(crate) fn base_url_override(config: &PlatformConfig) -> Result<Option<Url>> {
    config
        .base_url
        .as_deref()
        .map(|raw| {
            Url::parse(raw)
                .map_err(|e| anyhow::anyhow!("Invalid base_url for {}: {}", config.name, e))
        })
        .transpose()
}

/// Whitespace-collapsed text of the first match inside `card`
pub(crate) fn first_text(card: &ElementRef<'_>, selector: &Selector) -> String {
    card.select(selector)
        .next()
        .map(|e| clean_text(&e.text().collect::<String>()))
        .unwrap_or_default()
}

/// Collapse whitespace runs in scraped text
pub(crate) fn clean_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
