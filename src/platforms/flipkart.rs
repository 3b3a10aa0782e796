//! Flipkart storefront

use super::traits::*;
use crate::browser::BrowserPage;
use crate::config::{PlatformConfig, DEFAULT_MAX_RESULTS};
use crate::results::SearchResult;
use anyhow::Result;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};
use url::Url;

static BASE_URL: Lazy<Url> = Lazy::new(|| Url::parse("https://www.flipkart.com").unwrap());

// Flipkart rotates its obfuscated class names; list and grid layouts differ
static SELECTORS: Lazy<CardSelectors> = Lazy::new(|| CardSelectors {
    card: Selector::parse("div[data-id]").unwrap(),
    title: Selector::parse("div.KzDlHZ, a.wjcEIp, a.WKTcLC, div._4rR01T, a.s1Q9rs, a.IRpwTa")
        .unwrap(),
    price: Selector::parse("div.Nx9bqj, div._30jeq3").unwrap(),
    image: Selector::parse("img").unwrap(),
    link: Selector::parse("a[href]").unwrap(),
});

/// Flipkart product search
pub struct Flipkart {
    base_url: Url,
    max_results: usize,
}

impl Flipkart {
    pub fn new() -> Self {
        Self {
            base_url: BASE_URL.clone(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl Default for Flipkart {
    fn default() -> Self {
        Self::new()
    }
}

impl Storefront for Flipkart {
    fn search_url(&self, query: &str) -> Result<Url> {
        let mut url = self.base_url.join("/search")?;
        url.query_pairs_mut().append_pair("q", query);
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
        let element = match card.select(&SELECTORS.title).next() {
            Some(e) => e,
            None => return String::new(),
        };

        // Grid titles are truncated in text but complete in the title attribute
        match element.value().attr("title") {
            Some(full) if !full.trim().is_empty() => clean_text(full),
            _ => clean_text(&element.text().collect::<String>()),
        }
    }
}

#[async_trait]
impl PlatformHandler for Flipkart {
    fn platform(&self) -> Platform {
        Platform::Flipkart
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::mock::MockProvider;

    const FIXTURE: &str = r#"
        <html><body>
        <div data-id="MOBGTAGPTB3VS24W">
          <a class="CGtC98" href="/apple-iphone-15/p/itm6ac6485515ae4?pid=MOBGTAGPTB3VS24W">
            <img class="DByuf4" src="https://rukminim2.flixcart.com/image/iphone.jpg">
            <div class="KzDlHZ">Apple iPhone 15 (Black, 128 GB)</div>
            <div class="Nx9bqj _4b5DiR">₹65,999</div>
          </a>
        </div>
        <div data-id="ACCG2Z8ZZGZ">
          <a class="wjcEIp" title="Spigen Ultra Hybrid Back Cover for Apple iPhone 15"
             href="/spigen-back-cover/p/itm1">Spigen Ultra Hybrid Back...</a>
          <div class="Nx9bqj">₹1,299</div>
        </div>
        <div data-id="AD-SLOT"><span>Sponsored</span></div>
        </body></html>
    "#;

    #[test]
    fn test_search_url() {
        let url = Flipkart::new().search_url("iphone 15").unwrap();
        assert_eq!(url.as_str(), "https://www.flipkart.com/search?q=iphone+15");
    }

    #[test]
    fn test_parse_results() {
        let products = Flipkart::new().parse_results(FIXTURE);
        assert_eq!(products.len(), 2);

        assert_eq!(products[0].title, "Apple iPhone 15 (Black, 128 GB)");
        assert_eq!(products[0].price.as_deref(), Some("65,999"));
        assert_eq!(
            products[0].image_url.as_deref(),
            Some("https://rukminim2.flixcart.com/image/iphone.jpg")
        );
        assert_eq!(
            products[0].product_url.as_deref(),
            Some("https://www.flipkart.com/apple-iphone-15/p/itm6ac6485515ae4?pid=MOBGTAGPTB3VS24W")
        );

        assert_eq!(products[1].title, "Spigen Ultra Hybrid Back Cover for Apple iPhone 15");
        assert_eq!(products[1].price.as_deref(), Some("1,299"));
        assert_eq!(products[1].image_url, None);
    }

    #[tokio::test]
    async fn test_search_navigates_and_scrapes() {
        let provider = MockProvider::new().with_html(FIXTURE);
        let page = provider.page();

        let results = Flipkart::new().search(&page, "iphone").await.unwrap();

        assert_eq!(provider.stats().visited(), vec!["https://www.flipkart.com/search?q=iphone"]);
        assert_eq!(results.len(), 2);
    }
}
