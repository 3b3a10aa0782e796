//! Result type definitions

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

/// A single result as produced by a platform handler
///
/// The endpoint passes results through untouched, so their shape belongs to
/// the handler that produced them.
pub type SearchResult = serde_json::Value;

/// First numeric run in a price string, with thousands and decimal separators
static PRICE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9][0-9.,]*").unwrap());

/// A product listing scraped from a storefront search page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Listing title
    pub title: String,
    /// Price text without currency symbols, e.g. "79,999"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Product thumbnail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Absolute link to the product page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,
}

impl Product {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            price: None,
            image_url: None,
            product_url: None,
        }
    }

    /// Set the price from raw element text; blank prices are ignored
    pub fn with_price(mut self, raw: &str) -> Self {
        self.price = normalize_price(raw);
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Set the product link, resolving relative hrefs against `base`
    pub fn with_link(mut self, base: &Url, href: &str) -> Self {
        self.product_url = base.join(href).ok().map(|u| u.to_string());
        self
    }

    /// Convert into the opaque value carried by the search response
    pub fn into_result(self) -> SearchResult {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Extract the price figure from element text, dropping currency symbols
///
/// Ranges keep their lower bound.
pub fn normalize_price(raw: &str) -> Option<String> {
    let number = PRICE_NUMBER.find(raw)?.as_str();
    Some(number.trim_end_matches(|c: char| c == '.' || c == ',').to_string())
}
