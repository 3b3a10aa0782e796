//! Fixed browser identity presented to every scraped storefront

use super::traits::Viewport;
use std::collections::HashMap;

/// Desktop Chrome user agent sent on every search
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                              (KHTML, like Gecko) Chrome/92.0.4515.131 Safari/537.36";

/// Language preference sent on every search
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Desktop viewport
pub const VIEWPORT: Viewport = Viewport::new(1280, 800);

/// Extra headers applied to each page before a search
pub fn identity_headers() -> HashMap<String, String> {
    HashMap::from([
        ("User-Agent".to_string(), USER_AGENT.to_string()),
        ("Accept-Language".to_string(), ACCEPT_LANGUAGE.to_string()),
    ])
}
