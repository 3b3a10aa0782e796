//! Registry of the platform handlers available to the search endpoint

use super::traits::{Platform, PlatformHandler};
use std::collections::HashMap;
use std::sync::Arc;

/// Static mapping from platform to handler, built once at startup
pub struct PlatformRegistry {
    handlers: HashMap<Platform, Arc<dyn PlatformHandler>>,
}

impl PlatformRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler, replacing any previous handler for its platform
    pub fn register(&mut self, handler: Arc<dyn PlatformHandler>) {
        self.handlers.insert(handler.platform(), handler);
    }

    /// Look up the handler for a platform identifier
    ///
    /// Unknown identifiers and unregistered platforms both yield `None`.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn PlatformHandler>> {
        let platform = name.parse::<Platform>().ok()?;
        self.handlers.get(&platform)
    }

    /// Registered platform identifiers, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut platforms: Vec<Platform> = self.handlers.keys().copied().collect();
        platforms.sort();
        platforms.into_iter().map(|p| p.as_str()).collect()
    }

    /// Get number of registered handlers
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for PlatformRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platforms::{ebay::Ebay, flipkart::Flipkart};

    #[test]
    fn test_registry() {
        let mut registry = PlatformRegistry::new();
        assert!(registry.is_empty());

        registry.register(Arc::new(Ebay::new()));
        registry.register(Arc::new(Flipkart::new()));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("ebay").map(|h| h.platform()), Some(Platform::Ebay));
        assert!(registry.get("amazon").is_none());
        assert!(registry.get("unknown_site").is_none());
        assert_eq!(registry.names(), vec!["flipkart", "ebay"]);
    }

    #[test]
    fn test_register_replaces_existing_handler() {
        let mut registry = PlatformRegistry::new();
        registry.register(Arc::new(Ebay::new()));
        registry.register(Arc::new(Ebay::new()));
        assert_eq!(registry.len(), 1);
    }
}
