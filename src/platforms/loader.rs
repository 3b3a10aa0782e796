//! Platform loader for initializing handlers from configuration

use super::registry::PlatformRegistry;
use super::traits::{Platform, PlatformHandler};
use super::{amazon, ebay, flipkart};
use crate::config::{PlatformConfig, Settings};
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Loader for initializing platform handlers from configuration
pub struct PlatformLoader;

impl PlatformLoader {
    /// Load all enabled platforms from settings
    ///
    /// A misconfigured platform is skipped with a warning rather than
    /// failing startup.
    pub fn load(settings: &Settings) -> Result<PlatformRegistry> {
        let mut registry = PlatformRegistry::new();

        for config in settings.platforms.iter().filter(|p| p.disabled) {
            info!("Skipping disabled platform: {}", config.name);
        }

        for config in settings.enabled_platforms() {
            match Self::create_handler(config) {
                Ok(handler) => {
                    info!("Loaded platform: {}", config.name);
                    registry.register(handler);
                }
                Err(e) => {
                    warn!("Failed to load platform {}: {}", config.name, e);
                }
            }
        }

        info!("Loaded {} platforms", registry.len());
        Ok(registry)
    }

    /// Create a handler instance for a configured platform
    fn create_handler(config: &PlatformConfig) -> Result<Arc<dyn PlatformHandler>> {
        let platform: Platform = config.name.parse()?;

        let mut handler: Box<dyn PlatformHandler> = match platform {
            Platform::Amazon => Box::new(amazon::Amazon::new()),
            Platform::Flipkart => Box::new(flipkart::Flipkart::new()),
            Platform::Ebay => Box::new(ebay::Ebay::new()),
        };

        handler.configure(config)?;

        Ok(Arc::from(handler))
    }
}
