//! Application state shared across handlers

use crate::browser::ContextProvider;
use crate::config::Settings;
use crate::platforms::PlatformRegistry;
use crate::search::Search;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Platform registry
    pub registry: Arc<PlatformRegistry>,
    /// Search executor
    pub search: Arc<Search>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        settings: Settings,
        registry: PlatformRegistry,
        provider: Arc<dyn ContextProvider>,
    ) -> Self {
        let registry = Arc::new(registry);
        let search = Arc::new(Search::new(registry.clone(), provider));

        Self {
            settings: Arc::new(settings),
            registry,
            search,
        }
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }
}
