//! Settings structures for the scraper configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default cap on products returned by a single platform search
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// Main settings structure, loaded from settings.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub browser: BrowserSettings,
    pub platforms: Vec<PlatformConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            general: GeneralSettings::default(),
            server: ServerSettings::default(),
            browser: BrowserSettings::default(),
            platforms: default_platforms(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (PRICEDROP_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Apply `PRICEDROP_*` overrides from `lookup`
    ///
    /// Values that fail to parse leave the current setting in place.
    fn merge_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("PRICEDROP_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Some(port) = lookup("PRICEDROP_PORT").and_then(|v| v.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = lookup("PRICEDROP_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(headless) = lookup("PRICEDROP_HEADLESS").and_then(|v| v.parse().ok()) {
            self.browser.headless = headless;
        }
    }

    /// Get all enabled platforms
    pub fn enabled_platforms(&self) -> Vec<&PlatformConfig> {
        self.platforms.iter().filter(|p| !p.disabled).collect()
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Instance name reported in startup logs
    pub instance_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "PriceDrop Scraper".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Browser launch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// Run Chromium without a window
    pub headless: bool,
    /// Explicit Chromium executable; auto-detected when unset
    pub executable: Option<PathBuf>,
    /// CDP request timeout in seconds
    pub request_timeout: f64,
    /// Force `--no-sandbox` even outside containers
    pub disable_sandbox: bool,
    /// Extra command line flags passed to Chromium
    pub extra_args: Vec<String>,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            executable: None,
            request_timeout: 30.0,
            disable_sandbox: false,
            extra_args: vec![],
        }
    }
}

/// Individual platform configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Platform identifier (amazon, flipkart, ebay)
    pub name: String,
    /// Whether the platform is disabled
    pub disabled: bool,
    /// Override for the storefront base URL
    pub base_url: Option<String>,
    /// Maximum number of products to return
    pub max_results: Option<usize>,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            disabled: false,
            base_url: None,
            max_results: None,
        }
    }
}

impl PlatformConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Effective result cap
    pub fn max_results(&self) -> usize {
        self.max_results.unwrap_or(DEFAULT_MAX_RESULTS)
    }
}

/// Default platform configurations
fn default_platforms() -> Vec<PlatformConfig> {
    vec![
        PlatformConfig::named("amazon"),
        PlatformConfig::named("flipkart"),
        PlatformConfig::named("ebay"),
    ]
}
