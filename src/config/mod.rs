//! Configuration module for the scraper
//!
//! Handles loading settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Candidate settings files, in lookup order
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/pricedrop/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("pricedrop-scraper/settings.yml"));
    }
    paths
}

/// Settings file to load: `PRICEDROP_SETTINGS_PATH`, then the default locations
pub fn locate() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("PRICEDROP_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }
    candidate_paths().into_iter().find(|p| p.exists())
}

/// Load settings from `path`, or defaults when there is none, then apply
/// environment overrides
pub fn load(path: Option<&Path>) -> Result<Settings> {
    let mut settings = match path {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    settings.merge_env();
    Ok(settings)
}
