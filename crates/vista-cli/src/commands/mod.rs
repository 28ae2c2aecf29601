//! CLI command implementations

pub mod browse;
pub mod config;
pub mod ls;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use vista_overlay::OverlayConfig;

/// Resolve the overlay config: an explicit file, or the layered lookup
pub fn load_config(path: Option<&str>, start_dir: Option<&str>) -> Result<OverlayConfig> {
    let mut config = match path {
        Some(p) => OverlayConfig::load_from_file(Path::new(p))
            .with_context(|| format!("Failed to load config from {}", p))?,
        None => OverlayConfig::load().context("Failed to load config")?,
    };

    if let Some(dir) = start_dir {
        config.browser.start_dir = Some(PathBuf::from(dir));
    }

    Ok(config)
}
