//! Common paths for skein data storage
//!
//! All skein data is stored under ~/.config/skein/ on all platforms:
//! - config.toml - User configuration
//! - cache/ - Downloaded avatars and inline images

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the skein data directory (~/.config/skein/)
///
/// This is consistent across all platforms for simplicity.
pub fn skein_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let skein_dir = home.join(".config").join("skein");
    fs::create_dir_all(&skein_dir).context("Failed to create skein directory")?;
    Ok(skein_dir)
}

/// Get the config file path (~/.config/skein/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(skein_dir()?.join("config.toml"))
}

/// Get the asset cache directory (~/.config/skein/cache/), creating it if
/// needed.
pub fn asset_cache_dir() -> Result<PathBuf> {
    let cache = skein_dir()?.join("cache");
    fs::create_dir_all(&cache).context("Failed to create asset cache directory")?;
    Ok(cache)
}
