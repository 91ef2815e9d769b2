//! Configuration directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/hunkview/`
//! - macOS: `~/Library/Application Support/hunkview/`
//! - Windows: `%APPDATA%\hunkview\`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "hunkview";

/// Get the application config directory (not created)
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join(APP_NAME))
}

/// Get path to the config file inside the config directory
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_paths() {
        if let Ok(path) = config_file_path() {
            assert!(path.ends_with("hunkview/config.toml"));
        }
    }
}
