//! Diff view configuration
//!
//! Configuration loaded from `.hunkview.toml`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// How diffs are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Single column, removed and added lines interleaved
    #[default]
    Unified,
    /// Old file on the left, new file on the right
    Split,
}

/// Word-level highlighting of replaced lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordDiffConfig {
    #[serde(default = "default_word_diff_enabled")]
    pub enabled: bool,

    /// Largest token table (old tokens x new tokens) computed per line pair
    #[serde(default = "default_word_diff_max_cells")]
    pub max_cells: usize,
}

impl Default for WordDiffConfig {
    fn default() -> Self {
        Self {
            enabled: default_word_diff_enabled(),
            max_cells: default_word_diff_max_cells(),
        }
    }
}

/// Diff view configuration loaded from `.hunkview.toml`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    #[serde(default)]
    pub view_mode: ViewMode,

    /// Lines revealed per context expansion
    #[serde(default = "default_expand_step")]
    pub expand_step: u32,

    /// Syntax highlighting theme (one of syntect's bundled themes)
    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default)]
    pub word_diff: WordDiffConfig,
}

fn default_expand_step() -> u32 {
    20
}

fn default_theme() -> String {
    "base16-ocean.dark".to_string()
}

fn default_word_diff_enabled() -> bool {
    true
}

fn default_word_diff_max_cells() -> usize {
    250_000
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::default(),
            expand_step: default_expand_step(),
            theme: default_theme(),
            word_diff: WordDiffConfig::default(),
        }
    }
}

impl ViewConfig {
    /// Load config from CWD first, then home and config directories, or use defaults
    pub fn load() -> Self {
        if let Some((path, content)) = crate::load_config_file() {
            match Self::from_toml_str(&content) {
                Ok(config) => {
                    log::info!("Loaded view config from {}", path.display());
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse {}: {:#}", path.display(), e);
                }
            }
        }

        log::debug!("Using default view config");
        Self::default()
    }

    /// Parse config from TOML text; missing fields use defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Invalid view config")?;
        Ok(config.normalized())
    }

    fn normalized(mut self) -> Self {
        if self.expand_step == 0 {
            log::warn!("expand_step must be positive, using {}", default_expand_step());
            self.expand_step = default_expand_step();
        }
        self
    }
}
