//! Configuration for hunkview
//!
//! This crate provides:
//! - Config directory paths
//! - Configuration file discovery (TOML)
//! - Diff view configuration (ViewConfig)

pub mod config_file;
pub mod paths;
pub mod view_config;

pub use config_file::load_config_file;
pub use view_config::{ViewConfig, ViewMode, WordDiffConfig};
