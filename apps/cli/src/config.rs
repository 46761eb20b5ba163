//! CLI configuration loading and merging.

use anyhow::{Context, Result};
use sagenb_core::NotebookConfig;
use std::path::Path;

/// Load and merge CLI configuration.
///
/// Configuration precedence:
/// 1. CLI arguments (handled by clap, merged by each command)
/// 2. Explicit `--config` file
/// 3. Local config file (./.sagenbrc)
/// 4. Global config file (~/.sagenb/config.toml)
/// 5. Defaults
pub fn load_config(explicit: Option<&Path>) -> Result<NotebookConfig> {
    let mut paths = vec![NotebookConfig::default_global_path(), NotebookConfig::default_local_path()];
    if let Some(path) = explicit {
        if !path.exists() {
            anyhow::bail!("Configuration file not found: {}", path.display());
        }
        paths.push(path.to_path_buf());
    }
    NotebookConfig::load_layered(&paths).context("Failed to load configuration")
}
