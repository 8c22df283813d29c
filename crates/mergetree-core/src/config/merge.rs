//! Configuration merging with precedence rules
//!
//! Files are applied from lowest to highest precedence. A key set in a
//! higher-precedence file replaces the value from a lower one; unset keys
//! fall through.

use std::fs;
use std::path::Path;

use anyhow::Context;

use super::discovery::ConfigFiles;
use super::types::Config;

/// Configuration merger
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge all discovered files
    ///
    /// Precedence order (highest to lowest):
    /// 1. Command-line config
    /// 2. `.mergetree.toml`
    /// 3. Global config
    ///
    /// # Errors
    ///
    /// Returns an error if a config file cannot be read or parsed.
    pub fn merge(files: &ConfigFiles) -> anyhow::Result<Config> {
        let mut merged = Config::default();

        for path in [&files.global, &files.project, &files.cli]
            .into_iter()
            .flatten()
        {
            merged.override_with(Self::load_file(path)?);
        }

        Ok(merged)
    }

    /// Read and parse a single config file
    fn load_file(path: &Path) -> anyhow::Result<Config> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}
