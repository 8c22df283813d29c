//! Configuration file parsing and merging
//!
//! This module handles:
//! - Config file discovery (global, project, command line)
//! - TOML parsing with serde
//! - Override merging by precedence
//! - Validation of the merged result

mod discovery;
mod merge;
mod types;
mod validation;

pub use discovery::{ConfigDiscovery, ConfigFiles};
pub use merge::ConfigMerger;
pub use types::Config;
pub use validation::ConfigValidator;

use std::path::Path;

use tracing::debug;

/// Configuration manager that coordinates discovery, merging and validation
pub struct ConfigManager;

impl ConfigManager {
    /// Load and merge configuration from all sources
    ///
    /// With `no_config` set, no file is read and the defaults are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file cannot be read or parsed, or if the
    /// merged configuration is invalid.
    pub fn load(cli_config_path: Option<&Path>, no_config: bool) -> anyhow::Result<Config> {
        if no_config {
            debug!("configuration files disabled");
            return Ok(Config::default());
        }

        let files = ConfigDiscovery::discover(cli_config_path);
        debug!(?files, "discovered configuration files");

        let merged = ConfigMerger::merge(&files)?;
        ConfigValidator::validate(&merged)?;

        Ok(merged)
    }
}
