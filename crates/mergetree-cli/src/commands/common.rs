//! Option resolution for command execution

use mergetree_core::config::{Config, ConfigManager, ConfigValidator};
use mergetree_core::merge::{DEFAULT_BACKUP_SUFFIX, MergeOptions};
use tracing::debug;

use crate::cli::Cli;

/// Everything a run needs, after config files and flags are combined
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct RunOptions {
    /// Options handed to the merge engine
    pub merge: MergeOptions,
    /// Show listing progress
    pub progress: bool,
    /// Print the summary report
    pub summary: bool,
    /// Print both trees before merging
    pub dump: bool,
}

impl RunOptions {
    /// Load the configuration files and apply the command-line flags on top
    ///
    /// # Errors
    ///
    /// Returns an error if a config file is unreadable or invalid, or if the
    /// backup suffix given on the command line is invalid.
    pub fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let config = ConfigManager::load(cli.config.as_deref(), cli.no_config)?;
        let options = Self::from_parts(cli, &config)?;
        debug!(?options, "resolved options");
        Ok(options)
    }

    /// Combine a loaded configuration with the command-line flags
    ///
    /// Boolean flags can only switch a setting on; `--backup` replaces the
    /// configured suffix.
    fn from_parts(cli: &Cli, config: &Config) -> anyhow::Result<Self> {
        let backup_suffix = match &cli.backup {
            Some(suffix) => {
                ConfigValidator::validate_suffix(suffix)?;
                suffix.clone()
            }
            None => config
                .backup_suffix
                .clone()
                .unwrap_or_else(|| DEFAULT_BACKUP_SUFFIX.to_string()),
        };

        Ok(Self {
            merge: MergeOptions {
                dry_run: cli.dry_run || config.dry_run.unwrap_or(false),
                remove_upper: cli.remove || config.remove.unwrap_or(false),
                strict: cli.strict || config.strict.unwrap_or(false),
                verbose: cli.verbose || config.verbose.unwrap_or(false),
                backup_suffix,
            },
            progress: cli.progress || config.progress.unwrap_or(false),
            summary: cli.summary || config.summary.unwrap_or(false),
            dump: cli.dump,
        })
    }
}
