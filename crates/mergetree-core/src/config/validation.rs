//! Configuration validation

use std::path::is_separator;

use super::types::Config;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a merged configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(config: &Config) -> anyhow::Result<()> {
        if let Some(suffix) = &config.backup_suffix {
            Self::validate_suffix(suffix)?;
        }
        Ok(())
    }

    /// Check that a backup suffix names a sibling of the original entry
    ///
    /// # Errors
    ///
    /// Returns an error if the suffix is empty or contains a path separator.
    pub fn validate_suffix(suffix: &str) -> anyhow::Result<()> {
        if suffix.is_empty() {
            anyhow::bail!("Backup suffix cannot be empty");
        }
        if suffix.chars().any(is_separator) {
            anyhow::bail!("Backup suffix cannot contain a path separator: {suffix}");
        }
        Ok(())
    }
}
