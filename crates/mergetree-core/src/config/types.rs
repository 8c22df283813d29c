//! Configuration types

use serde::{Deserialize, Serialize};

/// Settings read from a configuration file
///
/// Every key is optional; an unset key leaves the value of a
/// lower-precedence file (or the built-in default) in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Suffix for names moved aside on a collision
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_suffix: Option<String>,

    /// Print commands instead of running them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,

    /// Remove merged upper directories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove: Option<bool>,

    /// Compare bytes of same-time, same-size files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,

    /// Print the decision trace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,

    /// Print listing progress
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<bool>,

    /// Print the summary report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<bool>,
}

impl Config {
    /// Overlay `other` on top of `self`: keys set in `other` win
    pub fn override_with(&mut self, other: Self) {
        if other.backup_suffix.is_some() {
            self.backup_suffix = other.backup_suffix;
        }
        self.dry_run = other.dry_run.or(self.dry_run);
        self.remove = other.remove.or(self.remove);
        self.strict = other.strict.or(self.strict);
        self.verbose = other.verbose.or(self.verbose);
        self.progress = other.progress.or(self.progress);
        self.summary = other.summary.or(self.summary);
    }
}
