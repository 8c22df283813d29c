//! Merge engine
//!
//! Walks a lower and an upper [`Tree`](crate::tree::Tree) in lock-step and
//! turns every name into a [`Decision`]. Decisions that touch the filesystem
//! go through the [`FileOperationExecutor`], which is the only place where
//! anything is renamed or deleted.

mod actions;
mod executor;
mod orchestrator;
mod reporting;


use std::io::Write;

pub use actions::{Decision, FileAction};
pub use executor::{FileOperationExecutor, FileSystem, RealFileSystem};
pub use orchestrator::MergeEngine;
pub use reporting::SummaryReporter;

/// Suffix appended to names moved aside on a collision
pub const DEFAULT_BACKUP_SUFFIX: &str = "###";

/// Options steering a merge run
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct MergeOptions {
    /// Print commands instead of running them
    pub dry_run: bool,
    /// Remove upper directories once their content has been merged
    pub remove_upper: bool,
    /// Compare bytes before dropping a same-time, same-size upper file
    pub strict: bool,
    /// Print one trace line per decision on the error stream
    pub verbose: bool,
    /// Suffix for names moved aside on a collision
    pub backup_suffix: String,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            remove_upper: false,
            strict: false,
            verbose: false,
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
        }
    }
}

/// Merge result with statistics
///
/// Operation counters are bumped for every attempted operation, including
/// dry-run ones and failed ones; failures are also listed in `errors`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeResult {
    /// Entries moved into the lower tree (plain or backup moves)
    pub moved: usize,
    /// Files removed
    pub removed_files: usize,
    /// Directories removed
    pub removed_dirs: usize,
    /// Upper files that were hardlinks of their lower counterpart
    pub identical: usize,
    /// Lower files replaced by a newer upper file
    pub overridden: usize,
    /// Upper entries moved aside under a backup name
    pub backed_up: usize,
    /// Pairs involving a symlink or other special file
    pub special: usize,
    /// Names present only in the lower tree
    pub only_in_lower: usize,
    /// Names present only in the upper tree
    pub only_in_upper: usize,
    /// Upper files older than the lower file
    pub older: usize,
    /// Upper files newer than the lower file
    pub newer: usize,
    /// Pairs with equal time and size
    pub same_content: usize,
    /// Failed operations, as `command: error`
    pub errors: Vec<String>,
}

impl MergeResult {
    /// Total filesystem operations issued
    #[must_use]
    pub const fn total_operations(&self) -> usize {
        self.moved + self.removed_files + self.removed_dirs
    }

    /// Whether every operation succeeded
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Count one decision in its category
    pub fn record(&mut self, decision: Decision) {
        match decision {
            Decision::OnlyInLower => self.only_in_lower += 1,
            Decision::OnlyInUpper => self.only_in_upper += 1,
            Decision::LowerIsDirectory | Decision::UpperIsDirectory | Decision::Mismatch => {
                self.backed_up += 1;
            }
            Decision::Special => self.special += 1,
            Decision::Identical => self.identical += 1,
            Decision::Older => self.older += 1,
            Decision::Newer => {
                self.newer += 1;
                self.overridden += 1;
            }
            Decision::SameContent => self.same_content += 1,
        }
    }
}

/// Output sinks for a merge run
///
/// Dry-run commands go to `out`; trace lines and diagnostics go to `err`.
pub struct Console<'a> {
    out: &'a mut dyn Write,
    err: &'a mut dyn Write,
}

impl<'a> Console<'a> {
    /// Bundle an output and an error stream
    pub fn new(out: &'a mut dyn Write, err: &'a mut dyn Write) -> Self {
        Self { out, err }
    }

    pub(crate) fn out(&mut self) -> &mut dyn Write {
        &mut *self.out
    }

    pub(crate) fn err(&mut self) -> &mut dyn Write {
        &mut *self.err
    }
}
