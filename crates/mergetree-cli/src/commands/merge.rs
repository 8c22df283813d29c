//! The merge command: list both trees, merge, report

use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use mergetree_core::merge::{Console, MergeEngine, MergeResult, SummaryReporter};
use mergetree_core::tree::{ProgressReporter, Tree};
use tracing::info;

use super::RunOptions;

/// Merge command
pub struct Merge;

impl Merge {
    /// Merge `upper` into `lower`
    ///
    /// # Errors
    ///
    /// Returns an error if either tree cannot be listed or output cannot be
    /// written. Failing single operations are reported but do not fail the
    /// command.
    pub fn execute(
        lower: &Path,
        upper: &Path,
        options: &RunOptions,
    ) -> anyhow::Result<MergeResult> {
        let mut progress = ProgressReporter::stderr(options.progress);
        let lower_tree = Tree::build(lower, &mut progress)
            .with_context(|| format!("Failed to list lower tree: {}", lower.display()))?;
        let upper_tree = Tree::build(upper, &mut progress)
            .with_context(|| format!("Failed to list upper tree: {}", upper.display()))?;

        let stdout = io::stdout();
        let stderr = io::stderr();
        let mut out = stdout.lock();
        let mut err = stderr.lock();

        if options.dump {
            Self::dump(&mut out, &lower_tree, &upper_tree).context("Failed to dump trees")?;
        }

        let result = {
            let mut console = Console::new(&mut out, &mut err);
            MergeEngine::new(options.merge.clone())
                .merge(&lower_tree, &upper_tree, &mut console)?
        };
        out.flush()?;

        if !result.is_success() {
            info!(failed = result.errors.len(), "some operations failed");
        }
        info!(operations = result.total_operations(), "merge complete");

        if options.summary {
            write!(err, "{}", SummaryReporter::generate_summary(&result))?;
        }

        Ok(result)
    }

    fn dump(out: &mut impl Write, lower: &Tree, upper: &Tree) -> io::Result<()> {
        writeln!(out, "Lower Tree:")?;
        lower.dump(out)?;
        writeln!(out, "Upper Tree:")?;
        upper.dump(out)
    }
}
