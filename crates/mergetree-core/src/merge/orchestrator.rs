//! Merge orchestration - the lock-step walk over both trees

use std::cmp::Ordering;
use std::io::Write;

use tracing::{debug, info};

use super::actions::{Decision, FileAction};
use super::executor::{FileOperationExecutor, FileSystem, RealFileSystem};
use super::{Console, MergeOptions, MergeResult};
use crate::comparison::{ComparisonResult, ContentComparator, FileComparator};
use crate::error::Result;
use crate::tree::{Entry, Level, Tree};

/// Main merge engine
pub struct MergeEngine {
    options: MergeOptions,
}

impl MergeEngine {
    /// Create a new merge engine
    #[must_use]
    pub const fn new(options: MergeOptions) -> Self {
        Self { options }
    }

    /// Merge `upper` into `lower` on the real filesystem
    ///
    /// # Errors
    ///
    /// Returns an error only if writing to the console fails; failing file
    /// operations are recorded in the result instead.
    pub fn merge(
        &self,
        lower: &Tree,
        upper: &Tree,
        console: &mut Console<'_>,
    ) -> Result<MergeResult> {
        self.merge_with(lower, upper, RealFileSystem, console)
    }

    /// Merge `upper` into `lower`, mutating through `fs`
    ///
    /// Both trees are walked level by level. Names present on one side only
    /// are decided at once; a pair of same-named directories opens a new
    /// level pair that is finished before the walk resumes with the next
    /// sibling.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing to the console fails.
    pub fn merge_with<F: FileSystem>(
        &self,
        lower: &Tree,
        upper: &Tree,
        fs: F,
        console: &mut Console<'_>,
    ) -> Result<MergeResult> {
        info!(
            lower = %lower.base().display(),
            upper = %upper.base().display(),
            dry_run = self.options.dry_run,
            "merging trees"
        );

        let mut run = MergeRun {
            options: &self.options,
            lower,
            upper,
            executor: FileOperationExecutor::new(fs, self.options.dry_run),
            console,
            result: MergeResult::default(),
        };

        let mut stack = vec![Frame::new(lower.root(), upper.root(), None)];
        while let Some(frame) = stack.last_mut() {
            match (frame.lower.get(frame.ia), frame.upper.get(frame.ib)) {
                (Some(a), Some(b)) => match a.name().cmp(b.name()) {
                    Ordering::Less => {
                        frame.ia += 1;
                        run.decide(Decision::OnlyInLower, a)?;
                    }
                    Ordering::Greater => {
                        frame.ib += 1;
                        run.decide(Decision::OnlyInUpper, b)?;
                    }
                    Ordering::Equal => {
                        frame.ia += 1;
                        frame.ib += 1;
                        if let Some(child) = run.resolve_pair(a, b)? {
                            stack.push(child);
                        }
                    }
                },
                (Some(a), None) => {
                    frame.ia += 1;
                    run.decide(Decision::OnlyInLower, a)?;
                }
                (None, Some(b)) => {
                    frame.ib += 1;
                    run.decide(Decision::OnlyInUpper, b)?;
                }
                (None, None) => {
                    let finished = stack.pop();
                    if let Some(dir) = finished.and_then(|frame| frame.upper_dir) {
                        run.finish_directory(dir)?;
                    }
                }
            }
        }

        debug!(
            operations = run.result.total_operations(),
            failures = run.result.errors.len(),
            "merge finished"
        );
        Ok(run.result)
    }
}

/// Cursor pair over one lower level and the same-named upper level
struct Frame<'t> {
    lower: Level<'t>,
    upper: Level<'t>,
    ia: usize,
    ib: usize,
    /// Upper directory whose children this frame walks
    upper_dir: Option<&'t Entry>,
}

impl<'t> Frame<'t> {
    const fn new(lower: Level<'t>, upper: Level<'t>, upper_dir: Option<&'t Entry>) -> Self {
        Self {
            lower,
            upper,
            ia: 0,
            ib: 0,
            upper_dir,
        }
    }
}

/// State of one merge run
struct MergeRun<'t, 'c, 'w, F> {
    options: &'t MergeOptions,
    lower: &'t Tree,
    upper: &'t Tree,
    executor: FileOperationExecutor<F>,
    console: &'c mut Console<'w>,
    result: MergeResult,
}

impl<'t, F: FileSystem> MergeRun<'t, '_, '_, F> {
    /// Apply the pairwise policy to two same-named entries
    ///
    /// Returns the frame to descend into when both are directories.
    fn resolve_pair(&mut self, a: &'t Entry, b: &'t Entry) -> Result<Option<Frame<'t>>> {
        let decision = match FileComparator::compare(a, b) {
            ComparisonResult::Directories { lower, upper } => {
                let upper_dir = self.options.remove_upper.then_some(b);
                return Ok(Some(Frame::new(
                    self.lower.level(lower),
                    self.upper.level(upper),
                    upper_dir,
                )));
            }
            ComparisonResult::LowerIsDirectory => Decision::LowerIsDirectory,
            ComparisonResult::UpperIsDirectory => Decision::UpperIsDirectory,
            ComparisonResult::Special => Decision::Special,
            ComparisonResult::Identical => Decision::Identical,
            ComparisonResult::UpperOlder => Decision::Older,
            ComparisonResult::UpperNewer => Decision::Newer,
            ComparisonResult::SameContent if self.options.strict => self.verify_content(a, b)?,
            ComparisonResult::SameContent => Decision::SameContent,
            ComparisonResult::Mismatch => Decision::Mismatch,
        };

        self.decide(decision, a)?;
        Ok(None)
    }

    /// Byte comparison for strict mode; unreadable files count as different
    fn verify_content(&mut self, a: &Entry, b: &Entry) -> Result<Decision> {
        let lower_path = self.lower.path(a);
        let upper_path = self.upper.path(b);

        match ContentComparator::same_content(&lower_path, &upper_path) {
            Ok(true) => Ok(Decision::SameContent),
            Ok(false) => Ok(Decision::Mismatch),
            Err(e) => {
                writeln!(self.console.err(), "Error in strict compare: {e:#}")?;
                self.result.errors.push(format!("strict compare: {e:#}"));
                Ok(Decision::Mismatch)
            }
        }
    }

    /// Record, trace and carry out a decision
    fn decide(&mut self, decision: Decision, entry: &Entry) -> Result<()> {
        self.result.record(decision);
        if self.options.verbose {
            writeln!(
                self.console.err(),
                "{} {}",
                decision.tag(),
                entry.subpath().display()
            )?;
        }

        let actions = decision.plan(
            entry,
            self.lower.base(),
            self.upper.base(),
            &self.options.backup_suffix,
        );
        for action in &actions {
            self.executor
                .execute(action, self.console, &mut self.result)?;
        }
        Ok(())
    }

    /// Remove an upper directory whose children have all been merged
    fn finish_directory(&mut self, dir: &Entry) -> Result<()> {
        let action = FileAction::RemoveDir {
            path: self.upper.path(dir),
        };
        self.executor
            .execute(&action, self.console, &mut self.result)
    }
}
