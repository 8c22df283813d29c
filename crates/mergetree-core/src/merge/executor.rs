//! File operations executor
//!
//! Failures of a single operation are reported and recorded, never
//! propagated: the merge goes on with the next entry.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tracing::debug;

use super::actions::FileAction;
use super::{Console, MergeResult};
use crate::error::Result;

/// Mutating filesystem calls used by the executor
pub trait FileSystem {
    /// Rename `from` to `to`
    ///
    /// # Errors
    ///
    /// Returns the OS error if the rename fails.
    fn rename(&mut self, from: &Path, to: &Path) -> io::Result<()>;

    /// Delete a non-directory entry
    ///
    /// # Errors
    ///
    /// Returns the OS error if the removal fails.
    fn remove_file(&mut self, path: &Path) -> io::Result<()>;

    /// Delete an empty directory
    ///
    /// # Errors
    ///
    /// Returns the OS error if the removal fails.
    fn remove_dir(&mut self, path: &Path) -> io::Result<()>;
}

impl<T: FileSystem + ?Sized> FileSystem for &mut T {
    fn rename(&mut self, from: &Path, to: &Path) -> io::Result<()> {
        (**self).rename(from, to)
    }

    fn remove_file(&mut self, path: &Path) -> io::Result<()> {
        (**self).remove_file(path)
    }

    fn remove_dir(&mut self, path: &Path) -> io::Result<()> {
        (**self).remove_dir(path)
    }
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn rename(&mut self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn remove_file(&mut self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn remove_dir(&mut self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path)
    }
}

/// Executes file actions, or prints them in dry-run mode
pub struct FileOperationExecutor<F = RealFileSystem> {
    fs: F,
    dry_run: bool,
}

impl<F: FileSystem> FileOperationExecutor<F> {
    /// Create a new executor
    #[must_use]
    pub const fn new(fs: F, dry_run: bool) -> Self {
        Self { fs, dry_run }
    }

    /// Execute one action and count it on `result`
    ///
    /// The counter is bumped whether the action ran, was only printed, or
    /// failed. A failure is printed on the error stream and appended to
    /// `result.errors`.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing to the console fails.
    pub fn execute(
        &mut self,
        action: &FileAction,
        console: &mut Console<'_>,
        result: &mut MergeResult,
    ) -> Result<()> {
        if self.dry_run {
            writeln!(console.out(), "{action}")?;
        } else if let Err(e) = self.apply(action) {
            writeln!(console.err(), "Error in {action}: {e}")?;
            result.errors.push(format!("{action}: {e}"));
        } else {
            debug!(%action, "applied");
        }

        match action {
            FileAction::Move { .. } => result.moved += 1,
            FileAction::RemoveFile { .. } => result.removed_files += 1,
            FileAction::RemoveDir { .. } => result.removed_dirs += 1,
        }
        Ok(())
    }

    fn apply(&mut self, action: &FileAction) -> io::Result<()> {
        match action {
            FileAction::Move { from, to } => self.fs.rename(from, to),
            FileAction::RemoveFile { path } => self.fs.remove_file(path),
            FileAction::RemoveDir { path } => self.fs.remove_dir(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Filesystem double that refuses every call
    struct Refusing {
        calls: usize,
    }

    impl FileSystem for Refusing {
        fn rename(&mut self, _from: &Path, _to: &Path) -> io::Result<()> {
            self.calls += 1;
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }

        fn remove_file(&mut self, _path: &Path) -> io::Result<()> {
            self.calls += 1;
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }

        fn remove_dir(&mut self, _path: &Path) -> io::Result<()> {
            self.calls += 1;
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }
    }

    fn run<F: FileSystem>(
        executor: &mut FileOperationExecutor<F>,
        actions: &[FileAction],
    ) -> (MergeResult, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut result = MergeResult::default();
        {
            let mut console = Console::new(&mut out, &mut err);
            for action in actions {
                executor.execute(action, &mut console, &mut result).unwrap();
            }
        }
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_real_operations() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join("a"), "a").unwrap();
        fs::write(root.join("b"), "b").unwrap();
        fs::create_dir(root.join("d")).unwrap();

        let mut executor = FileOperationExecutor::new(RealFileSystem, false);
        let (result, out, err) = run(
            &mut executor,
            &[
                FileAction::Move {
                    from: root.join("a"),
                    to: root.join("moved"),
                },
                FileAction::RemoveFile {
                    path: root.join("b"),
                },
                FileAction::RemoveDir {
                    path: root.join("d"),
                },
            ],
        );

        assert!(root.join("moved").exists());
        assert!(!root.join("a").exists());
        assert!(!root.join("b").exists());
        assert!(!root.join("d").exists());
        assert_eq!((result.moved, result.removed_files, result.removed_dirs), (1, 1, 1));
        assert!(result.is_success());
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn test_dry_run_prints_and_counts() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("keep");
        fs::write(&file, "x").unwrap();

        let mut executor = FileOperationExecutor::new(RealFileSystem, true);
        let (result, out, _) = run(
            &mut executor,
            &[
                FileAction::RemoveFile { path: file.clone() },
                FileAction::Move {
                    from: file.clone(),
                    to: PathBuf::from("/elsewhere"),
                },
            ],
        );

        assert!(file.exists());
        assert_eq!(result.removed_files, 1);
        assert_eq!(result.moved, 1);
        assert_eq!(out, format!("rm {0}\nmv {0} /elsewhere\n", file.display()));
    }

    #[test]
    fn test_failures_are_reported_and_counted() {
        let mut refusing = Refusing { calls: 0 };
        let mut executor = FileOperationExecutor::new(&mut refusing, false);
        let (result, out, err) = run(
            &mut executor,
            &[
                FileAction::RemoveDir {
                    path: PathBuf::from("/x"),
                },
                FileAction::RemoveFile {
                    path: PathBuf::from("/y"),
                },
            ],
        );

        assert_eq!(refusing.calls, 2);
        assert_eq!(result.removed_dirs, 1);
        assert_eq!(result.removed_files, 1);
        assert_eq!(result.errors.len(), 2);
        assert!(!result.is_success());
        assert!(out.is_empty());
        assert!(err.contains("Error in rmdir /x: denied"));
        assert!(err.contains("Error in rm /y: denied"));
    }

    #[test]
    fn test_non_empty_directory_removal_is_not_fatal() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("full");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("inside"), "x").unwrap();

        let mut executor = FileOperationExecutor::new(RealFileSystem, false);
        let (result, _, err) = run(&mut executor, &[FileAction::RemoveDir { path: dir.clone() }]);

        assert!(dir.exists());
        assert_eq!(result.removed_dirs, 1);
        assert_eq!(result.errors.len(), 1);
        assert!(err.starts_with(&format!("Error in rmdir {}:", dir.display())));
    }
}
