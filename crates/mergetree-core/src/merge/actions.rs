//! Merge decisions and the file actions they expand to

use std::fmt;
use std::path::{Path, PathBuf};

use crate::tree::Entry;

/// What happens to one name of the merged trees
///
/// Each decision has a stable three-character tag used in verbose traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Name exists only in the lower tree; kept as is
    OnlyInLower,
    /// Name exists only in the upper tree; moved into the lower tree
    OnlyInUpper,
    /// Lower is a directory, upper is not; upper moved aside
    LowerIsDirectory,
    /// Upper is a directory, lower is not; upper moved aside
    UpperIsDirectory,
    /// Special file on either side; upper removed
    Special,
    /// Same inode on both sides; upper removed
    Identical,
    /// Upper file is older; upper removed
    Older,
    /// Upper file is newer; lower removed, upper moved in
    Newer,
    /// Same time and size; upper removed
    SameContent,
    /// Same time, different content; upper moved aside
    Mismatch,
}

impl Decision {
    /// Every decision, in reporting order
    pub const ALL: [Self; 10] = [
        Self::OnlyInLower,
        Self::OnlyInUpper,
        Self::LowerIsDirectory,
        Self::UpperIsDirectory,
        Self::Special,
        Self::Identical,
        Self::Older,
        Self::Newer,
        Self::SameContent,
        Self::Mismatch,
    ];

    /// Trace tag
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::OnlyInLower => ">>>",
            Self::OnlyInUpper => "<<<",
            Self::LowerIsDirectory => "/**",
            Self::UpperIsDirectory => "**/",
            Self::Special => "---",
            Self::Identical => "===",
            Self::Older => ">!!",
            Self::Newer => "!!<",
            Self::SameContent => "=*=",
            Self::Mismatch => "!!!",
        }
    }

    /// Decision for a trace tag
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|decision| decision.tag() == tag)
    }

    /// File actions carrying out this decision for `entry`
    ///
    /// `entry` may come from either tree: both sides of a pair share the
    /// same relative path.
    #[must_use]
    pub fn plan(
        self,
        entry: &Entry,
        lower_base: &Path,
        upper_base: &Path,
        backup_suffix: &str,
    ) -> Vec<FileAction> {
        let upper = entry.path_under(upper_base);
        match self {
            Self::OnlyInLower => Vec::new(),
            Self::OnlyInUpper => vec![FileAction::Move {
                from: upper,
                to: entry.path_under(lower_base),
            }],
            Self::LowerIsDirectory | Self::UpperIsDirectory | Self::Mismatch => {
                vec![FileAction::Move {
                    from: upper,
                    to: entry.path_with_suffix(lower_base, backup_suffix),
                }]
            }
            Self::Special | Self::Identical | Self::Older | Self::SameContent => {
                vec![FileAction::RemoveFile { path: upper }]
            }
            Self::Newer => {
                let lower = entry.path_under(lower_base);
                vec![
                    FileAction::RemoveFile {
                        path: lower.clone(),
                    },
                    FileAction::Move {
                        from: upper,
                        to: lower,
                    },
                ]
            }
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A single filesystem mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileAction {
    /// Rename `from` to `to`
    Move {
        /// Current path
        from: PathBuf,
        /// New path
        to: PathBuf,
    },
    /// Delete a file (or a symlink, or any non-directory)
    RemoveFile {
        /// Path to delete
        path: PathBuf,
    },
    /// Delete an empty directory
    RemoveDir {
        /// Path to delete
        path: PathBuf,
    },
}

/// Shell equivalent, as printed in dry-run mode
impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move { from, to } => write!(f, "mv {} {}", from.display(), to.display()),
            Self::RemoveFile { path } => write!(f, "rm {}", path.display()),
            Self::RemoveDir { path } => write!(f, "rmdir {}", path.display()),
        }
    }
}
