//! Pairwise comparison of same-named entries
//!
//! This module classifies a (lower, upper) pair by kind, identity,
//! modification time and size, without touching the filesystem. Byte-level
//! comparison for strict mode lives in [`ContentComparator`].

mod content;

use std::cmp::Ordering;

pub use content::{CHUNK_SIZE, ContentComparator};

use crate::tree::{Entry, EntryKind, LevelId};

/// Outcome of comparing a lower entry with the upper entry of the same name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonResult {
    /// Both are directories: merge their children
    Directories {
        /// Child level in the lower tree
        lower: LevelId,
        /// Child level in the upper tree
        upper: LevelId,
    },
    /// Lower is a directory, upper is not
    LowerIsDirectory,
    /// Upper is a directory, lower is not
    UpperIsDirectory,
    /// At least one side is neither a directory nor a regular file
    Special,
    /// Both names are hardlinks to the same file
    Identical,
    /// Lower file is newer than upper
    UpperOlder,
    /// Upper file is newer than lower
    UpperNewer,
    /// Same modification time and size, presumably same content
    SameContent,
    /// Same modification time, different size
    Mismatch,
}

/// Classifies entry pairs
pub struct FileComparator;

impl FileComparator {
    /// Compare a lower entry with the upper entry of the same name
    #[must_use]
    pub fn compare(lower: &Entry, upper: &Entry) -> ComparisonResult {
        match (lower.kind(), upper.kind()) {
            (
                EntryKind::Directory {
                    children: lower_children,
                },
                EntryKind::Directory {
                    children: upper_children,
                },
            ) => ComparisonResult::Directories {
                lower: lower_children,
                upper: upper_children,
            },
            (EntryKind::Directory { .. }, _) => ComparisonResult::LowerIsDirectory,
            (_, EntryKind::Directory { .. }) => ComparisonResult::UpperIsDirectory,
            (
                EntryKind::File {
                    modified: lower_time,
                    size: lower_size,
                },
                EntryKind::File {
                    modified: upper_time,
                    size: upper_size,
                },
            ) => {
                if lower.same_identity(upper) {
                    return ComparisonResult::Identical;
                }
                match lower_time.cmp(&upper_time) {
                    Ordering::Greater => ComparisonResult::UpperOlder,
                    Ordering::Less => ComparisonResult::UpperNewer,
                    Ordering::Equal if lower_size == upper_size => ComparisonResult::SameContent,
                    Ordering::Equal => ComparisonResult::Mismatch,
                }
            }
            (EntryKind::Other, _) | (_, EntryKind::Other) => ComparisonResult::Special,
        }
    }
}
