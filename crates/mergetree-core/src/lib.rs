//! # mergetree-core
//!
//! Core library for merging two directory trees into one.
//!
//! A *lower* tree is kept and an *upper* tree is merged into it: both trees
//! are listed into sorted in-memory snapshots, then walked in lock-step by
//! name. Every entry ends up either kept, moved into the lower tree, moved
//! under a backup name, or deleted, following a fixed decision table.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Core error types for the mergetree library
pub mod error {
    use std::io;
    use std::path::PathBuf;

    /// Errors that abort a merge run
    ///
    /// Only tree construction and output failures are fatal. Failing file
    /// operations are reported by the executor and never surface here.
    #[derive(Debug, thiserror::Error)]
    pub enum MergeError {
        /// A directory could not be listed
        #[error("Failed to list directory: {}", path.display())]
        List {
            /// Directory being listed
            path: PathBuf,
            /// Underlying OS error
            #[source]
            source: io::Error,
        },

        /// An entry could not be stat'ed
        #[error("Failed to read metadata for: {}", path.display())]
        Stat {
            /// Entry being queried
            path: PathBuf,
            /// Underlying OS error
            #[source]
            source: io::Error,
        },

        /// A tree root is not a directory
        #[error("Not a directory: {}", path.display())]
        NotADirectory {
            /// Offending root path
            path: PathBuf,
        },

        /// A directory entry was built without a child level
        #[error("No child level for directory: {}", path.display())]
        MissingLevel {
            /// Directory relative to its tree root
            path: PathBuf,
        },

        /// Writing a report or trace line failed
        #[error("Failed to write output")]
        Output(#[from] io::Error),
    }

    /// Result type alias using [`MergeError`]
    pub type Result<T> = std::result::Result<T, MergeError>;
}

/// Directory tree snapshots
pub mod tree;

/// Pairwise entry comparison and content checks
pub mod comparison;

/// Configuration file parsing and management
pub mod config;

/// Merge engine, file operations and reporting
pub mod merge;

pub use error::{MergeError, Result};
