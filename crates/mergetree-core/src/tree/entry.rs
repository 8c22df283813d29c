//! Single filesystem entry under a tree root

use std::ffi::{OsStr, OsString};
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::LevelId;
use crate::error::{MergeError, Result};

/// Filesystem object identity: (device, inode)
///
/// Two entries with equal identity are hardlinks to the same file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Identity {
    dev: u64,
    ino: u64,
}

impl Identity {
    #[cfg(unix)]
    fn from_metadata(metadata: &Metadata) -> Option<Self> {
        use std::os::unix::fs::MetadataExt;

        Some(Self {
            dev: metadata.dev(),
            ino: metadata.ino(),
        })
    }

    #[cfg(not(unix))]
    fn from_metadata(_metadata: &Metadata) -> Option<Self> {
        None
    }
}

/// Kind of an entry, taken from a status query that does not follow symlinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Directory, with the level holding its children
    Directory {
        /// Child level inside the owning tree
        children: LevelId,
    },
    /// Regular file
    File {
        /// Last modification time
        modified: SystemTime,
        /// Size in bytes
        size: u64,
    },
    /// Symlink, device, socket, fifo...
    Other,
}

/// One node of a [`Tree`](super::Tree)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    relative_path: PathBuf,
    kind: EntryKind,
    identity: Option<Identity>,
}

impl Entry {
    /// Stat `relative_path` under `base` without following symlinks
    ///
    /// Directories get `children` as their child level; it must be given
    /// for directories and is ignored otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::Stat`] if the status query fails, and
    /// [`MergeError::MissingLevel`] for a directory without `children`.
    #[cfg(test)]
    pub(crate) fn stat(
        base: &Path,
        relative_path: PathBuf,
        children: Option<LevelId>,
    ) -> Result<Self> {
        let path = base.join(&relative_path);
        let metadata =
            std::fs::symlink_metadata(&path).map_err(|source| MergeError::Stat { path, source })?;
        Self::from_metadata(relative_path, &metadata, children)
    }

    pub(crate) fn from_metadata(
        relative_path: PathBuf,
        metadata: &Metadata,
        children: Option<LevelId>,
    ) -> Result<Self> {
        let file_type = metadata.file_type();
        let kind = if file_type.is_dir() {
            let children = children.ok_or_else(|| MergeError::MissingLevel {
                path: relative_path.clone(),
            })?;
            EntryKind::Directory { children }
        } else if file_type.is_file() {
            let modified = metadata.modified().map_err(|source| MergeError::Stat {
                path: relative_path.clone(),
                source,
            })?;
            EntryKind::File {
                modified,
                size: metadata.len(),
            }
        } else {
            EntryKind::Other
        };

        Ok(Self {
            relative_path,
            kind,
            identity: Identity::from_metadata(metadata),
        })
    }

    /// Final path component
    #[must_use]
    pub fn name(&self) -> &OsStr {
        self.relative_path
            .file_name()
            .unwrap_or(self.relative_path.as_os_str())
    }

    /// Path relative to the tree root
    #[must_use]
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    /// Relative path with a leading separator, as shown in trace lines
    #[must_use]
    pub fn subpath(&self) -> PathBuf {
        Path::new(std::path::MAIN_SEPARATOR_STR).join(&self.relative_path)
    }

    /// Where this entry lives (or would live) under `base`
    #[must_use]
    pub fn path_under(&self, base: &Path) -> PathBuf {
        base.join(&self.relative_path)
    }

    /// Same as [`path_under`](Self::path_under) with `suffix` appended to the
    /// final component
    #[must_use]
    pub fn path_with_suffix(&self, base: &Path, suffix: &str) -> PathBuf {
        let mut path = OsString::from(self.path_under(base));
        path.push(suffix);
        PathBuf::from(path)
    }

    /// Entry kind
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Whether this is a directory
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        matches!(self.kind, EntryKind::Directory { .. })
    }

    /// Whether this is a regular file
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self.kind, EntryKind::File { .. })
    }

    /// Child level for directories
    #[must_use]
    pub const fn children(&self) -> Option<LevelId> {
        match self.kind {
            EntryKind::Directory { children } => Some(children),
            _ => None,
        }
    }

    /// Whether both entries are the same filesystem object
    ///
    /// Never true when either identity is unknown.
    #[must_use]
    pub fn same_identity(&self, other: &Self) -> bool {
        matches!((self.identity, other.identity), (Some(a), Some(b)) if a == b)
    }
}
