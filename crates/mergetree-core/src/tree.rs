//! In-memory snapshots of directory trees
//!
//! A [`Tree`] is an arena: every entry of the hierarchy lives in one flat
//! table, and each directory level is a list of indices into that table,
//! sorted by name. Directories point at their child level through
//! [`EntryKind::Directory`]. The whole hierarchy is listed eagerly, once,
//! with a single status query per entry.

mod entry;
mod progress;

use std::fs;
use std::io::{self, Write};
use std::ops::Index;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

pub use entry::{Entry, EntryKind};
pub use progress::ProgressReporter;

use crate::error::{MergeError, Result};

/// Index of a directory level inside a [`Tree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelId(pub(crate) usize);

/// Snapshot of a directory tree
#[derive(Debug, Clone)]
pub struct Tree {
    base: PathBuf,
    entries: Vec<Entry>,
    levels: Vec<Vec<usize>>,
}

/// Sorted view of one directory level
#[derive(Debug, Clone, Copy)]
pub struct Level<'a> {
    entries: &'a [Entry],
    ids: &'a [usize],
}

impl<'a> Level<'a> {
    /// Number of entries in this level
    #[must_use]
    pub const fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether this level has no entries
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Entry at `index`, in name order
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&'a Entry> {
        self.ids.get(index).map(|&id| &self.entries[id])
    }

    /// Entries in name order
    pub fn iter(&self) -> impl Iterator<Item = &'a Entry> + 'a {
        let entries = self.entries;
        self.ids.iter().map(move |&id| &entries[id])
    }
}

impl Index<usize> for Level<'_> {
    type Output = Entry;

    fn index(&self, index: usize) -> &Entry {
        &self.entries[self.ids[index]]
    }
}

impl Tree {
    /// Root level id
    pub const ROOT: LevelId = LevelId(0);

    /// List `base` recursively into a snapshot
    ///
    /// Symlinks below the root are recorded, never followed. Every listed
    /// entry is counted on `progress`.
    ///
    /// # Errors
    ///
    /// Fails if `base` is not a directory, or if any directory cannot be
    /// listed or any entry cannot be stat'ed.
    pub fn build<W: Write>(
        base: impl Into<PathBuf>,
        progress: &mut ProgressReporter<W>,
    ) -> Result<Self> {
        let base = base.into();
        let metadata = fs::metadata(&base).map_err(|source| MergeError::Stat {
            path: base.clone(),
            source,
        })?;
        if !metadata.is_dir() {
            return Err(MergeError::NotADirectory { path: base });
        }

        progress.start(format!("Listing files:{}:", base.display()))?;
        debug!(base = %base.display(), "listing tree");

        let mut tree = Self {
            base,
            entries: Vec::new(),
            levels: vec![Vec::new()],
        };
        // Levels still open for insertion, indexed by depth - 1
        let mut open: Vec<(LevelId, PathBuf)> = vec![(Self::ROOT, PathBuf::new())];

        let walker = WalkDir::new(&tree.base)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        for item in walker {
            let item = item.map_err(|err| {
                let path = err.path().unwrap_or(&tree.base).to_path_buf();
                MergeError::List {
                    path,
                    source: io::Error::from(err),
                }
            })?;

            open.truncate(item.depth());
            let (parent, relative_path) = match open.last() {
                Some((level, dir)) => (*level, dir.join(item.file_name())),
                None => (Self::ROOT, PathBuf::from(item.file_name())),
            };

            let metadata = item.metadata().map_err(|err| MergeError::Stat {
                path: item.path().to_path_buf(),
                source: io::Error::from(err),
            })?;
            let children = metadata.is_dir().then(|| tree.new_level());

            let entry = Entry::from_metadata(relative_path.clone(), &metadata, children)?;
            tree.levels[parent.0].push(tree.entries.len());
            tree.entries.push(entry);

            if let Some(level) = children {
                open.push((level, relative_path));
            }
            progress.increment()?;
        }

        progress.finish()?;
        debug!(
            base = %tree.base.display(),
            entries = tree.entries.len(),
            directories = tree.levels.len() - 1,
            "tree listed"
        );

        Ok(tree)
    }

    fn new_level(&mut self) -> LevelId {
        self.levels.push(Vec::new());
        LevelId(self.levels.len() - 1)
    }

    /// Root path of the tree
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Sorted entries of one directory level
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    #[must_use]
    pub fn level(&self, id: LevelId) -> Level<'_> {
        Level {
            entries: &self.entries,
            ids: &self.levels[id.0],
        }
    }

    /// Top-level entries
    #[must_use]
    pub fn root(&self) -> Level<'_> {
        self.level(Self::ROOT)
    }

    /// Children of a directory entry, `None` for non-directories
    #[must_use]
    pub fn children(&self, entry: &Entry) -> Option<Level<'_>> {
        entry.children().map(|id| self.level(id))
    }

    /// Absolute path of an entry of this tree
    #[must_use]
    pub fn path(&self, entry: &Entry) -> PathBuf {
        entry.path_under(&self.base)
    }

    /// Total number of entries at every depth
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the tree root is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write an indented listing, directories suffixed with a separator
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn dump<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.dump_level(Self::ROOT, 0, writer)
    }

    fn dump_level<W: Write>(&self, id: LevelId, indent: usize, writer: &mut W) -> io::Result<()> {
        for entry in self.level(id).iter() {
            write!(writer, "{:indent$}{}", "", entry.name().to_string_lossy())?;
            match entry.children() {
                Some(children) => {
                    writeln!(writer, "{MAIN_SEPARATOR}")?;
                    self.dump_level(children, indent + 1, writer)?;
                }
                None => writeln!(writer)?,
            }
        }
        Ok(())
    }
}
