//! Filesystem tree entries as the domain sees them.

use std::path::{Path, PathBuf};

/// The kind of a discovered tree entry.
///
/// Directory emptiness is captured at discovery time: the conflict decision
/// table treats an empty destination directory differently from a populated
/// one, and [`resolve_move`](crate::domain::resolve_move) must stay pure —
/// it cannot go back to the filesystem to ask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory {
        /// `true` if the directory had no children when listed.
        empty: bool,
    },
}

impl EntryKind {
    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Directory { .. })
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::File)
    }
}

/// A filesystem node discovered by listing, identified by its path.
///
/// Entries are snapshots: they are produced by one listing pass and carry no
/// identity beyond it. A second merge pass re-discovers everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl TreeEntry {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
        }
    }

    pub fn directory(path: impl Into<PathBuf>, empty: bool) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Directory { empty },
        }
    }

    /// Final path component, used when projecting this entry into another root.
    pub fn file_name(&self) -> Option<&std::ffi::OsStr> {
        self.path.file_name()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
