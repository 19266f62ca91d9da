//! Tree merger - recursive move with per-entry conflict resolution.
//!
//! Moves a source directory's contents into a destination directory,
//! consulting the conflict decision table before every move. The merger is
//! handed an explicit [`Filesystem`] capability scoped to one merge call;
//! there is no process-wide move interception.
//!
//! ## Failure model
//!
//! The merge is fail-fast: the first unresolvable conflict aborts the whole
//! merge with the offending path, and no sibling entries after it are
//! touched. Entries moved *before* the failure stay where they landed —
//! partial completion is documented behavior, not rolled back.

use std::path::Path;

use tracing::{debug, instrument, trace};

use crate::{
    application::ports::Filesystem,
    domain::{
        ConflictStrategy, DomainError, EntryKind, MoveDecision, TreeEntry,
        strategy::ConflictKind, resolve_move,
    },
    error::{SproutError, SproutResult},
};

/// Recursive tree merger. One instance per merge call.
pub struct TreeMerger<'a> {
    filesystem: &'a dyn Filesystem,
    strategy: ConflictStrategy,
}

impl<'a> TreeMerger<'a> {
    pub fn new(filesystem: &'a dyn Filesystem, strategy: ConflictStrategy) -> Self {
        Self {
            filesystem,
            strategy,
        }
    }

    /// Move everything under `source` into `destination`.
    ///
    /// Recurses depth-first: a child directory is fully drained before its
    /// siblings are considered, so a destination directory's emptiness is
    /// only ever evaluated once all content destined for it has been
    /// disposed of.
    #[instrument(skip(self), fields(strategy = %self.strategy))]
    pub fn merge(&self, source: &Path, destination: &Path) -> SproutResult<()> {
        for child in self.filesystem.list_dir(source)? {
            let name = child.file_name().ok_or_else(|| SproutError::Internal {
                message: format!("listed entry has no file name: {}", child.path.display()),
            })?;
            let target = destination.join(name);
            let existing = self.filesystem.probe(&target)?;

            match resolve_move(existing.as_ref(), &child, self.strategy) {
                MoveDecision::Proceed => self.move_entry(&child, existing.as_ref(), &target)?,
                MoveDecision::Skip => {
                    debug!(path = %target.display(), "keeping existing file, discarding incoming");
                    self.filesystem.remove_file(&child.path)?;
                }
                MoveDecision::Fail(kind) => {
                    return Err(conflict_error(kind, existing.as_ref(), &child, &target));
                }
            }
        }
        Ok(())
    }

    /// Execute one `Proceed` decision.
    fn move_entry(
        &self,
        child: &TreeEntry,
        existing: Option<&TreeEntry>,
        target: &Path,
    ) -> SproutResult<()> {
        match child.kind {
            EntryKind::Directory { .. } => {
                if existing.is_none() {
                    self.filesystem.create_dir_all(target)?;
                }
                self.merge(&child.path, target)
            }
            EntryKind::File => {
                // An empty directory cleared for replacement must go before
                // the file can land on its path.
                if let Some(TreeEntry {
                    kind: EntryKind::Directory { .. },
                    ..
                }) = existing
                {
                    self.filesystem.remove_dir_all(target)?;
                }
                trace!(from = %child.path.display(), to = %target.display(), "moving file");
                self.filesystem.move_file(&child.path, target)
            }
        }
    }
}

fn conflict_error(
    kind: ConflictKind,
    existing: Option<&TreeEntry>,
    incoming: &TreeEntry,
    target: &Path,
) -> SproutError {
    let error = match kind {
        ConflictKind::DuplicateEntry => DomainError::DuplicateEntry {
            path: target.to_path_buf(),
        },
        ConflictKind::KindMismatch => DomainError::KindMismatch {
            path: target.to_path_buf(),
            existing_kind: existing.map_or("nothing", |e| kind_name(e.kind)),
            incoming_kind: kind_name(incoming.kind),
        },
    };
    error.into()
}

fn kind_name(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::File => "file",
        EntryKind::Directory { .. } => "directory",
    }
}
