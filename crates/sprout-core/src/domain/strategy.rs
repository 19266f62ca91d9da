//! Conflict strategy and the move decision table.
//!
//! # Design Rationale
//!
//! The conflict policy is a single explicit decision function consulted by
//! the merge algorithm *before* each move. An earlier design expressed this
//! as two callback hooks on the move primitive ("should I move this?" /
//! "should I continue after this error?"), which required both hooks to
//! agree about every case. One function, one table, independently testable.

use serde::{Deserialize, Serialize};

use crate::domain::entry::{EntryKind, TreeEntry};

/// Operator-chosen policy for pre-existing destination files.
///
/// Chosen once per run and applied to every conflicting entry of the merge.
/// There is no per-file override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictStrategy {
    /// Any duplicate file is a fatal conflict.
    #[default]
    Error,
    /// Keep the destination file; the incoming copy is discarded.
    KeepExisting,
    /// Replace the destination file with the incoming one.
    Overwrite,
}

impl ConflictStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::KeepExisting => "keep-existing",
            Self::Overwrite => "overwrite",
        }
    }
}

impl std::fmt::Display for ConflictStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ConflictStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(Self::Error),
            "keep-existing" => Ok(Self::KeepExisting),
            "overwrite" => Ok(Self::Overwrite),
            other => Err(format!(
                "unknown conflict strategy '{other}' (expected error, keep-existing, or overwrite)"
            )),
        }
    }
}

/// Why a move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// Directory vs file (or vice versa) at the same path.
    KindMismatch,
    /// File vs file under [`ConflictStrategy::Error`].
    DuplicateEntry,
}

/// Outcome of consulting the policy for one incoming entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDecision {
    /// Perform the move (replacing the destination entry where one exists).
    Proceed,
    /// Leave the destination untouched and discard the incoming entry.
    Skip,
    /// Abort the merge; the conflict is not resolvable under this strategy.
    Fail(ConflictKind),
}

/// Decide what to do with `incoming` given what already sits at its
/// destination path.
///
/// The full table:
///
/// | existing          | incoming  | decision                       |
/// |-------------------|-----------|--------------------------------|
/// | (none)            | anything  | Proceed                        |
/// | directory         | directory | Proceed (merge by recursion)   |
/// | empty directory   | file      | Proceed (silently replaced)    |
/// | directory         | file      | Fail (kind mismatch)           |
/// | file              | directory | Fail (kind mismatch)           |
/// | file              | file      | per strategy                   |
///
/// Kind mismatches are never resolvable by policy — no strategy value turns
/// a directory into a file.
pub fn resolve_move(
    existing: Option<&TreeEntry>,
    incoming: &TreeEntry,
    strategy: ConflictStrategy,
) -> MoveDecision {
    let Some(existing) = existing else {
        return MoveDecision::Proceed;
    };

    match (existing.kind, incoming.kind) {
        // Directories merge by recursing; never a conflict themselves.
        (EntryKind::Directory { .. }, EntryKind::Directory { .. }) => MoveDecision::Proceed,

        // An empty directory in the way of a file is silently replaced.
        (EntryKind::Directory { empty: true }, EntryKind::File) => MoveDecision::Proceed,
        (EntryKind::Directory { empty: false }, EntryKind::File) => {
            MoveDecision::Fail(ConflictKind::KindMismatch)
        }
        (EntryKind::File, EntryKind::Directory { .. }) => {
            MoveDecision::Fail(ConflictKind::KindMismatch)
        }

        (EntryKind::File, EntryKind::File) => match strategy {
            ConflictStrategy::KeepExisting => MoveDecision::Skip,
            ConflictStrategy::Overwrite => MoveDecision::Proceed,
            ConflictStrategy::Error => MoveDecision::Fail(ConflictKind::DuplicateEntry),
        },
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
