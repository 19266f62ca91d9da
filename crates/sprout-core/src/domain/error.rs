// ============================================================================
// domain/error.rs - MERGE CONFLICT ERROR DOMAIN
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for retry logic)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Merge conflicts (409-level equivalent)
    // ========================================================================
    /// A directory and a file collided at the same path. No strategy value
    /// resolves this; only the operator can.
    #[error("cannot replace {existing_kind} with {incoming_kind} at {path}")]
    KindMismatch {
        path: PathBuf,
        existing_kind: &'static str,
        incoming_kind: &'static str,
    },

    /// A file already exists at the destination path and the run uses the
    /// `error` strategy.
    #[error("destination already contains a file at {path}")]
    DuplicateEntry { path: PathBuf },

    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Invalid template source: {0}")]
    InvalidTemplateSource(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::KindMismatch { path, .. } => vec![
                format!("A directory/file collision at: {}", path.display()),
                "No --conflict-strategy value can resolve this".into(),
                "Move or remove the destination entry, then re-run".into(),
            ],
            Self::DuplicateEntry { path } => vec![
                format!("Already present: {}", path.display()),
                "Use --conflict-strategy keep-existing to keep your file".into(),
                "Use --conflict-strategy overwrite to take the template's".into(),
            ],
            Self::InvalidProjectName { reason, .. } => vec![
                format!("Details: {reason}"),
                "Use alphanumeric characters, hyphens, and underscores".into(),
            ],
            Self::InvalidTemplateSource(msg) => vec![
                format!("Details: {msg}"),
                "Pass a git URL with --template, e.g. --template https://github.com/you/tmpl".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::KindMismatch { .. } | Self::DuplicateEntry { .. } => ErrorCategory::Conflict,
            Self::InvalidProjectName { .. } | Self::InvalidTemplateSource(_) => {
                ErrorCategory::Validation
            }
        }
    }

    /// The path this error points at, when it points at one.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::KindMismatch { path, .. } | Self::DuplicateEntry { path } => Some(path),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_entry_suggests_both_strategies() {
        let err = DomainError::DuplicateEntry {
            path: PathBuf::from("/p/README.md"),
        };
        let s = err.suggestions();
        assert!(s.iter().any(|m| m.contains("keep-existing")));
        assert!(s.iter().any(|m| m.contains("overwrite")));
    }

    #[test]
    fn kind_mismatch_is_a_conflict() {
        let err = DomainError::KindMismatch {
            path: PathBuf::from("/p/src"),
            existing_kind: "directory",
            incoming_kind: "file",
        };
        assert_eq!(err.category(), ErrorCategory::Conflict);
        assert_eq!(err.path().unwrap(), &PathBuf::from("/p/src"));
    }

    #[test]
    fn validation_errors_carry_no_path() {
        let err = DomainError::InvalidTemplateSource("empty".into());
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.path().is_none());
    }
}
