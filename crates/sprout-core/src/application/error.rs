//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The clone collaborator failed; nothing was materialized.
    #[error("Template acquisition failed for '{source_name}': {reason}")]
    AcquisitionFailed { source_name: String, reason: String },

    /// The manifest renderer failed.
    #[error("Template rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// A version-control operation (init / commit) failed after the tree
    /// was materialized.
    #[error("Version control {operation} failed at {path}: {reason}")]
    VersionControlFailed {
        operation: &'static str,
        path: PathBuf,
        reason: String,
    },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::AcquisitionFailed { source_name, .. } => vec![
                format!("Could not fetch template: {source_name}"),
                "Check the URL and your network connection".into(),
                "Verify the branch exists with: git ls-remote <url>".into(),
            ],
            Self::RenderingFailed { reason } => vec![
                format!("Rendering failed: {reason}"),
                "Check the template's template.toml for malformed entries".into(),
            ],
            Self::VersionControlFailed { operation, .. } => vec![
                format!("git {operation} did not complete"),
                "The project tree itself was created; inspect it before re-running".into(),
                "Re-run with --no-git to skip repository initialization".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AcquisitionFailed { .. } => ErrorCategory::NotFound,
            Self::RenderingFailed { .. } => ErrorCategory::Internal,
            Self::VersionControlFailed { .. } => ErrorCategory::Internal,
            Self::FilesystemError { .. } => ErrorCategory::Internal,
        }
    }
}
