//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `sprout-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::TreeEntry;
use crate::error::SproutResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `sprout_adapters::filesystem::LocalFilesystem` (production)
///
/// ## Design Notes
///
/// - Discovery is listing-based: [`Filesystem::list_dir`] and
///   [`Filesystem::probe`] return [`TreeEntry`] snapshots (kind plus, for
///   directories, emptiness) so the pure conflict policy never has to go
///   back to disk.
/// - [`Filesystem::move_file`] has replace semantics: an existing file at
///   the destination is overwritten. The merge algorithm decides *whether*
///   that happens; the port only executes it.
pub trait Filesystem: Send + Sync {
    /// List the immediate children of a directory.
    fn list_dir(&self, path: &Path) -> SproutResult<Vec<TreeEntry>>;

    /// Look up a single path: `None` if nothing exists there.
    fn probe(&self, path: &Path) -> SproutResult<Option<TreeEntry>>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> SproutResult<()>;

    /// Move a file, replacing any file already at the destination.
    fn move_file(&self, from: &Path, to: &Path) -> SproutResult<()>;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> SproutResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> SproutResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Read a UTF-8 file to a string.
    fn read_file(&self, path: &Path) -> SproutResult<String>;

    /// Write content to a file.
    fn write_file(&self, path: &Path, content: &str) -> SproutResult<()>;
}

/// Port for the version-control collaborator.
///
/// Implemented by:
/// - `sprout_adapters::vcs::GitVersionControl` (git2)
///
/// Each operation is synchronous and atomic from the core's point of view:
/// pass/fail, no structured detail beyond the error message.
pub trait VersionControl: Send + Sync {
    /// Clone `source` into `target` (which must not exist), checking out
    /// `branch` when one is given.
    fn clone_repo(&self, source: &str, target: &Path, branch: Option<&str>) -> SproutResult<()>;

    /// Initialize a fresh repository at `path`.
    fn init(&self, path: &Path) -> SproutResult<()>;

    /// Stage everything under `path` and create one commit.
    fn commit(&self, path: &Path, message: &str) -> SproutResult<()>;
}

/// Port for manifest-driven template rendering.
///
/// Implemented by:
/// - `sprout_adapters::renderer::TomlRenderer`
///
/// The manifest schema and substitution rules are the adapter's business;
/// the core only decides *when* rendering happens (a manifest file exists at
/// the template root) and with which roots.
pub trait ManifestRenderer: Send + Sync {
    /// Render `template_root` into `destination` for a project named
    /// `project_name`. Produces a fully populated destination tree or fails.
    fn render(
        &self,
        project_name: &str,
        template_root: &Path,
        destination: &Path,
    ) -> SproutResult<()>;
}
