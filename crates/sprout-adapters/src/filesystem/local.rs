//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use sprout_core::{
    application::ports::Filesystem,
    domain::TreeEntry,
    error::SproutResult,
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn list_dir(&self, path: &Path) -> SproutResult<Vec<TreeEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path).map_err(|e| map_io_error(path, e, "list directory"))?
        {
            let entry = entry.map_err(|e| map_io_error(path, e, "list directory"))?;
            let child = entry.path();
            let file_type = entry
                .file_type()
                .map_err(|e| map_io_error(&child, e, "inspect entry"))?;
            if file_type.is_dir() {
                entries.push(TreeEntry::directory(&child, dir_is_empty(&child)?));
            } else {
                // Symlinks are treated as files: they move as a unit and
                // never merge.
                entries.push(TreeEntry::file(child));
            }
        }
        // read_dir order is platform-dependent; a stable order keeps merge
        // failures reproducible.
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    fn probe(&self, path: &Path) -> SproutResult<Option<TreeEntry>> {
        match std::fs::symlink_metadata(path) {
            Ok(meta) if meta.is_dir() => Ok(Some(TreeEntry::directory(path, dir_is_empty(path)?))),
            Ok(_) => Ok(Some(TreeEntry::file(path))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(map_io_error(path, e, "probe path")),
        }
    }

    fn create_dir_all(&self, path: &Path) -> SproutResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn move_file(&self, from: &Path, to: &Path) -> SproutResult<()> {
        // rename replaces an existing destination file on Unix; on Windows,
        // and across filesystems, it fails and we fall back to copy+remove.
        if std::fs::rename(from, to).is_ok() {
            return Ok(());
        }
        std::fs::copy(from, to).map_err(|e| map_io_error(to, e, "copy file"))?;
        std::fs::remove_file(from).map_err(|e| map_io_error(from, e, "remove source file"))
    }

    fn remove_file(&self, path: &Path) -> SproutResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn remove_dir_all(&self, path: &Path) -> SproutResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_file(&self, path: &Path) -> SproutResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> SproutResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }
}

fn dir_is_empty(path: &Path) -> SproutResult<bool> {
    let mut iter = std::fs::read_dir(path).map_err(|e| map_io_error(path, e, "list directory"))?;
    Ok(iter.next().is_none())
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> sprout_core::error::SproutError {
    use sprout_core::application::ApplicationError;

    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
