//! Infrastructure adapters for Sprout.
//!
//! This crate implements the ports defined in
//! `sprout_core::application::ports`. It contains all external dependencies
//! and I/O operations.

pub mod filesystem;
pub mod renderer;
pub mod vcs;

// Re-export commonly used adapters
pub use filesystem::LocalFilesystem;
pub use renderer::TomlRenderer;
pub use vcs::GitVersionControl;
