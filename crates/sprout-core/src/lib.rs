//! Sprout Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Sprout
//! project materialization tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           sprout-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │    (MaterializeService, TreeMerger)     │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Driven: Filesystem, Vcs, Renderer)     │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     sprout-adapters (Infrastructure)    │
//! │ (LocalFilesystem, GitVersionControl, …) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (ConflictStrategy, TreeEntry, NavHint)  │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sprout_core::application::MaterializeService;
//!
//! // Wire the service with injected adapters, then run one materialization.
//! let service = MaterializeService::new(filesystem, vcs, renderer);
//! let report = service.materialize(&request)?;
//! println!("cd {}", report.hint.path);
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        MaterializeReport, MaterializeRequest, MaterializeService, TreeMerger,
        ports::{Filesystem, ManifestRenderer, VersionControl},
    };
    pub use crate::domain::{
        ConflictStrategy, DistanceClass, EntryKind, MoveDecision, NavigationHint, TreeEntry,
        resolve_move, shortest_navigation_hint,
    };
    pub use crate::error::{SproutError, SproutResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the manifest file that switches materialization from a raw tree
/// merge to renderer-driven scaffolding. Checked once, at the template root
/// only — a manifest deeper in the tree is ordinary content.
pub const MANIFEST_FILE: &str = "template.toml";
