//! Merge behavior against real directories.
//!
//! These tests exercise `TreeMerger` through `LocalFilesystem` on temp
//! trees: strategy semantics, kind mismatches, partial completion, and
//! idempotence.

use std::path::Path;

use tempfile::TempDir;

use sprout_adapters::LocalFilesystem;
use sprout_core::{
    application::TreeMerger,
    domain::{ConflictStrategy, DomainError},
    error::SproutError,
};

const ALL_STRATEGIES: [ConflictStrategy; 3] = [
    ConflictStrategy::Error,
    ConflictStrategy::KeepExisting,
    ConflictStrategy::Overwrite,
];

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn read(root: &Path, rel: &str) -> String {
    std::fs::read_to_string(root.join(rel)).unwrap()
}

fn merge(source: &Path, destination: &Path, strategy: ConflictStrategy) -> Result<(), SproutError> {
    let fs = LocalFilesystem::new();
    TreeMerger::new(&fs, strategy).merge(source, destination)
}

// ── empty destination ─────────────────────────────────────────────────────────

#[test]
fn empty_destination_reproduces_source_under_every_strategy() {
    for strategy in ALL_STRATEGIES {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        write(&src, "README.md", "hello");
        write(&src, "src/main.rs", "fn main() {}");
        write(&src, "src/deep/mod.rs", "pub mod deep;");
        std::fs::create_dir_all(&dst).unwrap();

        merge(&src, &dst, strategy).unwrap();

        assert_eq!(read(&dst, "README.md"), "hello");
        assert_eq!(read(&dst, "src/main.rs"), "fn main() {}");
        assert_eq!(read(&dst, "src/deep/mod.rs"), "pub mod deep;");
        // Moved, not copied: the source files are gone.
        assert!(!src.join("README.md").exists());
        assert!(!src.join("src/main.rs").exists());
    }
}

// ── strategy semantics on duplicate files ─────────────────────────────────────

#[test]
fn keep_existing_preserves_destination_content() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("src");
    let dst = tmp.path().join("dst");
    write(&src, "config.toml", "from-template");
    write(&dst, "config.toml", "mine");

    merge(&src, &dst, ConflictStrategy::KeepExisting).unwrap();

    assert_eq!(read(&dst, "config.toml"), "mine");
    // The incoming copy is discarded, not left behind in the source.
    assert!(!src.join("config.toml").exists());
}

#[test]
fn overwrite_takes_source_content() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("src");
    let dst = tmp.path().join("dst");
    write(&src, "config.toml", "from-template");
    write(&dst, "config.toml", "mine");

    merge(&src, &dst, ConflictStrategy::Overwrite).unwrap();

    assert_eq!(read(&dst, "config.toml"), "from-template");
}

#[test]
fn error_strategy_fails_on_duplicate_with_offending_path() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("src");
    let dst = tmp.path().join("dst");
    write(&src, "taken.txt", "incoming");
    write(&dst, "taken.txt", "existing");

    let err = merge(&src, &dst, ConflictStrategy::Error).unwrap_err();
    match err {
        SproutError::Domain(DomainError::DuplicateEntry { path }) => {
            assert!(path.ends_with("taken.txt"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(read(&dst, "taken.txt"), "existing");
}

// ── partial completion ────────────────────────────────────────────────────────

#[test]
fn failure_keeps_moved_prefix_and_leaves_later_siblings_untouched() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("src");
    let dst = tmp.path().join("dst");
    // Entries are processed in sorted order: a, b, c.
    write(&src, "a.txt", "a");
    write(&src, "b.txt", "b");
    write(&src, "c.txt", "c");
    write(&dst, "b.txt", "conflict");

    let err = merge(&src, &dst, ConflictStrategy::Error).unwrap_err();
    assert!(matches!(
        err,
        SproutError::Domain(DomainError::DuplicateEntry { .. })
    ));

    // a.txt was processed before the failure and stays moved.
    assert_eq!(read(&dst, "a.txt"), "a");
    assert!(!src.join("a.txt").exists());
    // c.txt comes after the failing entry: never touched.
    assert_eq!(read(&src, "c.txt"), "c");
    assert!(!dst.join("c.txt").exists());
}

// ── kind mismatches ───────────────────────────────────────────────────────────

#[test]
fn file_in_destination_blocks_incoming_directory_under_every_strategy() {
    for strategy in ALL_STRATEGIES {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        write(&src, "sub/inner.txt", "x");
        write(&dst, "sub", "I am a file");

        let err = merge(&src, &dst, strategy).unwrap_err();
        assert!(
            matches!(err, SproutError::Domain(DomainError::KindMismatch { .. })),
            "strategy {strategy}: {err:?}"
        );
        assert_eq!(read(&dst, "sub"), "I am a file");
    }
}

#[test]
fn populated_directory_blocks_incoming_file_under_every_strategy() {
    for strategy in ALL_STRATEGIES {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        write(&src, "thing", "flat file");
        write(&dst, "thing/nested.txt", "occupied");

        let err = merge(&src, &dst, strategy).unwrap_err();
        assert!(matches!(
            err,
            SproutError::Domain(DomainError::KindMismatch { .. })
        ));
    }
}

#[test]
fn empty_directory_is_silently_replaced_by_file() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("src");
    let dst = tmp.path().join("dst");
    write(&src, "thing", "flat file");
    std::fs::create_dir_all(dst.join("thing")).unwrap();

    merge(&src, &dst, ConflictStrategy::Error).unwrap();
    assert_eq!(read(&dst, "thing"), "flat file");
}

// ── recursion ─────────────────────────────────────────────────────────────────

#[test]
fn sibling_directories_merge_their_contents() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("src");
    let dst = tmp.path().join("dst");
    write(&src, "sub/from_template.txt", "t");
    write(&dst, "sub/already_here.txt", "h");

    merge(&src, &dst, ConflictStrategy::Error).unwrap();

    assert_eq!(read(&dst, "sub/from_template.txt"), "t");
    assert_eq!(read(&dst, "sub/already_here.txt"), "h");
}

#[test]
fn nested_conflict_propagates_from_deep_recursion() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("src");
    let dst = tmp.path().join("dst");
    write(&src, "a/b/c/leaf.txt", "incoming");
    write(&dst, "a/b/c/leaf.txt", "existing");

    let err = merge(&src, &dst, ConflictStrategy::Error).unwrap_err();
    match err {
        SproutError::Domain(DomainError::DuplicateEntry { path }) => {
            assert!(path.ends_with("a/b/c/leaf.txt"), "path was {path:?}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// ── idempotence ───────────────────────────────────────────────────────────────

#[test]
fn overwrite_merge_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let dst = tmp.path().join("dst");
    std::fs::create_dir_all(&dst).unwrap();

    for _ in 0..2 {
        // The merge drains its source, so rebuild it for each pass.
        let src = tmp.path().join("src");
        write(&src, "README.md", "stable");
        write(&src, "src/lib.rs", "pub fn id() {}");
        merge(&src, &dst, ConflictStrategy::Overwrite).unwrap();
        std::fs::remove_dir_all(&src).unwrap();
    }

    assert_eq!(read(&dst, "README.md"), "stable");
    assert_eq!(read(&dst, "src/lib.rs"), "pub fn id() {}");
    // Exactly the merged entries, nothing extra accumulated.
    let names: Vec<_> = std::fs::read_dir(&dst)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(names.len(), 2);
}
