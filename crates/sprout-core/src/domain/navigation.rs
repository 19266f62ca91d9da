//! Navigation-hint arithmetic.
//!
//! After a project is materialized, the CLI tells the operator how to reach
//! it from wherever they ran the command. The hint is display-only: it never
//! feeds back into any filesystem operation.

use std::path::{Path, PathBuf};

/// Qualitative distance between the operator's working directory and the
/// materialized project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceClass {
    /// Target is under the current directory.
    SameDir,
    /// Target is under the current directory's parent.
    OneLevelUp,
    /// Target is under the grandparent.
    TwoLevelsUp,
    /// No shared ancestor within two levels; the absolute path is shown.
    TooDistant,
}

/// The shortest relative expression of the target directory, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationHint {
    pub path: String,
    pub class: DistanceClass,
}

/// Compute the shortest way to express `target_dir` relative to
/// `current_dir`, matching the target against `current_dir` and its first
/// two ancestors, shallowest first.
///
/// Pure and infallible: malformed or unrelated paths simply fail every
/// prefix match and fall through to [`DistanceClass::TooDistant`], which
/// reports the target path as given.
pub fn shortest_navigation_hint(current_dir: &Path, target_dir: &Path) -> NavigationHint {
    // Shallowest ancestor wins: same dir beats one level up beats two.
    if let Ok(rel) = target_dir.strip_prefix(current_dir) {
        return NavigationHint {
            path: display_relative(rel, 0),
            class: DistanceClass::SameDir,
        };
    }

    if let Some(parent) = current_dir.parent() {
        if let Ok(rel) = target_dir.strip_prefix(parent) {
            return NavigationHint {
                path: display_relative(rel, 1),
                class: DistanceClass::OneLevelUp,
            };
        }

        if let Some(grandparent) = parent.parent() {
            if let Ok(rel) = target_dir.strip_prefix(grandparent) {
                return NavigationHint {
                    path: display_relative(rel, 2),
                    class: DistanceClass::TwoLevelsUp,
                };
            }
        }
    }

    NavigationHint {
        path: target_dir.display().to_string(),
        class: DistanceClass::TooDistant,
    }
}

/// Render `rel` prefixed with `ups` levels of `..`, using the platform
/// separator. An empty remainder means the directories coincide.
fn display_relative(rel: &Path, ups: usize) -> String {
    let mut out = PathBuf::new();
    for _ in 0..ups {
        out.push("..");
    }
    out.push(rel);
    if out.as_os_str().is_empty() {
        ".".to_string()
    } else {
        out.display().to_string()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
