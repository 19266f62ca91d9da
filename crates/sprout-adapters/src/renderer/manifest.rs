//! Manifest-driven renderer with variable substitution.
//!
//! A template that ships a `template.toml` at its root opts into rendered
//! materialization. The manifest declares variables and their defaults; the
//! renderer collects values from the operator input source, then walks the
//! template tree substituting `{{var}}` in file contents and in path
//! segments. `project_name` is always defined.
//!
//! ```toml
//! [template]
//! description = "Minimal service skeleton"
//!
//! [vars]
//! author = "anonymous"
//! service_port = "8080"
//! ```

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Mutex;

use serde::Deserialize;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use sprout_core::{
    MANIFEST_FILE,
    application::{ApplicationError, ports::{Filesystem, ManifestRenderer}},
    error::SproutResult,
};

/// Parsed `template.toml`.
#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    template: TemplateMeta,
    /// Variable name → default value, prompted in name order.
    #[serde(default)]
    vars: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
struct TemplateMeta {
    #[serde(default)]
    description: Option<String>,
}

/// Renderer consuming `template.toml` manifests.
///
/// Holds the filesystem capability it was handed and an operator input
/// source: stdin in production, a scripted buffer in tests.
pub struct TomlRenderer {
    filesystem: Box<dyn Filesystem>,
    input: Mutex<Box<dyn BufRead + Send>>,
}

impl TomlRenderer {
    /// Production renderer reading variable values from stdin.
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self::with_input(filesystem, Box::new(io::BufReader::new(io::stdin())))
    }

    /// Renderer with a scripted input source.
    pub fn with_input(filesystem: Box<dyn Filesystem>, input: Box<dyn BufRead + Send>) -> Self {
        Self {
            filesystem,
            input: Mutex::new(input),
        }
    }

    fn load_manifest(&self, template_root: &Path) -> SproutResult<Manifest> {
        let raw = self.filesystem.read_file(&template_root.join(MANIFEST_FILE))?;
        toml::from_str(&raw).map_err(|e| {
            ApplicationError::RenderingFailed {
                reason: format!("malformed {MANIFEST_FILE}: {e}"),
            }
            .into()
        })
    }

    /// Prompt for every declared variable. An empty answer (or exhausted
    /// input) accepts the default.
    fn collect_values(
        &self,
        project_name: &str,
        manifest: &Manifest,
    ) -> SproutResult<BTreeMap<String, String>> {
        let mut values = BTreeMap::new();
        values.insert("project_name".to_string(), project_name.to_string());

        if let Some(description) = &manifest.template.description {
            println!("{description}");
        }

        let mut input = self.input.lock().map_err(|_| {
            sprout_core::error::SproutError::Internal {
                message: "renderer input source poisoned".into(),
            }
        })?;

        for (name, default) in &manifest.vars {
            print!("{name} [{default}]: ");
            let _ = io::stdout().flush();

            let mut line = String::new();
            let read = input.read_line(&mut line).map_err(|e| {
                ApplicationError::RenderingFailed {
                    reason: format!("could not read value for '{name}': {e}"),
                }
            })?;

            let answer = line.trim();
            let value = if read == 0 || answer.is_empty() {
                default.clone()
            } else {
                answer.to_string()
            };
            values.insert(name.clone(), value);
        }
        Ok(values)
    }
}

impl ManifestRenderer for TomlRenderer {
    #[instrument(skip(self), fields(project = %project_name))]
    fn render(
        &self,
        project_name: &str,
        template_root: &Path,
        destination: &Path,
    ) -> SproutResult<()> {
        let manifest = self.load_manifest(template_root)?;
        let values = self.collect_values(project_name, &manifest)?;
        debug!(vars = values.len(), "rendering template");

        self.filesystem.create_dir_all(destination)?;

        let walker = WalkDir::new(template_root)
            .min_depth(1)
            .into_iter()
            .filter_entry(|e| !skipped(e));

        for entry in walker {
            let entry = entry.map_err(|e| ApplicationError::RenderingFailed {
                reason: format!("template walk failed: {e}"),
            })?;
            let rel = entry.path().strip_prefix(template_root).map_err(|e| {
                ApplicationError::RenderingFailed {
                    reason: format!("entry escaped template root: {e}"),
                }
            })?;
            let target = destination.join(substitute(&rel.to_string_lossy(), &values));

            if entry.file_type().is_dir() {
                self.filesystem.create_dir_all(&target)?;
                continue;
            }

            if let Some(parent) = target.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            match self.filesystem.read_file(entry.path()) {
                Ok(content) => self
                    .filesystem
                    .write_file(&target, &substitute(&content, &values))?,
                // Non-UTF-8 content carries over verbatim.
                Err(_) => self.filesystem.move_file(entry.path(), &target)?,
            }
        }
        Ok(())
    }
}

/// The manifest itself and repository metadata never reach the destination.
fn skipped(entry: &walkdir::DirEntry) -> bool {
    if entry.depth() == 1 && entry.file_name() == MANIFEST_FILE {
        return true;
    }
    entry.file_type().is_dir() && entry.file_name() == ".git"
}

/// Replace `{{name}}` (and the spaced `{{ name }}` form) for every value.
fn substitute(text: &str, values: &BTreeMap<String, String>) -> String {
    let mut out = text.to_string();
    for (name, value) in values {
        out = out.replace(&format!("{{{{{name}}}}}"), value);
        out = out.replace(&format!("{{{{ {name} }}}}"), value);
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::LocalFilesystem;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn renderer(script: &str) -> TomlRenderer {
        TomlRenderer::with_input(
            Box::new(LocalFilesystem::new()),
            Box::new(Cursor::new(script.to_string())),
        )
    }

    fn write(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn substitute_handles_both_spacings() {
        let mut values = BTreeMap::new();
        values.insert("name".to_string(), "demo".to_string());
        assert_eq!(substitute("{{name}} and {{ name }}", &values), "demo and demo");
    }

    #[test]
    fn unknown_placeholders_are_left_alone() {
        let values = BTreeMap::new();
        assert_eq!(substitute("{{mystery}}", &values), "{{mystery}}");
    }

    #[test]
    fn renders_contents_and_path_segments() {
        let tmp = TempDir::new().unwrap();
        let template = tmp.path().join("template");
        let dest = tmp.path().join("out");

        write(
            &template.join(MANIFEST_FILE),
            "[template]\ndescription = \"demo\"\n\n[vars]\nauthor = \"anonymous\"\n",
        );
        write(
            &template.join("README.md"),
            "# {{project_name}} by {{author}}\n",
        );
        write(&template.join("src/{{project_name}}.rs"), "// {{project_name}}\n");

        renderer("Jane\n")
            .render("widget", &template, &dest)
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(dest.join("README.md")).unwrap(),
            "# widget by Jane\n"
        );
        assert_eq!(
            std::fs::read_to_string(dest.join("src/widget.rs")).unwrap(),
            "// widget\n"
        );
        assert!(!dest.join(MANIFEST_FILE).exists(), "manifest must not be copied");
    }

    #[test]
    fn empty_answer_accepts_default() {
        let tmp = TempDir::new().unwrap();
        let template = tmp.path().join("template");
        let dest = tmp.path().join("out");

        write(&template.join(MANIFEST_FILE), "[vars]\nauthor = \"anonymous\"\n");
        write(&template.join("a.txt"), "{{author}}");

        renderer("\n").render("p", &template, &dest).unwrap();
        assert_eq!(std::fs::read_to_string(dest.join("a.txt")).unwrap(), "anonymous");
    }

    #[test]
    fn exhausted_input_accepts_default() {
        let tmp = TempDir::new().unwrap();
        let template = tmp.path().join("template");
        let dest = tmp.path().join("out");

        write(&template.join(MANIFEST_FILE), "[vars]\nauthor = \"anonymous\"\n");
        write(&template.join("a.txt"), "{{author}}");

        renderer("").render("p", &template, &dest).unwrap();
        assert_eq!(std::fs::read_to_string(dest.join("a.txt")).unwrap(), "anonymous");
    }

    #[test]
    fn malformed_manifest_is_a_rendering_failure() {
        let tmp = TempDir::new().unwrap();
        let template = tmp.path().join("template");
        write(&template.join(MANIFEST_FILE), "vars = not-a-table");

        let err = renderer("")
            .render("p", &template, &tmp.path().join("out"))
            .unwrap_err();
        assert!(err.to_string().contains("template.toml"));
    }
}
