//! Materialize Service - main application orchestrator.
//!
//! This service coordinates the entire materialization workflow:
//! 1. Acquire the template (clone into a staging directory)
//! 2. Detect a manifest at the staging root
//! 3. Dispatch: manifest renderer, or raw tree merge
//! 4. Initialize version control on the result
//! 5. Summarize with a navigation hint
//!
//! It implements the driving port (incoming) and uses driven ports
//! (outgoing). Every step after acquisition that fails aborts the run; no
//! step is retried.

use std::path::PathBuf;

use tracing::{debug, info, instrument, warn};

use crate::{
    MANIFEST_FILE,
    application::{
        TreeMerger,
        ports::{Filesystem, ManifestRenderer, VersionControl},
    },
    domain::{ConflictStrategy, DomainError, NavigationHint, shortest_navigation_hint},
    error::SproutResult,
};

/// Message used for the single commit capturing the materialized tree.
const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";

/// Everything one materialization run needs, resolved up front by the
/// caller. The service reads no ambient state: the operator's working
/// directory and the staging location both arrive here.
#[derive(Debug, Clone)]
pub struct MaterializeRequest {
    /// Name of the project being created.
    pub project_name: String,
    /// Template source reference (git URL or local path).
    pub template_source: String,
    /// Branch to check out; `None` means the remote's default.
    pub branch: Option<String>,
    /// Final project directory (`<output-or-cwd>/<name>`).
    pub destination: PathBuf,
    /// Where the template is cloned before being consumed.
    pub staging_dir: PathBuf,
    /// Conflict policy for the whole merge; no per-file override.
    pub strategy: ConflictStrategy,
    /// `false` suppresses repository initialization entirely (`--no-git`).
    pub init_repository: bool,
    /// `false` initializes without committing (`--no-commit`).
    pub create_commit: bool,
    /// The operator's working directory, for the navigation hint.
    pub working_dir: PathBuf,
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct MaterializeReport {
    pub destination: PathBuf,
    /// Shortest way to reach the project from where the operator stands.
    pub hint: NavigationHint,
    /// `true` if the manifest renderer ran, `false` for a raw merge.
    pub rendered: bool,
}

/// Main materialization service.
///
/// Orchestrates acquisition, dispatch, version control, and the summary.
pub struct MaterializeService {
    filesystem: Box<dyn Filesystem>,
    vcs: Box<dyn VersionControl>,
    renderer: Box<dyn ManifestRenderer>,
}

impl MaterializeService {
    /// Create a new materialize service with the given adapters.
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        vcs: Box<dyn VersionControl>,
        renderer: Box<dyn ManifestRenderer>,
    ) -> Self {
        Self {
            filesystem,
            vcs,
            renderer,
        }
    }

    /// Run one materialization.
    ///
    /// Linear state machine with one branch point:
    /// `Acquire → DetectManifest → {Render | Merge} → InitVersionControl →
    /// Summarize`. Any failing step is terminal.
    #[instrument(
        skip_all,
        fields(
            project = %request.project_name,
            template = %request.template_source,
            destination = %request.destination.display(),
        )
    )]
    pub fn materialize(&self, request: &MaterializeRequest) -> SproutResult<MaterializeReport> {
        validate_request(request)?;

        // ── Acquire ───────────────────────────────────────────────────────
        // Stale staging from an aborted earlier run is cleared best-effort;
        // only the clone itself is allowed to be fatal here.
        if self.filesystem.exists(&request.staging_dir) {
            if let Err(e) = self.filesystem.remove_dir_all(&request.staging_dir) {
                warn!(error = %e, staging = %request.staging_dir.display(),
                      "could not clear stale staging directory");
            }
        }
        self.vcs.clone_repo(
            &request.template_source,
            &request.staging_dir,
            request.branch.as_deref(),
        )?;
        info!("template acquired");

        // ── DetectManifest ────────────────────────────────────────────────
        // Computed once per run, never re-evaluated.
        let has_manifest = self
            .filesystem
            .exists(&request.staging_dir.join(MANIFEST_FILE));
        debug!(manifest = has_manifest, "dispatch selected");

        // ── Render | Merge ────────────────────────────────────────────────
        let outcome = if has_manifest {
            self.renderer
                .render(
                    &request.project_name,
                    &request.staging_dir,
                    &request.destination,
                )
        } else {
            self.merge_tree(request)
        };

        // The staging tree is consumed either way; remove it on the failure
        // path too rather than inheriting the historical leak. Removal
        // problems are logged, never allowed to mask the primary outcome.
        self.discard_staging(&request.staging_dir);
        outcome?;

        // ── InitVersionControl ────────────────────────────────────────────
        if request.init_repository {
            self.init_version_control(request)?;
        }

        // ── Summarize ─────────────────────────────────────────────────────
        let hint = shortest_navigation_hint(&request.working_dir, &request.destination);
        info!("materialization completed");
        Ok(MaterializeReport {
            destination: request.destination.clone(),
            hint,
            rendered: has_manifest,
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Raw-merge branch: ensure the destination root, then drain staging
    /// into it. A pre-existing destination supplied by the operator is
    /// reused, not an error.
    fn merge_tree(&self, request: &MaterializeRequest) -> SproutResult<()> {
        if !self.filesystem.exists(&request.destination) {
            self.filesystem.create_dir_all(&request.destination)?;
        }
        TreeMerger::new(self.filesystem.as_ref(), request.strategy)
            .merge(&request.staging_dir, &request.destination)
    }

    /// Discard pre-existing metadata, initialize fresh, optionally commit.
    fn init_version_control(&self, request: &MaterializeRequest) -> SproutResult<()> {
        let metadata = request.destination.join(".git");
        if self.filesystem.exists(&metadata) {
            debug!(path = %metadata.display(), "discarding pre-existing repository metadata");
            self.filesystem.remove_dir_all(&metadata)?;
        }
        self.vcs.init(&request.destination)?;
        if request.create_commit {
            self.vcs
                .commit(&request.destination, INITIAL_COMMIT_MESSAGE)?;
        }
        Ok(())
    }

    /// Best-effort removal of the staging tree.
    fn discard_staging(&self, staging: &std::path::Path) {
        if !self.filesystem.exists(staging) {
            return;
        }
        if let Err(e) = self.filesystem.remove_dir_all(staging) {
            warn!(error = %e, staging = %staging.display(), "staging cleanup failed");
        }
    }
}

fn validate_request(request: &MaterializeRequest) -> SproutResult<()> {
    if request.project_name.trim().is_empty() {
        return Err(DomainError::InvalidProjectName {
            name: request.project_name.clone(),
            reason: "name cannot be empty".into(),
        }
        .into());
    }
    if request.template_source.trim().is_empty() {
        return Err(DomainError::InvalidTemplateSource("source reference is empty".into()).into());
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use mockall::mock;

    use crate::application::ApplicationError;
    use crate::domain::TreeEntry;
    use crate::error::SproutError;

    mock! {
        Fs {}
        impl Filesystem for Fs {
            fn list_dir(&self, path: &Path) -> SproutResult<Vec<TreeEntry>>;
            fn probe(&self, path: &Path) -> SproutResult<Option<TreeEntry>>;
            fn create_dir_all(&self, path: &Path) -> SproutResult<()>;
            fn move_file(&self, from: &Path, to: &Path) -> SproutResult<()>;
            fn remove_file(&self, path: &Path) -> SproutResult<()>;
            fn remove_dir_all(&self, path: &Path) -> SproutResult<()>;
            fn exists(&self, path: &Path) -> bool;
            fn read_file(&self, path: &Path) -> SproutResult<String>;
            fn write_file(&self, path: &Path, content: &str) -> SproutResult<()>;
        }
    }

    mock! {
        Vcs {}
        impl VersionControl for Vcs {
            fn clone_repo<'a>(&self, source: &str, target: &Path, branch: Option<&'a str>) -> SproutResult<()>;
            fn init(&self, path: &Path) -> SproutResult<()>;
            fn commit(&self, path: &Path, message: &str) -> SproutResult<()>;
        }
    }

    mock! {
        Renderer {}
        impl ManifestRenderer for Renderer {
            fn render(&self, project_name: &str, template_root: &Path, destination: &Path) -> SproutResult<()>;
        }
    }

    fn request() -> MaterializeRequest {
        MaterializeRequest {
            project_name: "demo".into(),
            template_source: "https://example.com/tmpl.git".into(),
            branch: None,
            destination: PathBuf::from("/work/demo"),
            staging_dir: PathBuf::from("/tmp/sprout-demo"),
            strategy: ConflictStrategy::Error,
            init_repository: true,
            create_commit: true,
            working_dir: PathBuf::from("/work"),
        }
    }

    fn service(fs: MockFs, vcs: MockVcs, renderer: MockRenderer) -> MaterializeService {
        MaterializeService::new(Box::new(fs), Box::new(vcs), Box::new(renderer))
    }

    #[test]
    fn render_branch_consumes_and_deletes_staging() {
        let req = request();
        let staging = req.staging_dir.clone();
        let manifest = staging.join(MANIFEST_FILE);

        let mut fs = MockFs::new();
        // Acquire: no stale staging to clear.
        {
            let staging = staging.clone();
            fs.expect_exists()
                .withf(move |p| p == staging)
                .times(1)
                .return_const(false);
        }
        // DetectManifest.
        fs.expect_exists()
            .withf(move |p| p == manifest)
            .times(1)
            .return_const(true);
        // Staging cleanup after the renderer consumed it.
        {
            let staging = staging.clone();
            fs.expect_exists()
                .withf(move |p| p == staging)
                .times(1)
                .return_const(true);
        }
        {
            let staging = staging.clone();
            fs.expect_remove_dir_all()
                .withf(move |p| p == staging)
                .times(1)
                .returning(|_| Ok(()));
        }
        // No pre-existing .git at the destination.
        let metadata = req.destination.join(".git");
        fs.expect_exists()
            .withf(move |p| p == metadata)
            .times(1)
            .return_const(false);

        let mut vcs = MockVcs::new();
        vcs.expect_clone_repo().times(1).returning(|_, _, _| Ok(()));
        {
            let destination = req.destination.clone();
            vcs.expect_init()
                .withf(move |p| p == destination)
                .times(1)
                .returning(|_| Ok(()));
        }
        {
            let destination = req.destination.clone();
            vcs.expect_commit()
                .withf(move |p, msg| p == destination && msg == INITIAL_COMMIT_MESSAGE)
                .times(1)
                .returning(|_, _| Ok(()));
        }

        let mut renderer = MockRenderer::new();
        {
            let staging = staging.clone();
            let destination = req.destination.clone();
            renderer
                .expect_render()
                .withf(move |name, root, dest| {
                    name == "demo" && root == staging && dest == destination
                })
                .times(1)
                .returning(|_, _, _| Ok(()));
        }

        let report = service(fs, vcs, renderer).materialize(&req).unwrap();
        assert!(report.rendered);
        assert_eq!(report.destination, req.destination);
        // /work → /work/demo is one hop down.
        assert_eq!(report.hint.path, "demo");
    }

    #[test]
    fn clone_failure_aborts_before_any_dispatch() {
        let req = request();

        let mut fs = MockFs::new();
        fs.expect_exists().return_const(false);

        let mut vcs = MockVcs::new();
        vcs.expect_clone_repo().times(1).returning(|source, _, _| {
            Err(ApplicationError::AcquisitionFailed {
                source_name: source.into(),
                reason: "connection refused".into(),
            }
            .into())
        });
        // No init/commit expectations: reaching them would panic the mock.

        let renderer = MockRenderer::new(); // render must never be called

        let err = service(fs, vcs, renderer).materialize(&req).unwrap_err();
        assert!(matches!(
            err,
            SproutError::Application(ApplicationError::AcquisitionFailed { .. })
        ));
    }

    #[test]
    fn merge_branch_runs_without_manifest_and_skips_git_when_disabled() {
        let mut req = request();
        req.init_repository = false;
        req.create_commit = false;
        let staging = req.staging_dir.clone();

        let mut fs = MockFs::new();
        // Acquire: stale staging from a previous aborted run gets cleared.
        {
            let staging = staging.clone();
            fs.expect_exists()
                .withf(move |p| p == staging)
                .times(1)
                .return_const(true);
        }
        {
            let staging = staging.clone();
            fs.expect_remove_dir_all()
                .withf(move |p| p == staging)
                .times(1)
                .returning(|_| Ok(()));
        }
        // DetectManifest: absent → raw merge.
        let manifest = staging.join(MANIFEST_FILE);
        fs.expect_exists()
            .withf(move |p| p == manifest)
            .times(1)
            .return_const(false);
        // Destination pre-exists: reused, not created.
        {
            let destination = req.destination.clone();
            fs.expect_exists()
                .withf(move |p| p == destination)
                .times(1)
                .return_const(true);
        }
        // Merge: empty template tree.
        {
            let staging = staging.clone();
            fs.expect_list_dir()
                .withf(move |p| p == staging)
                .times(1)
                .returning(|_| Ok(vec![]));
        }
        // Cleanup: clone was consumed, staging removed.
        {
            let staging = staging.clone();
            fs.expect_exists()
                .withf(move |p| p == staging)
                .times(1)
                .return_const(true);
        }
        fs.expect_remove_dir_all()
            .withf(move |p| p == staging)
            .times(1)
            .returning(|_| Ok(()));

        let mut vcs = MockVcs::new();
        vcs.expect_clone_repo().times(1).returning(|_, _, _| Ok(()));
        // init/commit must not run with --no-git.

        let report = service(fs, vcs, MockRenderer::new())
            .materialize(&req)
            .unwrap();
        assert!(!report.rendered);
    }

    #[test]
    fn commit_is_suppressed_independently_of_init() {
        let mut req = request();
        req.create_commit = false;
        let staging = req.staging_dir.clone();

        let mut fs = MockFs::new();
        {
            let staging = staging.clone();
            fs.expect_exists()
                .withf(move |p| p == staging)
                .return_const(false);
        }
        let manifest = staging.join(MANIFEST_FILE);
        fs.expect_exists()
            .withf(move |p| p == manifest)
            .return_const(true);
        let metadata = req.destination.join(".git");
        fs.expect_exists()
            .withf(move |p| p == metadata)
            .return_const(false);

        let mut vcs = MockVcs::new();
        vcs.expect_clone_repo().returning(|_, _, _| Ok(()));
        vcs.expect_init().times(1).returning(|_| Ok(()));
        // No commit expectation: the mock panics if commit is reached.

        let mut renderer = MockRenderer::new();
        renderer.expect_render().returning(|_, _, _| Ok(()));

        service(fs, vcs, renderer).materialize(&req).unwrap();
    }

    #[test]
    fn empty_project_name_is_rejected_before_any_io() {
        let mut req = request();
        req.project_name = "  ".into();

        // All mocks bare: any port call would panic.
        let err = service(MockFs::new(), MockVcs::new(), MockRenderer::new())
            .materialize(&req)
            .unwrap_err();
        assert!(matches!(
            err,
            SproutError::Domain(DomainError::InvalidProjectName { .. })
        ));
    }
}
