//! Version-control adapter backed by `git2`.

use std::path::Path;

use git2::{IndexAddOption, Repository, Signature};
use tracing::{debug, info, instrument};

use sprout_core::{
    application::{ApplicationError, ports::VersionControl},
    error::{SproutError, SproutResult},
};

/// Identity used for the initial commit when the operator has no git
/// identity configured.
const FALLBACK_NAME: &str = "sprout";
const FALLBACK_EMAIL: &str = "sprout@localhost";

/// Git implementation of the version-control port.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitVersionControl;

impl GitVersionControl {
    pub fn new() -> Self {
        Self
    }
}

impl VersionControl for GitVersionControl {
    #[instrument(skip(self), fields(url = %source, path = %target.display()))]
    fn clone_repo(&self, source: &str, target: &Path, branch: Option<&str>) -> SproutResult<()> {
        info!("cloning template repository");
        let mut builder = git2::build::RepoBuilder::new();
        if let Some(branch) = branch {
            builder.branch(branch);
        }
        builder
            .clone(source, target)
            .map_err(|e| ApplicationError::AcquisitionFailed {
                source_name: source.to_string(),
                reason: e.message().to_string(),
            })?;
        debug!("clone completed");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %path.display()))]
    fn init(&self, path: &Path) -> SproutResult<()> {
        Repository::init(path).map_err(git_error("init", path))?;
        info!("initialized repository");
        Ok(())
    }

    /// Stage the whole tree and create one commit.
    ///
    /// The repository is fresh, so HEAD is unborn and the commit has no
    /// parents.
    #[instrument(skip(self, message), fields(path = %path.display()))]
    fn commit(&self, path: &Path, message: &str) -> SproutResult<()> {
        let fail = git_error("commit", path);

        let repo = Repository::open(path).map_err(git_error("open", path))?;
        let mut index = repo.index().map_err(&fail)?;
        index
            .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
            .map_err(&fail)?;
        index.write().map_err(&fail)?;
        let tree_oid = index.write_tree().map_err(&fail)?;
        let tree = repo.find_tree(tree_oid).map_err(&fail)?;

        let signature = repo
            .signature()
            .or_else(|_| Signature::now(FALLBACK_NAME, FALLBACK_EMAIL))
            .map_err(&fail)?;

        // An unborn HEAD yields a parentless commit; a repository reused by
        // the operator may already have history to build on.
        let parent = match repo.head() {
            Ok(head) => Some(head.peel_to_commit().map_err(&fail)?),
            Err(_) => None,
        };
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        let oid = repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .map_err(&fail)?;
        info!(sha = %oid, "created commit");
        Ok(())
    }
}

fn git_error<'p>(
    operation: &'static str,
    path: &'p Path,
) -> impl Fn(git2::Error) -> SproutError + 'p {
    move |e| {
        ApplicationError::VersionControlFailed {
            operation,
            path: path.to_path_buf(),
            reason: e.message().to_string(),
        }
        .into()
    }
}
