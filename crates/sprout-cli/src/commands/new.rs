//! Implementation of the `sprout new` command.
//!
//! Responsibility: translate CLI arguments into a `MaterializeRequest`,
//! call the core materialize service, and display results. No business
//! logic lives here.

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use sprout_adapters::{GitVersionControl, LocalFilesystem, TomlRenderer};
use sprout_core::{
    application::{MaterializeRequest, MaterializeService},
    domain::{ConflictStrategy, DistanceClass},
};

use crate::{
    cli::{NewArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `sprout new` command.
///
/// Dispatch sequence:
/// 1. Validate the project name
/// 2. Resolve template source / branch / strategy (flags, then config)
/// 3. Resolve destination and staging paths
/// 4. Execute materialization via `MaterializeService`
/// 5. Print the navigation hint
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Validate the name before any filesystem work.
    validate_project_name(&args.name)?;

    // 2. Flags win over config defaults.
    let template = args
        .template
        .clone()
        .or_else(|| config.defaults.template.clone())
        .ok_or(CliError::MissingTemplateSource)?;
    let branch = args.branch.clone().or_else(|| config.defaults.branch.clone());
    let strategy = resolve_strategy(&args, &config)?;

    // 3. Destination and staging.
    let working_dir = std::env::current_dir()?;
    let output_dir = args.output.clone().unwrap_or_else(|| working_dir.clone());
    let destination = output_dir.join(&args.name);
    let staging_dir = staging_dir_for(&args.name);

    debug!(
        template = %template,
        branch = branch.as_deref().unwrap_or("default"),
        strategy = %strategy,
        destination = %destination.display(),
        "Request resolved"
    );

    let request = MaterializeRequest {
        project_name: args.name.clone(),
        template_source: template,
        branch,
        destination,
        staging_dir,
        strategy,
        init_repository: !args.no_git,
        create_commit: !args.no_commit && !args.no_git,
        working_dir,
    };

    // 4. Wire adapters and run.
    let service = MaterializeService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(GitVersionControl::new()),
        Box::new(TomlRenderer::new(Box::new(LocalFilesystem::new()))),
    );

    output.header(&format!("Materializing '{}'...", args.name))?;
    info!(project = %args.name, "Materialization started");

    let report = service.materialize(&request).map_err(CliError::Core)?;

    info!(project = %args.name, "Materialization completed");

    // 5. Success + navigation hint.
    output.success(&format!("Project '{}' created!", args.name))?;

    if !global.quiet {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", report.hint.path))?;
        if report.hint.class == DistanceClass::TooDistant {
            output.info("The project is outside your current directory tree.")?;
        }
    }

    Ok(())
}

// ── Resolution helpers ────────────────────────────────────────────────────────

fn validate_project_name(name: &str) -> CliResult<()> {
    if name.is_empty() {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot be empty".into(),
        });
    }
    if name.starts_with('.') {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot start with '.'".into(),
        });
    }
    if name.contains('/') || name.contains('\\') {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot contain path separators".into(),
        });
    }
    Ok(())
}

fn resolve_strategy(args: &NewArgs, config: &AppConfig) -> CliResult<ConflictStrategy> {
    if let Some(strategy) = args.conflict_strategy {
        return Ok(strategy.into());
    }
    if let Some(raw) = &config.defaults.conflict_strategy {
        return raw.parse().map_err(|e: String| CliError::ConfigError {
            message: e,
            source: None,
        });
    }
    Ok(ConflictStrategy::default())
}

/// A per-project staging path under the system temp directory.
///
/// The path is deterministic so that a later run can clear leftovers from an
/// earlier aborted one.
fn staging_dir_for(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("sprout-template-{name}"))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
