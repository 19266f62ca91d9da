//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use sprout_core::domain::ConflictStrategy as CoreStrategy;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "sprout",
    bin_name = "sprout",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f331} Materialize projects from template repositories",
    long_about = "Sprout clones a template repository and turns it into a \
                  ready-to-use project directory, merging into existing \
                  directories under an explicit conflict strategy.",
    after_help = "EXAMPLES:\n\
        \x20 sprout new my-api -T https://github.com/you/service-template\n\
        \x20 sprout new my-cli -T git@github.com:you/cli-template --branch next\n\
        \x20 sprout new my-app -o ~/work --conflict-strategy keep-existing\n\
        \x20 sprout completions bash > /usr/share/bash-completion/completions/sprout",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Materialize a new project from a template repository.
    #[command(
        visible_alias = "n",
        about = "Create a new project from a template",
        after_help = "EXAMPLES:\n\
            \x20 sprout new my-api -T https://github.com/you/service-template\n\
            \x20 sprout new my-app -T <url> --branch develop --no-commit\n\
            \x20 sprout new my-app -T <url> --conflict-strategy overwrite"
    )]
    New(NewArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 sprout completions bash > ~/.local/share/bash-completion/completions/sprout\n\
            \x20 sprout completions zsh  > ~/.zfunc/_sprout\n\
            \x20 sprout completions fish > ~/.config/fish/completions/sprout.fish"
    )]
    Completions(CompletionsArgs),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `sprout new`.
///
/// Exactly one positional is accepted; clap rejects extra positionals as a
/// usage error before anything touches the filesystem.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Name of the project (and of the directory created for it).
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    /// Template repository to clone.
    #[arg(
        short = 'T',
        long = "template",
        value_name = "URL",
        help = "Template repository URL (falls back to config defaults.template)"
    )]
    pub template: Option<String>,

    /// Branch to check out; the remote's default branch when omitted.
    #[arg(long = "branch", value_name = "NAME", help = "Template branch")]
    pub branch: Option<String>,

    /// Parent directory for the new project.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: current directory)"
    )]
    pub output: Option<PathBuf>,

    /// How to treat files that already exist at the destination.
    #[arg(
        long = "conflict-strategy",
        value_name = "STRATEGY",
        value_enum,
        help = "Conflict handling: error, keep-existing, or overwrite (default: error)"
    )]
    pub conflict_strategy: Option<StrategyArg>,

    /// Initialize the repository but do not create the initial commit.
    #[arg(long = "no-commit", help = "Skip the initial commit")]
    pub no_commit: bool,

    /// Skip version control entirely (implies --no-commit).
    #[arg(long = "no-git", help = "Do not initialize a git repository")]
    pub no_git: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `sprout completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// CLI-facing conflict strategy values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum StrategyArg {
    /// Fail on any duplicate file.
    Error,
    /// Keep destination files; discard the template's copies.
    KeepExisting,
    /// Replace destination files with the template's copies.
    Overwrite,
}

impl From<StrategyArg> for CoreStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Error => CoreStrategy::Error,
            StrategyArg::KeepExisting => CoreStrategy::KeepExisting,
            StrategyArg::Overwrite => CoreStrategy::Overwrite,
        }
    }
}

impl std::fmt::Display for StrategyArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", CoreStrategy::from(*self))
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
