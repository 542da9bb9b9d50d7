//! # Command Line Interface
//!
//! Defines the CLI structure and command handlers for the effort tool.

mod build;
mod projects;

use std::path::Path;

use anyhow::{Context, Result};
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};
use effort_core::{ColorMode, ConfigDirs, ConfigError, ProjectCatalog, get_config_dirs};

/// Top-level CLI command for the effort tool
#[derive(Parser)]
#[command(name = "effort")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Build software-effort datasets from Jira issues and git history")]
#[command(
  long_about = "Effort correlates resolved Jira issues with the git commits that reference them.\n\n\
        For every issue with at least one matching commit it records resolution and\n\
        in-progress durations together with churn metrics, and writes the result as CSV."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    global = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for the effort tool
#[derive(Subcommand)]
pub enum Commands {
  /// Build the effort dataset of a project
  #[command(long_about = "Build the effort dataset of a project.\n\n\
            Fetches the project's resolved issues from Jira, maps them to the commits in the\n\
            local checkout (cloning it first when missing), and writes one CSV row per issue\n\
            that has at least one referencing commit.")]
  Build(build::BuildArgs),

  /// List the projects that can be built
  #[command(long_about = "List the built-in project presets together with any projects\n\
            defined in the projects file.")]
  #[command(alias = "ls")]
  Projects(projects::ProjectsArgs),
}

pub fn handle_cli(cli: Cli) -> Result<()> {
  cli.colors.apply();

  match cli.command {
    Commands::Build(build) => build::handle_build_command(build),
    Commands::Projects(projects) => projects::handle_projects_command(projects),
  }
}

/// Load the project catalog from an explicit projects file, or from the
/// default one in the config directory when it exists.
pub(crate) fn load_catalog(projects_file: Option<&Path>) -> Result<ProjectCatalog> {
  if let Some(path) = projects_file {
    if !path.exists() {
      return Err(anyhow::anyhow!("Projects file {} does not exist", path.display()));
    }
    return ProjectCatalog::load(Some(path)).context("Failed to load projects");
  }

  catalog_from_config_dirs(get_config_dirs())
}

/// Without a config directory there is no user file to read, so the presets
/// are the whole catalog.
fn catalog_from_config_dirs(config_dirs: Result<ConfigDirs, ConfigError>) -> Result<ProjectCatalog> {
  match config_dirs {
    Ok(dirs) => ProjectCatalog::load(Some(&dirs.projects_path())).context("Failed to load projects"),
    Err(e) => {
      tracing::debug!("No config directory available ({e}), using built-in presets");
      Ok(ProjectCatalog::builtin())
    }
  }
}
