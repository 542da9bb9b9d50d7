//! # Build Command
//!
//! Runs the dataset pipeline for the selected project.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use effort_core::consts::DEFAULT_PROJECT;
use effort_core::output::{format_path, format_project_name};
use effort_core::{print_header, print_info, print_success, print_warning};

use crate::cli::load_catalog;
use crate::dataset::DatasetBuilder;

/// Arguments for the build command
#[derive(Args)]
pub struct BuildArgs {
  /// Project to build, by name or Jira key (e.g. calcite, IVY)
  #[arg(long, short = 'p', default_value = DEFAULT_PROJECT)]
  pub project: String,

  /// TOML file with additional project definitions
  #[arg(long, value_name = "FILE")]
  pub projects_file: Option<PathBuf>,

  /// Output CSV path (defaults to <jira key>_effort_dataset.csv)
  #[arg(long, short = 'o', value_name = "FILE")]
  pub output: Option<PathBuf>,

  /// Number of issues requested per Jira search page
  #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
  pub page_size: Option<u32>,
}

pub(crate) fn handle_build_command(args: BuildArgs) -> Result<()> {
  let catalog = load_catalog(args.projects_file.as_deref())?;
  let config = catalog.resolve(&args.project)?.clone();

  print_header(&format!("Building dataset for {}", format_project_name(&config.name)));

  let builder = DatasetBuilder::new(config, args.page_size)?;
  let report = builder.build_and_save(args.output.as_deref())?;

  print_info(&format!("Issues included in dataset: {}", report.rows_written));
  print_info(&format!("Issues skipped (no commits): {}", report.skipped_no_commits));
  if report.rows_written == 0 {
    print_warning("No issue is referenced by any commit; the dataset only has a header row");
  }
  print_success(&format!(
    "Dataset saved to '{}'.",
    format_path(&report.output_path.display().to_string())
  ));

  Ok(())
}
