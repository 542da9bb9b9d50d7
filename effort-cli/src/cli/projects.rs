//! # Projects Command
//!
//! Lists the projects that `effort build` can select.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::load_catalog;

/// Arguments for the projects command
#[derive(Args)]
pub struct ProjectsArgs {
  /// TOML file with additional project definitions
  #[arg(long, value_name = "FILE")]
  pub projects_file: Option<PathBuf>,
}

#[derive(Tabled)]
struct ProjectRow {
  #[tabled(rename = "Name")]
  name: String,
  #[tabled(rename = "Jira Key")]
  jira_key: String,
  #[tabled(rename = "Repository")]
  repo_url: String,
  #[tabled(rename = "Local Path")]
  local_repo_path: String,
  #[tabled(rename = "Output")]
  output: String,
}

pub(crate) fn handle_projects_command(args: ProjectsArgs) -> Result<()> {
  let catalog = load_catalog(args.projects_file.as_deref())?;

  let rows: Vec<ProjectRow> = catalog
    .projects()
    .iter()
    .map(|project| ProjectRow {
      name: project.name.clone(),
      jira_key: project.jira_key.clone(),
      repo_url: project.repo_url.clone(),
      local_repo_path: project.local_repo_path.display().to_string(),
      output: project.default_output_path().display().to_string(),
    })
    .collect();

  println!("{}", Table::new(rows).with(Style::sharp()));
  Ok(())
}
