//! # Dataset Builder
//!
//! Drives the pipeline for one project: fetch issues from Jira, map them to
//! commits in the local checkout, extract features and write the CSV file.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use effort_core::{ProjectConfig, RepoAnalyzer};
use effort_jira::{JiraClient, create_jira_client};
use tokio::runtime::Runtime;

use crate::features::{Dataset, FEATURE_COLUMNS, FeatureExtractor, FeatureRow};

/// Outcome of a completed build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
  pub output_path: PathBuf,
  pub rows_written: usize,
  pub skipped_no_commits: usize,
}

/// Builds and saves the effort dataset of one project.
pub struct DatasetBuilder {
  config: ProjectConfig,
  jira_client: JiraClient,
  repo_analyzer: RepoAnalyzer,
}

impl DatasetBuilder {
  /// Prepare the Jira client and open (or clone) the project repository.
  pub fn new(config: ProjectConfig, page_size: Option<u32>) -> Result<Self> {
    let jira_client = create_jira_client(&config.jira_api_url, page_size).context("Failed to create Jira client")?;
    let repo_analyzer = RepoAnalyzer::open_or_clone(&config)?;

    Ok(Self {
      config,
      jira_client,
      repo_analyzer,
    })
  }

  /// Run fetch, map and extract without writing anything.
  pub fn build(&self) -> Result<Dataset> {
    let rt = Runtime::new().context("Failed to create async runtime")?;
    let issues = rt.block_on(self.jira_client.fetch_issues(&self.config.jira_query))?;

    let issue_commit_map = self
      .repo_analyzer
      .map_issues_to_commits(issues.iter().map(|issue| issue.key.as_str()))?;

    Ok(FeatureExtractor::new(&issues, &issue_commit_map).extract())
  }

  /// Build the dataset and write it to `output`, or to the project's default
  /// path, replacing any existing file.
  pub fn build_and_save(&self, output: Option<&Path>) -> Result<BuildReport> {
    tracing::info!("Building dataset for {}", self.config.name);

    let dataset = self.build()?;
    let output_path = output.map_or_else(|| self.config.default_output_path(), Path::to_path_buf);
    write_dataset(&output_path, &dataset.rows)?;
    tracing::info!("Dataset saved to {}", output_path.display());

    Ok(BuildReport {
      output_path,
      rows_written: dataset.rows.len(),
      skipped_no_commits: dataset.skipped_no_commits,
    })
  }
}

/// Write `rows` as CSV to the file at `path`
pub fn write_dataset(path: &Path, rows: &[FeatureRow]) -> Result<()> {
  let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
  write_rows(file, rows).with_context(|| format!("Failed to write dataset to {}", path.display()))
}

/// Write a header row and then one record per row.
///
/// The header is always present, even for an empty dataset.
pub fn write_rows<W: io::Write>(writer: W, rows: &[FeatureRow]) -> Result<()> {
  let mut csv_writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

  csv_writer
    .write_record(FEATURE_COLUMNS)
    .context("Failed to write header")?;
  for row in rows {
    csv_writer
      .serialize(row)
      .with_context(|| format!("Failed to write row for {}", row.issue_id))?;
  }
  csv_writer.flush().context("Failed to flush dataset")?;

  Ok(())
}
