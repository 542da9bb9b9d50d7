//! # Feature Extraction
//!
//! Joins fetched issues with the commits that reference them and derives one
//! row of duration and churn metrics per issue.

use chrono::{DateTime, FixedOffset};
use effort_core::{CommitRecord, IssueCommitMap};
use effort_jira::{JiraIssue, StatusTransition};
use serde::Serialize;

/// Target status that starts the in-progress clock
pub const IN_PROGRESS_STATUS: &str = "in progress";

/// Target statuses that stop the in-progress clock
pub const TERMINAL_STATUSES: [&str; 4] = ["done", "resolved", "closed", "fixed"];

/// Column order of the written dataset
pub const FEATURE_COLUMNS: [&str; 12] = [
  "issue_id",
  "issue_type",
  "priority",
  "description_length",
  "num_comments",
  "time_to_resolve_hours",
  "time_in_progress_hours",
  "lines_added",
  "lines_deleted",
  "lines_updated_est",
  "total_files_changed",
  "num_commits",
];

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Metrics for one issue with at least one referencing commit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
  pub issue_id: String,
  pub issue_type: String,
  /// Empty when the tracker reports no priority
  pub priority: String,
  pub description_length: usize,
  pub num_comments: u64,
  pub time_to_resolve_hours: Option<f64>,
  pub time_in_progress_hours: Option<f64>,
  pub lines_added: usize,
  pub lines_deleted: usize,
  /// `min(lines_added, lines_deleted)`, an estimate of modified lines rather
  /// than a measured diff quantity
  pub lines_updated_est: usize,
  /// Sum of per-commit file counts; a file touched by several commits counts
  /// once per commit
  pub total_files_changed: usize,
  pub num_commits: usize,
}

/// Extracted rows in tracker order, plus how many issues had no commits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
  pub rows: Vec<FeatureRow>,
  pub skipped_no_commits: usize,
}

/// Computes a [`Dataset`] from issues and their mapped commits.
pub struct FeatureExtractor<'a> {
  issues: &'a [JiraIssue],
  issue_commit_map: &'a IssueCommitMap,
}

impl<'a> FeatureExtractor<'a> {
  pub fn new(issues: &'a [JiraIssue], issue_commit_map: &'a IssueCommitMap) -> Self {
    Self {
      issues,
      issue_commit_map,
    }
  }

  /// Build one row per issue that has mapped commits, skipping the rest.
  pub fn extract(&self) -> Dataset {
    tracing::info!("Extracting features from issues...");
    let mut dataset = Dataset::default();

    for issue in self.issues {
      match self.issue_commit_map.get(&issue.key) {
        Some(commits) if !commits.is_empty() => dataset.rows.push(feature_row(issue, commits)),
        _ => {
          tracing::debug!("Skipping {}: no commits reference it", issue.key);
          dataset.skipped_no_commits += 1;
        }
      }
    }

    tracing::info!("Issues included in dataset: {}", dataset.rows.len());
    tracing::info!("Issues skipped (no commits): {}", dataset.skipped_no_commits);
    dataset
  }
}

fn feature_row(issue: &JiraIssue, commits: &[CommitRecord]) -> FeatureRow {
  let fields = &issue.fields;

  let time_to_resolve_hours = fields
    .resolution_date
    .map(|resolved| hours_between(fields.created, resolved));

  let lines_added: usize = commits.iter().map(|c| c.insertions).sum();
  let lines_deleted: usize = commits.iter().map(|c| c.deletions).sum();

  FeatureRow {
    issue_id: issue.key.clone(),
    issue_type: fields.issue_type.name.clone(),
    priority: issue.priority_name().unwrap_or_default().to_string(),
    description_length: fields.description.as_deref().map_or(0, |d| d.chars().count()),
    num_comments: issue.comment_count(),
    time_to_resolve_hours,
    time_in_progress_hours: time_in_progress_hours(&issue.status_transitions()),
    lines_added,
    lines_deleted,
    lines_updated_est: lines_added.min(lines_deleted),
    total_files_changed: commits.iter().map(CommitRecord::files_changed).sum(),
    num_commits: commits.len(),
  }
}

/// Hours from the first move to "In Progress" until the first terminal status
/// after it. `None` unless both transitions exist.
pub fn time_in_progress_hours(transitions: &[StatusTransition]) -> Option<f64> {
  let mut started: Option<DateTime<FixedOffset>> = None;

  for transition in transitions {
    let status = transition.to_status.to_lowercase();
    match started {
      None if status == IN_PROGRESS_STATUS => started = Some(transition.at),
      Some(start) if TERMINAL_STATUSES.contains(&status.as_str()) => {
        return Some(hours_between(start, transition.at));
      }
      _ => {}
    }
  }

  None
}

fn hours_between(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> f64 {
  (end - start).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

#[cfg(test)]
mod tests {
  use effort_jira::parse_jira_timestamp;
  use serde_json::{Value, json};
  use test_case::test_case;

  use super::*;

  fn issue(key: &str, fields: Value, histories: Value) -> JiraIssue {
    serde_json::from_value(json!({
        "key": key,
        "fields": fields,
        "changelog": { "histories": histories }
    }))
    .unwrap()
  }

  fn basic_fields() -> Value {
    json!({
        "issuetype": { "name": "Bug" },
        "priority": { "name": "Major" },
        "created": "2021-01-01T00:00:00.000+0000",
        "resolutiondate": "2021-01-01T10:00:00.000+0000",
        "description": null,
        "comment": { "total": 0 }
    })
  }

  fn commit(id: &str, insertions: usize, deletions: usize, files: &[&str]) -> CommitRecord {
    CommitRecord {
      id: id.to_string(),
      message: format!("commit {id}"),
      insertions,
      deletions,
      files: files.iter().map(|f| f.to_string()).collect(),
    }
  }

  fn transition(at: &str, to_status: &str) -> StatusTransition {
    StatusTransition {
      at: parse_jira_timestamp(at).unwrap(),
      to_status: to_status.to_string(),
    }
  }

  #[test]
  fn test_single_commit_example_row() {
    let issues = vec![issue("PROJ-1", basic_fields(), json!([]))];
    let mut map = IssueCommitMap::default();
    map.push("PROJ-1", commit("a1", 5, 3, &["src/a.rs", "src/b.rs"]));

    let dataset = FeatureExtractor::new(&issues, &map).extract();

    assert_eq!(
      dataset.rows,
      vec![FeatureRow {
        issue_id: "PROJ-1".to_string(),
        issue_type: "Bug".to_string(),
        priority: "Major".to_string(),
        description_length: 0,
        num_comments: 0,
        time_to_resolve_hours: Some(10.0),
        time_in_progress_hours: None,
        lines_added: 5,
        lines_deleted: 3,
        lines_updated_est: 3,
        total_files_changed: 2,
        num_commits: 1,
      }]
    );
    assert_eq!(dataset.skipped_no_commits, 0);
  }

  #[test]
  fn test_issues_without_commits_are_skipped_and_counted() {
    let issues = vec![
      issue("PROJ-1", basic_fields(), json!([])),
      issue("PROJ-2", basic_fields(), json!([])),
      issue("PROJ-3", basic_fields(), json!([])),
    ];
    let mut map = IssueCommitMap::default();
    map.push("PROJ-2", commit("b2", 1, 1, &["x"]));

    let dataset = FeatureExtractor::new(&issues, &map).extract();

    assert_eq!(dataset.rows.len(), 1);
    assert_eq!(dataset.rows[0].issue_id, "PROJ-2");
    assert_eq!(dataset.skipped_no_commits, 2);
    assert_eq!(dataset.rows.len() + dataset.skipped_no_commits, issues.len());
  }

  #[test]
  fn test_rows_keep_tracker_order() {
    let issues = vec![
      issue("PROJ-9", basic_fields(), json!([])),
      issue("PROJ-4", basic_fields(), json!([])),
    ];
    let mut map = IssueCommitMap::default();
    map.push("PROJ-4", commit("c1", 1, 0, &["x"]));
    map.push("PROJ-9", commit("c2", 1, 0, &["y"]));

    let dataset = FeatureExtractor::new(&issues, &map).extract();

    let ids: Vec<&str> = dataset.rows.iter().map(|r| r.issue_id.as_str()).collect();
    assert_eq!(ids, vec!["PROJ-9", "PROJ-4"]);
  }

  #[test]
  fn test_churn_sums_across_commits_without_file_dedup() {
    let issues = vec![issue("PROJ-1", basic_fields(), json!([]))];
    let mut map = IssueCommitMap::default();
    map.push("PROJ-1", commit("a", 10, 0, &["a.rs", "b.rs"]));
    map.push("PROJ-1", commit("b", 0, 4, &["a.rs"]));
    map.push("PROJ-1", commit("c", 2, 7, &["a.rs", "c.rs"]));

    let dataset = FeatureExtractor::new(&issues, &map).extract();
    let row = &dataset.rows[0];

    assert_eq!(row.lines_added, 12);
    assert_eq!(row.lines_deleted, 11);
    assert_eq!(row.lines_updated_est, 11);
    assert_eq!(row.total_files_changed, 5);
    assert_eq!(row.num_commits, 3);
  }

  #[test_case(0, 0, 0 ; "both zero")]
  #[test_case(0, 9, 0 ; "no additions")]
  #[test_case(9, 0, 0 ; "no deletions")]
  #[test_case(4, 4, 4 ; "equal")]
  #[test_case(3, 8, 3 ; "more deleted")]
  fn test_lines_updated_is_min_of_added_and_deleted(added: usize, deleted: usize, expected: usize) {
    let issues = vec![issue("PROJ-1", basic_fields(), json!([]))];
    let mut map = IssueCommitMap::default();
    map.push("PROJ-1", commit("a", added, deleted, &["a.rs"]));

    let dataset = FeatureExtractor::new(&issues, &map).extract();
    let row = &dataset.rows[0];

    assert_eq!(row.lines_updated_est, expected);
  }

  #[test]
  fn test_optional_issue_fields() {
    let fields = json!({
        "issuetype": { "name": "Task" },
        "priority": null,
        "created": "2021-01-01T00:00:00.000+0000",
        "resolutiondate": null,
        "description": "naïve café",
        "comment": { "total": 7 }
    });
    let issues = vec![issue("PROJ-1", fields, json!([]))];
    let mut map = IssueCommitMap::default();
    map.push("PROJ-1", commit("a", 1, 1, &["a.rs"]));

    let dataset = FeatureExtractor::new(&issues, &map).extract();
    let row = &dataset.rows[0];

    assert_eq!(row.time_to_resolve_hours, None);
    assert_eq!(row.priority, "");
    assert_eq!(row.description_length, 10);
    assert_eq!(row.num_comments, 7);
  }

  #[test]
  fn test_time_to_resolve_handles_offsets_and_fractions() {
    let fields = json!({
        "issuetype": { "name": "Bug" },
        "created": "2021-01-01T00:00:00.000+0200",
        "resolutiondate": "2021-01-01T00:30:00.000+0000"
    });
    let issues = vec![issue("PROJ-1", fields, json!([]))];
    let mut map = IssueCommitMap::default();
    map.push("PROJ-1", commit("a", 1, 1, &["a.rs"]));

    let dataset = FeatureExtractor::new(&issues, &map).extract();
    let row = &dataset.rows[0];

    assert_eq!(row.time_to_resolve_hours, Some(2.5));
  }

  #[test]
  fn test_in_progress_uses_first_start_and_first_terminal_after_it() {
    let transitions = vec![
      transition("2021-01-01T00:00:00.000+0000", "Open"),
      transition("2021-01-01T01:00:00.000+0000", "In Progress"),
      transition("2021-01-01T02:00:00.000+0000", "In Progress"),
      transition("2021-01-01T05:00:00.000+0000", "Resolved"),
      transition("2021-01-01T06:00:00.000+0000", "In Progress"),
      transition("2021-01-01T09:00:00.000+0000", "Closed"),
    ];

    assert_eq!(time_in_progress_hours(&transitions), Some(4.0));
  }

  #[test]
  fn test_terminal_before_in_progress_is_ignored() {
    let transitions = vec![
      transition("2021-01-01T00:00:00.000+0000", "Resolved"),
      transition("2021-01-01T01:00:00.000+0000", "in progress"),
      transition("2021-01-01T03:00:00.000+0000", "DONE"),
    ];

    assert_eq!(time_in_progress_hours(&transitions), Some(2.0));
  }

  #[test_case("Done" ; "done")]
  #[test_case("Resolved" ; "resolved")]
  #[test_case("Closed" ; "closed")]
  #[test_case("fixed" ; "fixed")]
  fn test_terminal_statuses_stop_the_clock(status: &str) {
    let transitions = vec![
      transition("2021-01-01T00:00:00.000+0000", "In Progress"),
      transition("2021-01-01T01:30:00.000+0000", status),
    ];

    assert_eq!(time_in_progress_hours(&transitions), Some(1.5));
  }

  #[test_case(&[] ; "no history")]
  #[test_case(&["Open", "Resolved"] ; "never started")]
  #[test_case(&["In Progress", "In Review"] ; "never finished")]
  fn test_in_progress_absent_without_pair(statuses: &[&str]) {
    let transitions: Vec<StatusTransition> = statuses
      .iter()
      .enumerate()
      .map(|(hour, status)| transition(&format!("2021-01-01T0{hour}:00:00.000+0000"), status))
      .collect();

    assert_eq!(time_in_progress_hours(&transitions), None);
  }

  #[test]
  fn test_in_progress_from_issue_changelog() {
    let histories = json!([
        {
            "created": "2021-01-01T01:00:00.000+0000",
            "items": [{ "field": "status", "toString": "In Progress" }]
        },
        {
            "created": "2021-01-01T07:00:00.000+0000",
            "items": [
                { "field": "resolution", "toString": "Fixed" },
                { "field": "status", "toString": "Resolved" }
            ]
        }
    ]);
    let issues = vec![issue("PROJ-1", basic_fields(), histories)];
    let mut map = IssueCommitMap::default();
    map.push("PROJ-1", commit("a", 1, 1, &["a.rs"]));

    let dataset = FeatureExtractor::new(&issues, &map).extract();
    let row = &dataset.rows[0];

    assert_eq!(row.time_in_progress_hours, Some(6.0));
  }
}
