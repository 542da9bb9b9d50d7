//! # Issue to Commit Mapping
//!
//! Walks the full history of a repository and collects, for every issue key
//! found in a commit message, the commits that reference it together with
//! their diff statistics.

use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};
use git2::{Commit, ErrorCode, Repository, Sort};
use regex::Regex;

use crate::config::ProjectConfig;
use crate::git::repository::open_or_clone;

/// A commit referencing at least one issue, with churn measured against its
/// first parent (or the empty tree for a root commit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
  pub id: String,
  pub message: String,
  pub insertions: usize,
  pub deletions: usize,
  pub files: Vec<String>,
}

impl CommitRecord {
  pub fn files_changed(&self) -> usize {
    self.files.len()
  }
}

/// Commits grouped by the issue key their message references.
///
/// Keys that no commit mentions have no entry at all.
#[derive(Debug, Clone, Default)]
pub struct IssueCommitMap {
  commits: HashMap<String, Vec<CommitRecord>>,
}

impl IssueCommitMap {
  /// Append a commit to the list of `issue_key`
  pub fn push(&mut self, issue_key: impl Into<String>, commit: CommitRecord) {
    self.commits.entry(issue_key.into()).or_default().push(commit);
  }

  /// Commits referencing `issue_key`, in history order (newest first)
  pub fn get(&self, issue_key: &str) -> Option<&[CommitRecord]> {
    self.commits.get(issue_key).map(Vec::as_slice)
  }

  /// Number of issue keys with at least one commit
  pub fn len(&self) -> usize {
    self.commits.len()
  }

  pub fn is_empty(&self) -> bool {
    self.commits.is_empty()
  }
}

/// Scans a repository's history for issue references.
pub struct RepoAnalyzer {
  repo: Repository,
  issue_key_pattern: Regex,
}

impl RepoAnalyzer {
  /// Open the project's local checkout, cloning it first if it is missing.
  pub fn open_or_clone(config: &ProjectConfig) -> Result<Self> {
    let repo = open_or_clone(&config.repo_url, &config.local_repo_path)?;
    let issue_key_pattern = config
      .issue_key_regex()
      .with_context(|| format!("Invalid issue key pattern {}", config.issue_key_pattern))?;

    Ok(Self::new(repo, issue_key_pattern))
  }

  pub fn new(repo: Repository, issue_key_pattern: Regex) -> Self {
    Self {
      repo,
      issue_key_pattern,
    }
  }

  /// Map each of `issue_keys` to the commits whose message mentions it.
  ///
  /// Every commit reachable from HEAD is visited newest first. A commit that
  /// mentions the same key several times is appended once per mention.
  /// Mentions of keys outside `issue_keys` are ignored.
  pub fn map_issues_to_commits<'a, I>(&self, issue_keys: I) -> Result<IssueCommitMap>
  where
    I: IntoIterator<Item = &'a str>,
  {
    let wanted: HashSet<&str> = issue_keys.into_iter().collect();
    let mut map = IssueCommitMap::default();

    tracing::info!("Mapping issues to commits...");

    match self.repo.head() {
      Ok(_) => {}
      Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
        tracing::warn!("Repository has no commits, nothing to map");
        return Ok(map);
      }
      Err(e) => return Err(e).context("Failed to resolve HEAD"),
    }

    let mut revwalk = self.repo.revwalk().context("Failed to create revwalk")?;
    revwalk
      .set_sorting(Sort::TOPOLOGICAL | Sort::TIME)
      .context("Failed to set revwalk sorting")?;
    revwalk.push_head().context("Failed to push HEAD to revwalk")?;

    let mut scanned = 0usize;
    for oid in revwalk {
      let oid = oid.context("Failed to get commit OID")?;
      let commit = self
        .repo
        .find_commit(oid)
        .with_context(|| format!("Failed to find commit {oid}"))?;
      scanned += 1;

      let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();
      let keys: Vec<String> = self
        .issue_key_pattern
        .find_iter(&message)
        .map(|m| m.as_str())
        .filter(|key| wanted.contains(key))
        .map(str::to_string)
        .collect();

      if keys.is_empty() {
        continue;
      }

      tracing::debug!("Commit {} references {:?}", oid, keys);
      let record = self.commit_record(&commit, message)?;
      for key in keys {
        map.push(key, record.clone());
      }
    }

    tracing::debug!("Scanned {} commits", scanned);
    tracing::info!("Issues with commits mapped: {}", map.len());
    Ok(map)
  }

  fn commit_record(&self, commit: &Commit<'_>, message: String) -> Result<CommitRecord> {
    let commit_tree = commit.tree().context("Failed to get commit tree")?;
    let parent_tree = if commit.parent_count() > 0 {
      let parent = commit.parent(0).context("Failed to get parent commit")?;
      Some(parent.tree().context("Failed to get parent tree")?)
    } else {
      None
    };

    let diff = self
      .repo
      .diff_tree_to_tree(parent_tree.as_ref(), Some(&commit_tree), None)
      .with_context(|| format!("Failed to compute diff for {}", commit.id()))?;
    let stats = diff.stats().context("Failed to compute diff stats")?;

    let files = diff
      .deltas()
      .filter_map(|delta| delta.new_file().path().or_else(|| delta.old_file().path()))
      .map(|path| path.to_string_lossy().into_owned())
      .collect();

    Ok(CommitRecord {
      id: commit.id().to_string(),
      message,
      insertions: stats.insertions(),
      deletions: stats.deletions(),
      files,
    })
  }
}
