//! Git repository management for testing
//!
//! Temporary repositories live for as long as their guard and are removed
//! from disk when it is dropped.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use git2::{Repository, Signature};
use tempfile::TempDir;

/// A temporary git repository with a configured test identity
pub struct GitRepoTestGuard {
  /// The temporary directory containing the git repository
  pub temp_dir: TempDir,
  /// The git repository
  pub repo: Repository,
}

impl GitRepoTestGuard {
  /// Create a new, empty test git repository
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let repo = Repository::init(temp_dir.path()).expect("Failed to initialize git repository");

    let mut config = repo.config().expect("Failed to get repository config");
    config
      .set_str("user.name", "Effort Test User")
      .expect("Failed to set user.name");
    config
      .set_str("user.email", "effort-test@example.com")
      .expect("Failed to set user.email");

    Self { temp_dir, repo }
  }

  /// Get the path to the git repository
  pub fn path(&self) -> &Path {
    self.temp_dir.path()
  }
}

impl Default for GitRepoTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

/// Write a single file and commit it on HEAD
pub fn create_commit(repo: &Repository, file_name: &str, content: &str, message: &str) -> Result<()> {
  create_commit_with_files(repo, &[(file_name, content)], message)
}

/// Write every `(path, content)` pair and commit them together on HEAD
pub fn create_commit_with_files(repo: &Repository, files: &[(&str, &str)], message: &str) -> Result<()> {
  let repo_path = repo.workdir().context("Repository has no working directory")?;

  let mut index = repo.index()?;
  for (file_name, content) in files {
    let file_path = repo_path.join(file_name);
    if let Some(parent) = file_path.parent() {
      fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    index.add_path(Path::new(file_name))?;
  }
  index.write()?;

  let tree_id = index.write_tree()?;
  let tree = repo.find_tree(tree_id)?;
  let signature = Signature::now("Test User", "test@example.com")?;

  let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
  let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
  repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;

  Ok(())
}
