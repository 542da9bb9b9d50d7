//! Helpers for obtaining a local checkout of a project repository.

use std::path::Path;

use anyhow::{Context, Result};
use git2::Repository;

/// Open the repository at `local_path`, cloning it from `repo_url` first when
/// nothing exists at that path.
///
/// A failed clone may leave a partial directory behind; it is not removed.
pub fn open_or_clone(repo_url: &str, local_path: &Path) -> Result<Repository> {
  if local_path.exists() {
    tracing::info!("Using existing local repo at {}", local_path.display());
    return Repository::open(local_path)
      .with_context(|| format!("Failed to open git repository at {}", local_path.display()));
  }

  tracing::info!("Cloning {} into {}", repo_url, local_path.display());
  Repository::clone(repo_url, local_path)
    .with_context(|| format!("Failed to clone {} into {}", repo_url, local_path.display()))
}
