//! Git utility modules for locating repositories and mining their history.

pub mod commits;
pub mod repository;

pub use commits::{CommitRecord, IssueCommitMap, RepoAnalyzer};
pub use repository::open_or_clone;
