//! # Effort Core Library
//!
//! Core building blocks for the effort dataset pipeline: project
//! configuration, the repository analyzer that maps issue keys to the commits
//! referencing them, and the terminal output helpers shared by the CLI.

pub mod config;
pub mod consts;
pub mod git;
pub mod output;

// Re-export main types
pub use config::{ConfigDirs, ConfigError, ProjectCatalog, ProjectConfig, ProjectDefinition, get_config_dirs};
pub use git::{CommitRecord, IssueCommitMap, RepoAnalyzer};
pub use output::{ColorMode, print_header, print_info, print_success, print_warning};
