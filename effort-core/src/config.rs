//! # Project Configuration
//!
//! Defines the immutable [`ProjectConfig`] consumed by every stage of the
//! pipeline, the built-in project presets, and loading of user-defined
//! projects from a TOML file in the XDG config directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use directories::ProjectDirs;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DATASET_FILE_SUFFIX, DEFAULT_JIRA_API_URL, PROJECTS_FILE_NAME};

static JIRA_KEY_PATTERN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("Failed to compile Jira key regex"));

/// Errors raised while resolving or loading project configuration
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Unknown project '{name}'. Known projects: {known}")]
  UnknownProject { name: String, known: String },
  #[error("Invalid Jira key '{0}': expected a letter followed by letters, digits or underscores")]
  InvalidJiraKey(String),
  #[error("Failed to read projects file {path}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("Failed to parse projects file {path}")]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },
  #[error("Failed to determine project directories")]
  NoProjectDirs,
}

/// Identity and data sources of one project to mine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
  pub name: String,
  pub jira_key: String,
  pub repo_url: String,
  pub local_repo_path: PathBuf,
  /// Regex matching issue keys of this project inside commit messages
  pub issue_key_pattern: String,
  pub jira_api_url: String,
  pub jira_query: String,
}

impl ProjectConfig {
  /// Create a project config with the default Apache Jira endpoint and a
  /// query selecting done issues not resolved as "Won't Fix".
  pub fn new(name: &str, jira_key: &str, repo_url: &str, local_repo_path: impl Into<PathBuf>) -> Self {
    Self {
      name: name.to_string(),
      jira_key: jira_key.to_string(),
      repo_url: repo_url.to_string(),
      local_repo_path: local_repo_path.into(),
      issue_key_pattern: format!(r"({}-\d+)", regex::escape(jira_key)),
      jira_api_url: DEFAULT_JIRA_API_URL.to_string(),
      jira_query: format!("project={jira_key} AND statusCategory=Done AND resolution != \"Won't Fix\""),
    }
  }

  /// Override the Jira search endpoint
  pub fn with_jira_api_url(mut self, url: &str) -> Self {
    self.jira_api_url = url.to_string();
    self
  }

  /// Override the JQL query
  pub fn with_jira_query(mut self, query: &str) -> Self {
    self.jira_query = query.to_string();
    self
  }

  /// Compile the issue-key pattern.
  pub fn issue_key_regex(&self) -> Result<Regex, regex::Error> {
    Regex::new(&self.issue_key_pattern)
  }

  /// Default dataset location, e.g. `calcite_effort_dataset.csv`.
  pub fn default_output_path(&self) -> PathBuf {
    PathBuf::from(format!("{}{}", self.jira_key.to_lowercase(), DATASET_FILE_SUFFIX))
  }

  /// Whether `name` selects this project (case-insensitive name or Jira key).
  pub fn matches(&self, name: &str) -> bool {
    self.name.eq_ignore_ascii_case(name) || self.jira_key.eq_ignore_ascii_case(name)
  }
}

/// Projects shipped with the tool.
pub fn presets() -> Vec<ProjectConfig> {
  vec![
    ProjectConfig::new(
      "Calcite",
      "CALCITE",
      "https://github.com/apache/calcite.git",
      "./calcite",
    ),
    ProjectConfig::new(
      "Ant Ivy",
      "IVY",
      "https://github.com/apache/ant-ivy.git",
      "./ant-ivy",
    ),
  ]
}

/// A project entry as written in `projects.toml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectDefinition {
  pub name: String,
  pub jira_key: String,
  pub repo_url: String,
  pub local_repo_path: PathBuf,
  #[serde(default)]
  pub jira_api_url: Option<String>,
  #[serde(default)]
  pub jira_query: Option<String>,
}

impl TryFrom<ProjectDefinition> for ProjectConfig {
  type Error = ConfigError;

  fn try_from(def: ProjectDefinition) -> Result<Self, Self::Error> {
    if !JIRA_KEY_PATTERN.is_match(&def.jira_key) {
      return Err(ConfigError::InvalidJiraKey(def.jira_key));
    }

    let mut config = ProjectConfig::new(&def.name, &def.jira_key, &def.repo_url, def.local_repo_path);
    if let Some(url) = def.jira_api_url.as_deref() {
      config = config.with_jira_api_url(url);
    }
    if let Some(query) = def.jira_query.as_deref() {
      config = config.with_jira_query(query);
    }
    Ok(config)
  }
}

#[derive(Debug, Default, Deserialize)]
struct ProjectsFile {
  #[serde(default, rename = "project")]
  projects: Vec<ProjectDefinition>,
}

/// The set of projects a run can select from.
#[derive(Debug, Clone)]
pub struct ProjectCatalog {
  projects: Vec<ProjectConfig>,
}

impl ProjectCatalog {
  /// Catalog containing only the built-in presets
  pub fn builtin() -> Self {
    Self { projects: presets() }
  }

  /// Build a catalog from user-defined projects followed by the presets they
  /// do not shadow.
  pub fn with_user_projects(user: Vec<ProjectConfig>) -> Self {
    let mut projects = user;
    for preset in presets() {
      let shadowed = projects
        .iter()
        .any(|p| p.matches(&preset.name) || p.matches(&preset.jira_key));
      if !shadowed {
        projects.push(preset);
      }
    }
    Self { projects }
  }

  /// Load the catalog, reading user projects from `path` when it exists.
  pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
    let Some(path) = path.filter(|p| p.exists()) else {
      tracing::debug!("No projects file found, using built-in presets");
      return Ok(Self::builtin());
    };

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    let file: ProjectsFile = toml::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })?;

    let user = file
      .projects
      .into_iter()
      .map(ProjectConfig::try_from)
      .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!("Loaded {} project(s) from {}", user.len(), path.display());

    Ok(Self::with_user_projects(user))
  }

  /// Find a project by name or Jira key
  pub fn resolve(&self, name: &str) -> Result<&ProjectConfig, ConfigError> {
    self
      .projects
      .iter()
      .find(|p| p.matches(name))
      .ok_or_else(|| ConfigError::UnknownProject {
        name: name.to_string(),
        known: self
          .projects
          .iter()
          .map(|p| p.jira_key.to_lowercase())
          .collect::<Vec<_>>()
          .join(", "),
      })
  }

  pub fn projects(&self) -> &[ProjectConfig] {
    &self.projects
  }
}

/// Represents the configuration directories for the effort application
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
}

impl ConfigDirs {
  /// Create a new ConfigDirs instance
  pub fn new() -> Result<Self, ConfigError> {
    let proj_dirs = ProjectDirs::from("eddieland", "", "effort").ok_or(ConfigError::NoProjectDirs)?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
    })
  }

  /// Get the config directory
  pub fn config_dir(&self) -> &PathBuf {
    &self.config_dir
  }

  /// Get the path to the user-defined projects file
  pub fn projects_path(&self) -> PathBuf {
    self.config_dir.join(PROJECTS_FILE_NAME)
  }
}

/// Get the configuration directories
pub fn get_config_dirs() -> Result<ConfigDirs, ConfigError> {
  ConfigDirs::new()
}
