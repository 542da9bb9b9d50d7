//! Core constants shared across effort components.

/// Jira search endpoint used when a project does not configure its own.
pub const DEFAULT_JIRA_API_URL: &str = "https://issues.apache.org/jira/rest/api/2/search";

/// Suffix appended to the lower-cased Jira key to form the default dataset
/// file name.
pub const DATASET_FILE_SUFFIX: &str = "_effort_dataset.csv";

/// File name of the user-defined projects file inside the config directory.
pub const PROJECTS_FILE_NAME: &str = "projects.toml";

/// Project selected when none is given on the command line.
pub const DEFAULT_PROJECT: &str = "calcite";
