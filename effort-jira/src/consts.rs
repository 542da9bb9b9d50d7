//! Constants for the effort-jira client.

/// User-Agent header value for the Jira API client
pub const USER_AGENT: &str = concat!("effort/", env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Number of issues requested per search page
pub const DEFAULT_PAGE_SIZE: u32 = 1000;

/// Issue fields requested from the search endpoint
pub const SEARCH_FIELDS: &str = "key,summary,issuetype,priority,created,resolutiondate,description,comment";

/// Expansion that includes each issue's change history
pub const SEARCH_EXPAND: &str = "changelog";

/// Timestamp layout used by the Jira REST API, e.g. `2019-01-02T10:11:12.000+0000`
pub const JIRA_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";
