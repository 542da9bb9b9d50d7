//! # Jira API Client
//!
//! Provides the Jira REST search integration used to pull resolved issues,
//! with their change history, for effort dataset extraction.

mod client;
pub mod consts;
mod endpoints;
pub mod models;

// Re-export the client
pub use client::{JiraClient, create_jira_client};
// Re-export models
pub use models::{
  JiraChangelog, JiraCommentPage, JiraHistory, JiraHistoryItem, JiraIssue, JiraIssueFields, JiraNamed,
  JiraSearchResponse, StatusTransition, parse_jira_timestamp,
};
