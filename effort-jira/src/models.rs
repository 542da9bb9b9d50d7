use chrono::{DateTime, FixedOffset};
use serde::de::{self, Deserializer};
use serde::Deserialize;

use crate::consts::JIRA_TIMESTAMP_FORMAT;

/// One page of results from the search endpoint
#[derive(Debug, Deserialize)]
pub struct JiraSearchResponse {
  #[serde(rename = "startAt", default)]
  pub start_at: u64,
  #[serde(rename = "maxResults", default)]
  pub max_results: u64,
  pub total: u64,
  pub issues: Vec<JiraIssue>,
}

/// Represents a Jira issue
#[derive(Debug, Clone, Deserialize)]
pub struct JiraIssue {
  pub key: String,
  pub fields: JiraIssueFields,
  #[serde(default)]
  pub changelog: Option<JiraChangelog>,
}

/// Represents the Jira issue fields requested by a search
#[derive(Debug, Clone, Deserialize)]
pub struct JiraIssueFields {
  #[serde(rename = "issuetype")]
  pub issue_type: JiraNamed,
  #[serde(default)]
  pub priority: Option<JiraNamed>,
  #[serde(deserialize_with = "deserialize_timestamp")]
  pub created: DateTime<FixedOffset>,
  #[serde(rename = "resolutiondate", default, deserialize_with = "deserialize_optional_timestamp")]
  pub resolution_date: Option<DateTime<FixedOffset>>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub comment: Option<JiraCommentPage>,
}

/// Any Jira object identified by its display name (issue type, priority)
#[derive(Debug, Clone, Deserialize)]
pub struct JiraNamed {
  pub name: String,
}

/// Summary of an issue's comments
#[derive(Debug, Clone, Deserialize)]
pub struct JiraCommentPage {
  #[serde(default)]
  pub total: u64,
}

/// The change history of an issue
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JiraChangelog {
  #[serde(default)]
  pub histories: Vec<JiraHistory>,
}

/// A group of field changes made at one instant
#[derive(Debug, Clone, Deserialize)]
pub struct JiraHistory {
  #[serde(deserialize_with = "deserialize_timestamp")]
  pub created: DateTime<FixedOffset>,
  #[serde(default)]
  pub items: Vec<JiraHistoryItem>,
}

/// A single field change
#[derive(Debug, Clone, Deserialize)]
pub struct JiraHistoryItem {
  pub field: String,
  #[serde(rename = "toString", default)]
  pub to_value: Option<String>,
}

/// A change of an issue's status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransition {
  pub at: DateTime<FixedOffset>,
  pub to_status: String,
}

impl JiraIssue {
  /// Status changes in the order the changelog lists them
  pub fn status_transitions(&self) -> Vec<StatusTransition> {
    let Some(changelog) = &self.changelog else {
      return Vec::new();
    };

    changelog
      .histories
      .iter()
      .flat_map(|history| {
        history
          .items
          .iter()
          .filter(|item| item.field == "status")
          .filter_map(|item| {
            item.to_value.as_ref().map(|status| StatusTransition {
              at: history.created,
              to_status: status.clone(),
            })
          })
      })
      .collect()
  }

  pub fn priority_name(&self) -> Option<&str> {
    self.fields.priority.as_ref().map(|p| p.name.as_str())
  }

  pub fn comment_count(&self) -> u64 {
    self.fields.comment.as_ref().map_or(0, |c| c.total)
  }
}

/// Parse a timestamp in Jira's REST format
pub fn parse_jira_timestamp(value: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
  DateTime::parse_from_str(value, JIRA_TIMESTAMP_FORMAT)
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
  D: Deserializer<'de>,
{
  let raw = String::deserialize(deserializer)?;
  parse_jira_timestamp(&raw).map_err(|e| de::Error::custom(format!("invalid Jira timestamp '{raw}': {e}")))
}

fn deserialize_optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
  D: Deserializer<'de>,
{
  Option::<String>::deserialize(deserializer)?
    .map(|raw| {
      parse_jira_timestamp(&raw).map_err(|e| de::Error::custom(format!("invalid Jira timestamp '{raw}': {e}")))
    })
    .transpose()
}
