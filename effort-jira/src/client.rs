use anyhow::Result;
use reqwest::Client;

use crate::consts::DEFAULT_PAGE_SIZE;

/// Represents a Jira search API client
pub struct JiraClient {
  pub(crate) client: Client,
  pub(crate) search_url: String,
  pub(crate) page_size: u32,
}

impl JiraClient {
  /// Create a new Jira client for the given search endpoint
  pub fn new(search_url: &str) -> Self {
    let client = Client::new();
    Self {
      client,
      search_url: search_url.to_string(),
      page_size: DEFAULT_PAGE_SIZE,
    }
  }

  /// Set the number of issues requested per page
  pub fn with_page_size(mut self, page_size: u32) -> Self {
    self.page_size = page_size.max(1);
    self
  }

  pub fn search_url(&self) -> &str {
    &self.search_url
  }

  pub fn page_size(&self) -> u32 {
    self.page_size
  }
}

/// Create a Jira client, using the default page size unless one is given
pub fn create_jira_client(search_url: &str, page_size: Option<u32>) -> Result<JiraClient> {
  if search_url.trim().is_empty() {
    return Err(anyhow::anyhow!("Jira search URL must not be empty"));
  }

  let client = JiraClient::new(search_url);
  Ok(match page_size {
    Some(size) => client.with_page_size(size),
    None => client,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_jira_client_creation() {
    let client = JiraClient::new("https://issues.example.org/rest/api/2/search");

    assert_eq!(client.search_url(), "https://issues.example.org/rest/api/2/search");
    assert_eq!(client.page_size(), DEFAULT_PAGE_SIZE);
  }

  #[test]
  fn test_page_size_is_at_least_one() {
    let client = JiraClient::new("https://issues.example.org/rest/api/2/search").with_page_size(0);

    assert_eq!(client.page_size(), 1);
  }

  #[test]
  fn test_create_jira_client() {
    let client = create_jira_client("https://issues.example.org/rest/api/2/search", Some(250)).unwrap();
    assert_eq!(client.page_size(), 250);

    assert!(create_jira_client("  ", None).is_err());
  }
}
