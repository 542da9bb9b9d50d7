//! # Jira Search Endpoint
//!
//! Paginated JQL search returning issues with their change history.

use anyhow::{Context, Result};
use reqwest::{StatusCode, header};

use crate::client::JiraClient;
use crate::consts::{SEARCH_EXPAND, SEARCH_FIELDS, USER_AGENT};
use crate::models::{JiraIssue, JiraSearchResponse};

impl JiraClient {
  /// Fetch every issue matching `jql`.
  ///
  /// Pages are requested until `startAt + maxResults` reaches the total the
  /// server reports. Any unsuccessful response aborts the whole fetch.
  pub async fn fetch_issues(&self, jql: &str) -> Result<Vec<JiraIssue>> {
    let mut issues = Vec::new();
    let mut start_at: u64 = 0;
    let page_size = u64::from(self.page_size);

    tracing::info!("Fetching issues from Jira...");
    loop {
      tracing::debug!("Requesting issues {} to {}...", start_at, start_at + page_size);
      let page = self.search_page(jql, start_at).await?;
      issues.extend(page.issues);

      if start_at + page_size >= page.total {
        break;
      }
      start_at += page_size;
    }

    tracing::info!("Total issues fetched: {}", issues.len());
    Ok(issues)
  }

  /// Fetch one page of search results starting at `start_at`
  pub async fn search_page(&self, jql: &str, start_at: u64) -> Result<JiraSearchResponse> {
    let start_at_param = start_at.to_string();
    let max_results_param = self.page_size.to_string();

    let response = self
      .client
      .get(&self.search_url)
      .header(header::USER_AGENT, USER_AGENT)
      .query(&[
        ("jql", jql),
        ("startAt", start_at_param.as_str()),
        ("maxResults", max_results_param.as_str()),
        ("fields", SEARCH_FIELDS),
        ("expand", SEARCH_EXPAND),
      ])
      .send()
      .await
      .context("Failed to search Jira issues")?;

    match response.status() {
      status if status.is_success() => {
        let body = response.text().await.context("Failed to read Jira search response")?;
        serde_json::from_str::<JiraSearchResponse>(&body).context("Failed to parse Jira search response")
      }
      StatusCode::BAD_REQUEST => Err(anyhow::anyhow!(
        "Jira rejected the search query: {}",
        response.text().await.unwrap_or_default()
      )),
      _ => Err(anyhow::anyhow!(
        "Unexpected error: HTTP {} - {}",
        response.status(),
        response.text().await.unwrap_or_default()
      )),
    }
  }
}
