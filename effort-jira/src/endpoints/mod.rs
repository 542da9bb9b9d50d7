//! # Jira API Endpoints
//!
//! Endpoint implementations for the Jira resources effort reads.

pub mod search;
