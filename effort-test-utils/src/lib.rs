//! Test utilities shared across the effort workspace
//!
//! Provides throwaway git repositories ([`GitRepoTestGuard`]) and helpers for
//! writing commits with known messages and diff statistics.
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod git;

// Re-export commonly used items
pub use git::{GitRepoTestGuard, create_commit, create_commit_with_files};
