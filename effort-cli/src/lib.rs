//! # Effort CLI Library
//!
//! The dataset pipeline behind the `effort` binary: feature extraction over
//! issues and their commits, the builder that drives fetch, map, extract and
//! write, and the command-line front end.

pub mod cli;
pub mod dataset;
pub mod features;

pub use dataset::{BuildReport, DatasetBuilder, write_dataset, write_rows};
pub use features::{Dataset, FeatureExtractor, FeatureRow};
