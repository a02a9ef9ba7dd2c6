//! Three-way line merge engine.
//!
//! Merges two independently edited variants ("mine" and "other") of a common
//! base. Unchanged context passes through, non-overlapping edits from either
//! side are both applied, and edits that touch the same region are written
//! out as diff3-style conflict regions.
//!
//! # Key Types
//!
//! - [`ThreeWayMerger`] -- Configured merger; [`merge`] runs one with defaults
//! - [`MergeResult`] -- Merged lines plus conflict indicator
//! - [`MergeConfig`] / [`ConflictMarkers`] -- TOML-loadable settings
//! - [`KeywordPolicy`] -- Optional predicate exempting volatile lines from conflicts

pub mod config;
pub mod error;
pub mod keyword;
pub mod merger;
pub mod result;

pub use config::{ConflictMarkers, MergeConfig};
pub use error::{MergeError, Result};
pub use keyword::KeywordPolicy;
pub use merger::{merge, ThreeWayMerger};
pub use result::MergeResult;

pub use trimerge_diff::{join_lines, split_lines, DiffAlgorithm};
