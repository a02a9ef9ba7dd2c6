//! Error types for the merge crate.
//!
//! Merging itself never fails; these cover building a merger from
//! configuration.

use std::path::PathBuf;

/// Errors that can occur while configuring a merger.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// The keyword pattern is not a valid regular expression.
    #[error("invalid keyword pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The configuration file could not be read.
    #[error("can't read config {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::MergeConfig`].
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Convenience alias for merge configuration results.
pub type Result<T> = std::result::Result<T, MergeError>;
