//! Merge configuration.
//!
//! [`MergeConfig`] is plain serde data, read from TOML by the CLI and turned
//! into a [`crate::ThreeWayMerger`] with `from_config`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use trimerge_diff::DiffAlgorithm;

use crate::error::{MergeError, Result};

/// Configuration for a [`crate::ThreeWayMerger`].
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```toml
/// algorithm = "patience"
/// svn_keywords = true
///
/// [markers]
/// start = "<<<<<<< mine\n"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Alignment algorithm used for both base-vs-variant diffs.
    pub algorithm: DiffAlgorithm,
    /// Regular expression marking volatile keyword lines.
    pub keyword_pattern: Option<String>,
    /// Treat `// $Keyword$` comment lines as volatile. Ignored when
    /// `keyword_pattern` is set.
    pub svn_keywords: bool,
    /// Literal lines framing a conflict region.
    pub markers: ConflictMarkers,
}

impl MergeConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| MergeError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

/// Marker lines written around a conflict region, terminators included.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConflictMarkers {
    /// Opens the region; mine's lines follow.
    pub start: String,
    /// Separates mine's lines from other's.
    pub separator: String,
    /// Closes the region.
    pub end: String,
}

impl Default for ConflictMarkers {
    fn default() -> Self {
        Self::labeled("A", "B")
    }
}

impl ConflictMarkers {
    /// diff3-style markers naming both sides, like `diff3 -L`.
    pub fn labeled(mine: &str, other: &str) -> Self {
        Self {
            start: format!("<<<<<<< {mine}\n"),
            separator: "=======\n".into(),
            end: format!(">>>>>>> {other}\n"),
        }
    }
}
