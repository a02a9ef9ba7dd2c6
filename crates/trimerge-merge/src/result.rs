//! The value a merge returns.

use serde::{Deserialize, Serialize};
use trimerge_diff::join_lines;

/// Outcome of a three-way merge.
///
/// Conflicting regions are embedded in `lines` as literal marker lines; the
/// caller decides whether to write them out or abort.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeResult {
    /// Merged output, terminators preserved.
    pub lines: Vec<String>,
    /// Whether at least one conflict region was emitted.
    pub has_conflict: bool,
    /// Number of conflict regions in `lines`.
    pub conflicts: usize,
}

impl MergeResult {
    /// Returns `true` if the merge resolved without conflicts.
    pub fn is_clean(&self) -> bool {
        !self.has_conflict
    }

    /// The merged lines as one string.
    pub fn text(&self) -> String {
        join_lines(&self.lines)
    }
}
