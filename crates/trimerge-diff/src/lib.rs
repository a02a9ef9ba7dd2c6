//! Line differ for trimerge.
//!
//! Aligns a variant against its base line by line and labels every line of
//! both as unchanged, inserted, or deleted. The three-way merger consumes two
//! of these tagged sequences in lockstep.
//!
//! # Key Types
//!
//! - [`TaggedLine`] / [`Tag`] -- One line of either input with its classification
//! - [`DiffAlgorithm`] -- Alignment algorithm selector (Myers, Patience, LCS)
//! - [`DiffStats`] -- Per-tag line counts of a tagged sequence

pub mod line;
pub mod line_diff;

pub use line::{join_lines, split_lines, Line};
pub use line_diff::{
    diff, diff_with, reconstruct_base, reconstruct_variant, DiffAlgorithm, DiffStats, Tag,
    TaggedLine,
};
