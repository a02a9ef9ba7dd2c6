//! Tagged line diff: base-vs-variant alignment.
//!
//! Uses the `similar` crate to compute the edit script, then flattens it into
//! one entry per line of either input. Within a replaced region every deleted
//! line comes before every inserted line, so two variants that both rewrite
//! the same base lines produce their deletions at the same cursor offset.

use serde::{Deserialize, Serialize};
use similar::{capture_diff_slices, Algorithm, DiffTag};

/// Classification of a line in a tagged sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    /// Present in both base and variant.
    Unchanged,
    /// Present only in the variant.
    Inserted,
    /// Present only in the base.
    Deleted,
}

/// A line of base or variant together with its classification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedLine {
    /// How the variant treats this line.
    pub tag: Tag,
    /// Raw line content, terminator included.
    pub text: String,
    /// Base index of the line for `Unchanged`/`Deleted`. For `Inserted`, the
    /// index of the base line the insertion precedes (the base length when
    /// appended at the end).
    pub base_pos: usize,
}

impl TaggedLine {
    /// Returns `true` if this entry stands for a line of the base.
    pub fn is_base_line(&self) -> bool {
        matches!(self.tag, Tag::Unchanged | Tag::Deleted)
    }

    /// Returns `true` if this entry ends up in the variant.
    pub fn is_variant_line(&self) -> bool {
        matches!(self.tag, Tag::Unchanged | Tag::Inserted)
    }
}

/// Which alignment algorithm computes the edit script.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffAlgorithm {
    /// Myers' O(ND) algorithm.
    #[default]
    Myers,
    /// Patience diff, anchored on lines unique to both sides.
    Patience,
    /// Classic longest common subsequence table.
    Lcs,
}

impl From<DiffAlgorithm> for Algorithm {
    fn from(algorithm: DiffAlgorithm) -> Self {
        match algorithm {
            DiffAlgorithm::Myers => Algorithm::Myers,
            DiffAlgorithm::Patience => Algorithm::Patience,
            DiffAlgorithm::Lcs => Algorithm::Lcs,
        }
    }
}

/// Diff `variant` against `base` with the default (Myers) algorithm.
pub fn diff<B, V>(base: &[B], variant: &[V]) -> Vec<TaggedLine>
where
    B: AsRef<str>,
    V: AsRef<str>,
{
    diff_with(DiffAlgorithm::default(), base, variant)
}

/// Diff `variant` against `base` with the given algorithm.
///
/// The result lists every base line exactly once (as `Unchanged` or
/// `Deleted`) and every variant line exactly once (as `Unchanged` or
/// `Inserted`), in order. An empty base yields only insertions, an empty
/// variant only deletions.
///
/// ```
/// use trimerge_diff::{diff, Tag};
///
/// let tagged = diff(&["a\n", "b\n"], &["a\n", "c\n"]);
/// let tags: Vec<Tag> = tagged.iter().map(|l| l.tag).collect();
/// assert_eq!(tags, vec![Tag::Unchanged, Tag::Deleted, Tag::Inserted]);
/// ```
pub fn diff_with<B, V>(algorithm: DiffAlgorithm, base: &[B], variant: &[V]) -> Vec<TaggedLine>
where
    B: AsRef<str>,
    V: AsRef<str>,
{
    let old: Vec<&str> = base.iter().map(AsRef::as_ref).collect();
    let new: Vec<&str> = variant.iter().map(AsRef::as_ref).collect();

    let mut tagged = Vec::with_capacity(old.len().max(new.len()));
    let line = |tag, text: &str, base_pos| TaggedLine {
        tag,
        text: text.to_owned(),
        base_pos,
    };

    for op in capture_diff_slices(algorithm.into(), &old, &new) {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => {
                for i in old_range {
                    tagged.push(line(Tag::Unchanged, old[i], i));
                }
            }
            DiffTag::Delete => {
                for i in old_range {
                    tagged.push(line(Tag::Deleted, old[i], i));
                }
            }
            DiffTag::Insert => {
                for j in new_range {
                    tagged.push(line(Tag::Inserted, new[j], old_range.start));
                }
            }
            DiffTag::Replace => {
                let insert_at = old_range.end;
                for i in old_range {
                    tagged.push(line(Tag::Deleted, old[i], i));
                }
                for j in new_range {
                    tagged.push(line(Tag::Inserted, new[j], insert_at));
                }
            }
        }
    }

    tagged
}

/// Lines of the base, recovered from a tagged sequence.
pub fn reconstruct_base(tagged: &[TaggedLine]) -> Vec<String> {
    tagged
        .iter()
        .filter(|l| l.is_base_line())
        .map(|l| l.text.clone())
        .collect()
}

/// Lines of the variant, recovered from a tagged sequence.
pub fn reconstruct_variant(tagged: &[TaggedLine]) -> Vec<String> {
    tagged
        .iter()
        .filter(|l| l.is_variant_line())
        .map(|l| l.text.clone())
        .collect()
}

/// Per-tag line counts of a tagged sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub unchanged: usize,
    pub inserted: usize,
    pub deleted: usize,
}

impl DiffStats {
    /// Count the lines of each tag.
    pub fn of(tagged: &[TaggedLine]) -> Self {
        tagged.iter().fold(Self::default(), |mut stats, l| {
            match l.tag {
                Tag::Unchanged => stats.unchanged += 1,
                Tag::Inserted => stats.inserted += 1,
                Tag::Deleted => stats.deleted += 1,
            }
            stats
        })
    }

    /// Returns `true` if base and variant were identical.
    pub fn is_identity(&self) -> bool {
        self.inserted == 0 && self.deleted == 0
    }
}
