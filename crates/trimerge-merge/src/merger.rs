//! The synchronized-cursor merge walk.
//!
//! Both variants are diffed against the base, then the two tagged sequences
//! are walked with one cursor each. Every step consumes at least one entry,
//! and both cursors always sit at the same base position between steps: a
//! base line is consumed from both sides at once, insertions never move the
//! base position, and a conflict region runs until the sides meet again on
//! common context.

use trimerge_diff::{diff_with, DiffAlgorithm, Tag, TaggedLine};

use crate::config::{ConflictMarkers, MergeConfig};
use crate::error::Result;
use crate::keyword::KeywordPolicy;
use crate::result::MergeResult;

/// Merge `mine` and `other` against `base` with the default configuration.
///
/// ```
/// use trimerge_merge::merge;
///
/// let result = merge(&["a\n", "b\n"], &["a\n", "x\n", "b\n"], &["a\n", "b\n", "y\n"]);
/// assert!(result.is_clean());
/// assert_eq!(result.text(), "a\nx\nb\ny\n");
/// ```
pub fn merge<B, M, O>(base: &[B], mine: &[M], other: &[O]) -> MergeResult
where
    B: AsRef<str>,
    M: AsRef<str>,
    O: AsRef<str>,
{
    ThreeWayMerger::default().merge(base, mine, other)
}

/// A configured three-way merger.
///
/// Holds no per-merge state, so a single instance can serve any number of
/// merges, including from several threads at once.
#[derive(Clone, Debug, Default)]
pub struct ThreeWayMerger {
    algorithm: DiffAlgorithm,
    keywords: Option<KeywordPolicy>,
    markers: ConflictMarkers,
}

impl ThreeWayMerger {
    /// A merger with Myers alignment, standard markers and no keyword policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a merger from configuration, compiling its keyword pattern.
    pub fn from_config(config: &MergeConfig) -> Result<Self> {
        let keywords = match (&config.keyword_pattern, config.svn_keywords) {
            (Some(pattern), _) => Some(KeywordPolicy::pattern(pattern)?),
            (None, true) => Some(KeywordPolicy::svn_keywords()),
            (None, false) => None,
        };
        Ok(Self {
            algorithm: config.algorithm,
            keywords,
            markers: config.markers.clone(),
        })
    }

    pub fn with_algorithm(mut self, algorithm: DiffAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Exempt lines accepted by `policy` from conflict detection.
    pub fn with_keyword_policy(mut self, policy: KeywordPolicy) -> Self {
        self.keywords = Some(policy);
        self
    }

    pub fn with_markers(mut self, markers: ConflictMarkers) -> Self {
        self.markers = markers;
        self
    }

    pub fn algorithm(&self) -> DiffAlgorithm {
        self.algorithm
    }

    pub fn keyword_policy(&self) -> Option<&KeywordPolicy> {
        self.keywords.as_ref()
    }

    /// Merge `mine` and `other`, both derived from `base`.
    ///
    /// Never fails: disagreements are written into the output as conflict
    /// regions and reported through [`MergeResult::has_conflict`].
    pub fn merge<B, M, O>(&self, base: &[B], mine: &[M], other: &[O]) -> MergeResult
    where
        B: AsRef<str>,
        M: AsRef<str>,
        O: AsRef<str>,
    {
        let ours = diff_with(self.algorithm, base, mine);
        let theirs = diff_with(self.algorithm, base, other);

        let mut walk = Walk {
            merger: self,
            mine: Cursor::new(&ours),
            other: Cursor::new(&theirs),
            out: Vec::with_capacity(ours.len().max(theirs.len())),
            conflicts: 0,
            overlap: false,
        };
        walk.run();

        tracing::trace!(
            base = base.len(),
            mine = mine.len(),
            other = other.len(),
            merged = walk.out.len(),
            conflicts = walk.conflicts,
            "merge finished"
        );

        MergeResult {
            lines: walk.out,
            has_conflict: walk.conflicts > 0,
            conflicts: walk.conflicts,
        }
    }

    fn both_volatile(&self, a: &str, b: &str) -> bool {
        self.keywords
            .as_ref()
            .is_some_and(|policy| policy.is_volatile(a) && policy.is_volatile(b))
    }
}

struct Cursor<'a> {
    lines: &'a [TaggedLine],
    next: usize,
}

impl<'a> Cursor<'a> {
    fn new(lines: &'a [TaggedLine]) -> Self {
        Self { lines, next: 0 }
    }

    fn peek(&self) -> Option<&'a TaggedLine> {
        self.lines.get(self.next)
    }

    fn bump(&mut self) -> Option<&'a TaggedLine> {
        let line = self.peek();
        if line.is_some() {
            self.next += 1;
        }
        line
    }
}

fn is(line: Option<&TaggedLine>, tag: Tag) -> bool {
    line.is_some_and(|l| l.tag == tag)
}

/// Markers must start a physical line, so an unterminated line right before
/// one gets a `\n`.
fn terminate_last(out: &mut [String]) {
    if let Some(last) = out.last_mut() {
        if !last.ends_with('\n') {
            last.push('\n');
        }
    }
}

struct Walk<'m, 'a> {
    merger: &'m ThreeWayMerger,
    mine: Cursor<'a>,
    other: Cursor<'a>,
    out: Vec<String>,
    conflicts: usize,
    /// Both sides deleted the same base line and have not yet met again on
    /// common context or a matching insertion. One-sided insertions in that
    /// span conflict.
    overlap: bool,
}

impl Walk<'_, '_> {
    fn run(&mut self) {
        loop {
            let (a, b) = (self.mine.peek(), self.other.peek());
            match (a, b) {
                (None, None) => break,

                // Common context, or the same line inserted by both sides.
                (Some(x), Some(y))
                    if x.tag == y.tag
                        && (x.tag == Tag::Unchanged
                            || (x.tag == Tag::Inserted && x.text == y.text)) =>
                {
                    // Matching insertions settle an overlapping rewrite
                    // just as common context does.
                    self.overlap = false;
                    self.out.push(x.text.clone());
                    self.mine.bump();
                    self.other.bump();
                }

                // A base line at least one side deleted.
                (Some(x), Some(y)) if x.is_base_line() && y.is_base_line() => {
                    debug_assert_eq!(x.base_pos, y.base_pos);
                    if x.tag == Tag::Deleted && y.tag == Tag::Deleted {
                        self.overlap = true;
                    }
                    self.mine.bump();
                    self.other.bump();
                }

                // An insertion against the other side's untouched context.
                (Some(x), y)
                    if x.tag == Tag::Inserted
                        && !self.overlap
                        && (y.is_none() || is(y, Tag::Unchanged)) =>
                {
                    self.out.push(x.text.clone());
                    self.mine.bump();
                }
                (x, Some(y))
                    if y.tag == Tag::Inserted
                        && !self.overlap
                        && (x.is_none() || is(x, Tag::Unchanged)) =>
                {
                    self.out.push(y.text.clone());
                    self.other.bump();
                }

                // Competing volatile lines: keep mine's.
                (Some(x), Some(y))
                    if x.tag == Tag::Inserted
                        && y.tag == Tag::Inserted
                        && self.merger.both_volatile(&x.text, &y.text) =>
                {
                    tracing::debug!(
                        kept = x.text.trim_end(),
                        dropped = y.text.trim_end(),
                        "keyword line conflict suppressed"
                    );
                    self.overlap = false;
                    self.out.push(x.text.clone());
                    self.mine.bump();
                    self.other.bump();
                }

                _ => self.conflict(),
            }
        }
    }

    /// Consume both sides up to the next common context line and emit what
    /// each side keeps in between as a conflict region.
    fn conflict(&mut self) {
        let mut left = Vec::new();
        let mut right = Vec::new();

        loop {
            let take_mine = match (self.mine.peek(), self.other.peek()) {
                (None, None) => break,
                (Some(x), Some(y))
                    if x.tag == Tag::Unchanged
                        && y.tag == Tag::Unchanged
                        && x.base_pos == y.base_pos =>
                {
                    break
                }
                (Some(x), _) if x.tag != Tag::Unchanged => true,
                (_, Some(y)) if y.tag != Tag::Unchanged => false,
                // Context only one side kept: the side behind catches up.
                (Some(x), Some(y)) => x.base_pos < y.base_pos,
                (Some(_), None) => true,
                (None, Some(_)) => false,
            };

            let (cursor, block) = if take_mine {
                (&mut self.mine, &mut left)
            } else {
                (&mut self.other, &mut right)
            };
            if let Some(line) = cursor.bump() {
                if line.is_variant_line() {
                    block.push(line.text.clone());
                }
            }
        }

        tracing::debug!(
            at = self.out.len() + 1,
            mine = left.len(),
            other = right.len(),
            "conflict region"
        );

        let markers = &self.merger.markers;
        terminate_last(&mut self.out);
        self.out.push(markers.start.clone());
        self.out.extend(left);
        terminate_last(&mut self.out);
        self.out.push(markers.separator.clone());
        self.out.extend(right);
        terminate_last(&mut self.out);
        self.out.push(markers.end.clone());
        self.conflicts += 1;
        self.overlap = false;
    }
}
