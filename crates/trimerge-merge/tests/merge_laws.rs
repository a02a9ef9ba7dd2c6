//! Property-based tests for the three-way merge.
//!
//! Most properties use small line sequences over a tiny alphabet, so
//! repeated lines and overlapping edits are common. The idempotence law needs
//! unique lines and separate edits, and has its own generator.

use proptest::prelude::*;
use trimerge_diff::{diff, DiffAlgorithm, Tag};
use trimerge_merge::{merge, ThreeWayMerger};

/// Strategy to generate a file as a list of short terminated lines.
fn file_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[abcd]\n", 0..10)
}

fn algorithm_strategy() -> impl Strategy<Value = DiffAlgorithm> {
    prop_oneof![
        Just(DiffAlgorithm::Myers),
        Just(DiffAlgorithm::Patience),
        Just(DiffAlgorithm::Lcs),
    ]
}

/// One stretch of the base between two anchor lines, and how a single side
/// rewrites it.
#[derive(Clone, Debug)]
struct Stretch {
    len: usize,
    /// 0: nobody edits it, 1: mine, 2: other.
    editor: u8,
    keep: Vec<bool>,
    inserts: Vec<usize>,
}

fn stretch_strategy() -> impl Strategy<Value = Stretch> {
    (
        0usize..4,
        0u8..3,
        prop::collection::vec(any::<bool>(), 4),
        prop::collection::vec(0usize..3, 5),
    )
        .prop_map(|(len, editor, keep, inserts)| Stretch { len, editor, keep, inserts })
}

/// Base, mine and other where every line is unique and the two sides edit
/// disjoint stretches separated by anchor lines nobody touches.
fn disjoint_edits_strategy() -> impl Strategy<Value = (Vec<String>, Vec<String>, Vec<String>)> {
    prop::collection::vec(stretch_strategy(), 1..5).prop_map(|stretches| {
        let (mut base, mut mine, mut other) = (Vec::new(), Vec::new(), Vec::new());
        for (n, stretch) in stretches.iter().enumerate() {
            let anchor = format!("anchor {n}\n");
            for file in [&mut base, &mut mine, &mut other] {
                file.push(anchor.clone());
            }

            let original: Vec<String> = (0..stretch.len).map(|i| format!("base {n}.{i}\n")).collect();
            let rewrite = |side: &str| {
                let mut lines = Vec::new();
                for i in 0..=stretch.len {
                    lines.extend((0..stretch.inserts[i]).map(|k| format!("{side} {n}.{i}.{k}\n")));
                    if i < stretch.len && stretch.keep[i] {
                        lines.push(original[i].clone());
                    }
                }
                lines
            };

            base.extend(original.iter().cloned());
            match stretch.editor {
                1 => {
                    mine.extend(rewrite("mine"));
                    other.extend(original.iter().cloned());
                }
                2 => {
                    mine.extend(original.iter().cloned());
                    other.extend(rewrite("other"));
                }
                _ => {
                    mine.extend(original.iter().cloned());
                    other.extend(original.iter().cloned());
                }
            }
        }
        for file in [&mut base, &mut mine, &mut other] {
            file.push("anchor end\n".to_string());
        }
        (base, mine, other)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: a base nobody touched merges to itself.
    #[test]
    fn untouched_merge_returns_base(base in file_strategy()) {
        let result = merge(&base, &base, &base);
        prop_assert_eq!(result.lines, base);
        prop_assert!(!result.has_conflict);
    }

    /// Property: if other kept the base, mine wins without conflict.
    #[test]
    fn mine_wins_when_other_untouched(
        base in file_strategy(),
        mine in file_strategy(),
        algorithm in algorithm_strategy(),
    ) {
        let result = ThreeWayMerger::new().with_algorithm(algorithm).merge(&base, &mine, &base);
        prop_assert_eq!(result.lines, mine);
        prop_assert!(!result.has_conflict);
    }

    /// Property: if mine kept the base, other wins without conflict.
    #[test]
    fn other_wins_when_mine_untouched(base in file_strategy(), other in file_strategy()) {
        let result = merge(&base, &base, &other);
        prop_assert_eq!(result.lines, other);
        prop_assert!(!result.has_conflict);
    }

    /// Property: identical edits on both sides never conflict.
    #[test]
    fn identical_edits_merge_to_the_edit(
        base in file_strategy(),
        edited in file_strategy(),
        algorithm in algorithm_strategy(),
    ) {
        let result = ThreeWayMerger::new().with_algorithm(algorithm).merge(&base, &edited, &edited);
        prop_assert_eq!(result.lines, edited);
        prop_assert!(!result.has_conflict);
    }

    /// Property: conflict count matches the markers in the output and the
    /// flag, and every marker triple is well formed.
    #[test]
    fn conflict_markers_are_balanced(
        base in file_strategy(),
        mine in file_strategy(),
        other in file_strategy(),
    ) {
        let result = merge(&base, &mine, &other);
        let count = |marker: &str| result.lines.iter().filter(|l| l.as_str() == marker).count();
        prop_assert_eq!(count("<<<<<<< A\n"), result.conflicts);
        prop_assert_eq!(count("=======\n"), result.conflicts);
        prop_assert_eq!(count(">>>>>>> B\n"), result.conflicts);
        prop_assert_eq!(result.has_conflict, result.conflicts > 0);

        let mut open = 0;
        for line in &result.lines {
            match line.as_str() {
                "<<<<<<< A\n" => { prop_assert_eq!(open, 0); open = 1; }
                "=======\n" => { prop_assert_eq!(open, 1); open = 2; }
                ">>>>>>> B\n" => { prop_assert_eq!(open, 2); open = 0; }
                _ => {}
            }
        }
        prop_assert_eq!(open, 0);
    }

    /// Property: every line of a clean merge comes from base, mine or other.
    #[test]
    fn clean_merge_only_uses_input_lines(
        base in file_strategy(),
        mine in file_strategy(),
        other in file_strategy(),
    ) {
        let result = merge(&base, &mine, &other);
        if result.is_clean() {
            for line in &result.lines {
                prop_assert!(base.contains(line) || mine.contains(line) || other.contains(line));
            }
        }
    }

    /// Property: lines both sides deleted never reappear in a clean merge
    /// unless some side also inserted the same text.
    #[test]
    fn common_deletions_stay_deleted(
        base in file_strategy(),
        mine in file_strategy(),
        other in file_strategy(),
    ) {
        let result = merge(&base, &mine, &other);
        if !result.is_clean() {
            return Ok(());
        }
        let ours = diff(&base, &mine);
        let theirs = diff(&base, &other);
        let deleted_by_both: Vec<&str> = ours
            .iter()
            .filter(|l| l.tag == Tag::Deleted)
            .filter(|l| theirs.iter().any(|t| t.tag == Tag::Deleted && t.base_pos == l.base_pos))
            .map(|l| l.text.as_str())
            .collect();
        for text in deleted_by_both {
            let kept_somewhere = base.iter().filter(|l| l.as_str() == text).count() > 1
                || mine.iter().any(|l| l == text)
                || other.iter().any(|l| l == text);
            if !kept_somewhere {
                prop_assert!(!result.lines.iter().any(|l| l == text));
            }
        }
    }

    /// Property: merging a clean result again with either input changes
    /// nothing, as long as the two sides edit separate stretches of unique
    /// lines. With repeated lines, or an insertion next to the other side's
    /// deletion, the second merge may align differently or read as
    /// delete-vs-modify.
    #[test]
    fn clean_merge_is_idempotent(
        (base, mine, other) in disjoint_edits_strategy(),
        algorithm in algorithm_strategy(),
    ) {
        let merger = ThreeWayMerger::new().with_algorithm(algorithm);
        let merged = merger.merge(&base, &mine, &other);
        prop_assert!(merged.is_clean());

        let again = merger.merge(&base, &merged.lines, &other);
        prop_assert_eq!(&again.lines, &merged.lines);
        prop_assert!(again.is_clean());

        let again = merger.merge(&base, &mine, &merged.lines);
        prop_assert_eq!(&again.lines, &merged.lines);
        prop_assert!(again.is_clean());
    }
}
