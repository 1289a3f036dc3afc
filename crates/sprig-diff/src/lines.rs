//! Line diff based on the longest common subsequence.
//!
//! Both texts are split into lines that keep their terminators, so the
//! segments concatenate back to the original texts exactly: the `Unchanged`
//! and `Removed` segments rebuild the old text, the `Unchanged` and `Added`
//! segments rebuild the new one.

use serde::Serialize;

/// How a run of lines relates the old text to the new one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Present in both texts (part of the common subsequence).
    Unchanged,
    /// Only in the new text.
    Added,
    /// Only in the old text.
    Removed,
}

/// A maximal run of lines of one kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiffSegment {
    pub kind: SegmentKind,
    /// The lines of the run, terminators included.
    pub text: String,
}

impl DiffSegment {
    pub fn new(kind: SegmentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// The individual lines of this segment.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        split_lines(&self.text).into_iter()
    }

    /// Number of lines in this segment.
    pub fn line_count(&self) -> usize {
        split_lines(&self.text).len()
    }
}

/// Split `text` into lines, each keeping its trailing `\n` if it had one.
///
/// The empty string has no lines; a final line without a newline is still a
/// line.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op<'t> {
    Equal(&'t str),
    Delete(&'t str),
    Insert(&'t str),
}

/// Compute the line diff turning `old` into `new`.
///
/// Lines in the longest common subsequence become `Unchanged` segments.
/// Between two unchanged runs, the lines only in `old` are emitted as one
/// `Removed` segment followed by the lines only in `new` as one `Added`
/// segment.
pub fn diff_lines(old: &str, new: &str) -> Vec<DiffSegment> {
    let a = split_lines(old);
    let b = split_lines(new);
    coalesce(&line_ops(&a, &b))
}

/// Per-line edit script. The shared prefix and suffix are peeled off before
/// the LCS search; they always belong to some LCS.
fn line_ops<'t>(a: &[&'t str], b: &[&'t str]) -> Vec<Op<'t>> {
    let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    let suffix = a[prefix..]
        .iter()
        .rev()
        .zip(b[prefix..].iter().rev())
        .take_while(|(x, y)| x == y)
        .count();

    let a_mid = &a[prefix..a.len() - suffix];
    let b_mid = &b[prefix..b.len() - suffix];

    let mut ops = Vec::with_capacity(a.len() + b.len());
    ops.extend(a[..prefix].iter().copied().map(Op::Equal));
    edit_script(a_mid, b_mid, TABLE_CELLS, &mut ops);
    ops.extend(a[a.len() - suffix..].iter().copied().map(Op::Equal));
    ops
}

/// Largest `(n + 1) * (m + 1)` solved with a full table. Bigger inputs are
/// split in linear space until the pieces fit.
const TABLE_CELLS: usize = 1 << 20;

/// Append an LCS edit script for `a` -> `b` to `ops`.
///
/// Inputs over `table_cells` are cut in half on `a` at a point of some
/// optimal path (Hirschberg), so memory stays `O(n + m)` beyond one table.
fn edit_script<'t>(a: &[&'t str], b: &[&'t str], table_cells: usize, ops: &mut Vec<Op<'t>>) {
    if a.is_empty() || b.is_empty() {
        ops.extend(a.iter().copied().map(Op::Delete));
        ops.extend(b.iter().copied().map(Op::Insert));
        return;
    }
    if (a.len() + 1).saturating_mul(b.len() + 1) <= table_cells {
        table_ops(a, b, ops);
        return;
    }
    if let &[line] = a {
        match b.iter().position(|&y| y == line) {
            Some(j) => {
                ops.extend(b[..j].iter().copied().map(Op::Insert));
                ops.push(Op::Equal(line));
                ops.extend(b[j + 1..].iter().copied().map(Op::Insert));
            }
            None => {
                ops.push(Op::Delete(line));
                ops.extend(b.iter().copied().map(Op::Insert));
            }
        }
        return;
    }

    let mid = a.len() / 2;
    let forward = lcs_row(&a[..mid], b);
    let a_rev: Vec<&str> = a[mid..].iter().rev().copied().collect();
    let b_rev: Vec<&str> = b.iter().rev().copied().collect();
    // backward[m - j] = LCS length of a[mid..] and b[j..]
    let backward = lcs_row(&a_rev, &b_rev);

    let m = b.len();
    let mut split = 0;
    let mut best = 0;
    for j in 0..=m {
        let total = forward[j] + backward[m - j];
        if total > best {
            best = total;
            split = j;
        }
    }

    edit_script(&a[..mid], &b[..split], table_cells, ops);
    edit_script(&a[mid..], &b[split..], table_cells, ops);
}

/// Last row of the LCS table: `row[j]` is the LCS length of `a` and `b[..j]`.
fn lcs_row(a: &[&str], b: &[&str]) -> Vec<u32> {
    let mut row = vec![0u32; b.len() + 1];
    for x in a {
        let mut diag = 0;
        for (j, y) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if x == y { diag + 1 } else { above.max(row[j]) };
            diag = above;
        }
    }
    row
}

fn table_ops<'t>(a: &[&'t str], b: &[&'t str], ops: &mut Vec<Op<'t>>) {
    let (n, m) = (a.len(), b.len());
    let width = m + 1;

    // table[i * width + j] = LCS length of a[i..] and b[j..]
    let mut table = vec![0u32; (n + 1) * width];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            table[i * width + j] = if a[i] == b[j] {
                table[(i + 1) * width + j + 1] + 1
            } else {
                table[(i + 1) * width + j].max(table[i * width + j + 1])
            };
        }
    }

    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if a[i] == b[j] {
            ops.push(Op::Equal(a[i]));
            i += 1;
            j += 1;
        } else if table[(i + 1) * width + j] >= table[i * width + j + 1] {
            ops.push(Op::Delete(a[i]));
            i += 1;
        } else {
            ops.push(Op::Insert(b[j]));
            j += 1;
        }
    }
    ops.extend(a[i..].iter().copied().map(Op::Delete));
    ops.extend(b[j..].iter().copied().map(Op::Insert));
}

/// Merge per-line ops into maximal segments, removals before additions
/// within each gap.
fn coalesce(ops: &[Op<'_>]) -> Vec<DiffSegment> {
    let mut segments = Vec::new();
    let mut unchanged = String::new();
    let mut removed = String::new();
    let mut added = String::new();

    fn flush(segments: &mut Vec<DiffSegment>, kind: SegmentKind, buf: &mut String) {
        if !buf.is_empty() {
            segments.push(DiffSegment::new(kind, std::mem::take(buf)));
        }
    }

    for op in ops {
        match op {
            Op::Equal(line) => {
                flush(&mut segments, SegmentKind::Removed, &mut removed);
                flush(&mut segments, SegmentKind::Added, &mut added);
                unchanged.push_str(line);
            }
            Op::Delete(line) => {
                flush(&mut segments, SegmentKind::Unchanged, &mut unchanged);
                removed.push_str(line);
            }
            Op::Insert(line) => {
                flush(&mut segments, SegmentKind::Unchanged, &mut unchanged);
                added.push_str(line);
            }
        }
    }
    flush(&mut segments, SegmentKind::Unchanged, &mut unchanged);
    flush(&mut segments, SegmentKind::Removed, &mut removed);
    flush(&mut segments, SegmentKind::Added, &mut added);
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn seg(kind: SegmentKind, text: &str) -> DiffSegment {
        DiffSegment::new(kind, text)
    }

    fn rebuild(segments: &[DiffSegment], keep: SegmentKind) -> String {
        segments
            .iter()
            .filter(|s| s.kind == SegmentKind::Unchanged || s.kind == keep)
            .map(|s| s.text.as_str())
            .collect()
    }

    #[test]
    fn identical_texts_are_unchanged() {
        let text = "a\nb\nc\n";
        assert_eq!(diff_lines(text, text), vec![seg(SegmentKind::Unchanged, text)]);
    }

    #[test]
    fn empty_against_empty() {
        assert!(diff_lines("", "").is_empty());
    }

    #[test]
    fn from_empty_is_single_addition() {
        let text = "first\nsecond\n";
        assert_eq!(diff_lines("", text), vec![seg(SegmentKind::Added, text)]);
    }

    #[test]
    fn to_empty_is_single_removal() {
        let text = "first\nsecond";
        assert_eq!(diff_lines(text, ""), vec![seg(SegmentKind::Removed, text)]);
    }

    #[test]
    fn single_line_replacement() {
        assert_eq!(
            diff_lines("hello", "hello world"),
            vec![
                seg(SegmentKind::Removed, "hello"),
                seg(SegmentKind::Added, "hello world"),
            ]
        );
    }

    #[test]
    fn change_in_the_middle() {
        let old = "a\nb\nc\nd\ne\n";
        let new = "a\nb\nX\nd\ne\n";
        assert_eq!(
            diff_lines(old, new),
            vec![
                seg(SegmentKind::Unchanged, "a\nb\n"),
                seg(SegmentKind::Removed, "c\n"),
                seg(SegmentKind::Added, "X\n"),
                seg(SegmentKind::Unchanged, "d\ne\n"),
            ]
        );
    }

    #[test]
    fn pure_insertion_and_deletion() {
        assert_eq!(
            diff_lines("line1\nline2\n", "line1\nline2\nline3\n"),
            vec![
                seg(SegmentKind::Unchanged, "line1\nline2\n"),
                seg(SegmentKind::Added, "line3\n"),
            ]
        );
        assert_eq!(
            diff_lines("line1\nline2\nline3\n", "line1\nline3\n"),
            vec![
                seg(SegmentKind::Unchanged, "line1\n"),
                seg(SegmentKind::Removed, "line2\n"),
                seg(SegmentKind::Unchanged, "line3\n"),
            ]
        );
    }

    #[test]
    fn missing_final_newline_is_a_change() {
        assert_eq!(
            diff_lines("a\nb\n", "a\nb"),
            vec![
                seg(SegmentKind::Unchanged, "a\n"),
                seg(SegmentKind::Removed, "b\n"),
                seg(SegmentKind::Added, "b"),
            ]
        );
    }

    #[test]
    fn removals_grouped_before_additions() {
        let segments = diff_lines("x\ny\nkeep\n", "p\nq\nkeep\n");
        assert_eq!(
            segments,
            vec![
                seg(SegmentKind::Removed, "x\ny\n"),
                seg(SegmentKind::Added, "p\nq\n"),
                seg(SegmentKind::Unchanged, "keep\n"),
            ]
        );
    }

    #[test]
    fn keeps_longest_common_run() {
        // Matching the three shared lines beats matching the single "z".
        let segments = diff_lines("z\na\nb\nc\n", "a\nb\nc\nz\n");
        assert_eq!(unchanged_lines(&segments), 3);
    }

    #[test]
    fn segment_lines() {
        let s = seg(SegmentKind::Added, "one\ntwo");
        assert_eq!(s.lines().collect::<Vec<_>>(), vec!["one\n", "two"]);
        assert_eq!(s.line_count(), 2);
    }

    #[test]
    fn segment_kind_serializes_lowercase() {
        let json = serde_json::to_string(&seg(SegmentKind::Removed, "x")).unwrap();
        assert_eq!(json, r#"{"kind":"removed","text":"x"}"#);
    }

    fn unchanged_lines(segments: &[DiffSegment]) -> usize {
        segments
            .iter()
            .filter(|s| s.kind == SegmentKind::Unchanged)
            .map(DiffSegment::line_count)
            .sum()
    }

    fn script(a: &[&'static str], b: &[&'static str], table_cells: usize) -> Vec<Op<'static>> {
        let mut ops = Vec::new();
        edit_script(a, b, table_cells, &mut ops);
        ops
    }

    #[test]
    fn large_disjoint_texts() {
        let old: String = (0..3000).map(|i| format!("old {i}\n")).collect();
        let new: String = (0..3000).map(|i| format!("new {i}\n")).collect();
        assert_eq!(
            diff_lines(&old, &new),
            vec![seg(SegmentKind::Removed, &old), seg(SegmentKind::Added, &new)]
        );
    }

    #[test]
    fn large_interleaved_texts_keep_every_common_line() {
        let old: String = (0..1500).map(|i| format!("common {i}\nold {i}\n")).collect();
        let new: String = (0..1500).map(|i| format!("new {i}\ncommon {i}\n")).collect();

        let segments = diff_lines(&old, &new);
        assert_eq!(unchanged_lines(&segments), 1500);
        assert_eq!(rebuild(&segments, SegmentKind::Removed), old);
        assert_eq!(rebuild(&segments, SegmentKind::Added), new);
    }

    #[test]
    fn split_handles_single_line_side() {
        let ops = script(&["b\n"], &["a\n", "b\n", "c\n"], 0);
        assert_eq!(
            ops,
            vec![Op::Insert("a\n"), Op::Equal("b\n"), Op::Insert("c\n")]
        );
        let ops = script(&["z\n"], &["a\n"], 0);
        assert_eq!(ops, vec![Op::Delete("z\n"), Op::Insert("a\n")]);
    }

    fn equal_ops(ops: &[Op<'_>]) -> usize {
        ops.iter().filter(|op| matches!(op, Op::Equal(_))).count()
    }

    fn line_strategy() -> impl Strategy<Value = Vec<&'static str>> {
        let line = prop_oneof![Just("a\n"), Just("b\n"), Just("c\n"), Just("d\n")];
        proptest::collection::vec(line, 0..32)
    }

    fn text_strategy() -> impl Strategy<Value = String> {
        let line = prop_oneof![Just("a\n"), Just("b\n"), Just("c\n"), Just("d"), Just("\n")];
        proptest::collection::vec(line, 0..24)
            .prop_map(|lines| lines.concat())
    }

    proptest! {
        #[test]
        fn segments_rebuild_both_sides(old in text_strategy(), new in text_strategy()) {
            let segments = diff_lines(&old, &new);
            prop_assert_eq!(rebuild(&segments, SegmentKind::Removed), old);
            prop_assert_eq!(rebuild(&segments, SegmentKind::Added), new);
        }

        #[test]
        fn segments_are_maximal(old in text_strategy(), new in text_strategy()) {
            let segments = diff_lines(&old, &new);
            for pair in segments.windows(2) {
                prop_assert_ne!(pair[0].kind, pair[1].kind);
                prop_assert!(
                    !(pair[0].kind == SegmentKind::Added && pair[1].kind == SegmentKind::Removed)
                );
            }
            prop_assert!(segments.iter().all(|s| !s.text.is_empty()));
        }

        #[test]
        fn self_diff_is_all_unchanged(text in text_strategy()) {
            let segments = diff_lines(&text, &text);
            prop_assert!(segments.iter().all(|s| s.kind == SegmentKind::Unchanged));
            prop_assert_eq!(rebuild(&segments, SegmentKind::Unchanged), text);
        }

        #[test]
        fn linear_space_split_is_optimal(a in line_strategy(), b in line_strategy()) {
            let split = script(&a, &b, 0);
            let table = script(&a, &b, usize::MAX);
            prop_assert_eq!(equal_ops(&split), equal_ops(&table));

            let kept: Vec<&str> = split
                .iter()
                .filter_map(|op| match op {
                    Op::Equal(l) | Op::Delete(l) => Some(*l),
                    Op::Insert(_) => None,
                })
                .collect();
            prop_assert_eq!(kept, a);
        }

        #[test]
        fn unchanged_count_matches_minimal_diff(old in text_strategy(), new in text_strategy()) {
            let ours = unchanged_lines(&diff_lines(&old, &new));

            let oracle = similar::TextDiff::configure()
                .algorithm(similar::Algorithm::Lcs)
                .diff_lines(old.as_str(), new.as_str());
            let expected = oracle
                .iter_all_changes()
                .filter(|c| c.tag() == similar::ChangeTag::Equal)
                .count();

            prop_assert_eq!(ours, expected);
        }
    }
}
