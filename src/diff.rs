//! Line-oriented unified diff between actual and expected output.
//!
//! The renderer is purely structural: it produces annotated lines and leaves
//! all terminal coloring to the reporting layer, so the same diff can be
//! painted, captured, or serialized without escape sequences.

use difference::{Changeset, Difference};

/// Lines of leading/trailing context kept around each change.
const CONTEXT: usize = 3;

/// One annotated line of a unified diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffLine {
    /// `@@ -a,b +c,d @@` range header opening a hunk.
    Hunk(String),
    /// Unchanged line, shared by both sides.
    Context(String),
    /// Present in the actual output but missing from the expectation.
    Removed(String),
    /// Present in the expectation but missing from the actual output.
    Added(String),
}

/// Per-line edit script, before hunk grouping.
enum Edit {
    Same(String),
    Remove(String),
    Add(String),
}

impl Edit {
    fn in_actual(&self) -> bool {
        matches!(self, Edit::Same(_) | Edit::Remove(_))
    }

    fn in_expected(&self) -> bool {
        matches!(self, Edit::Same(_) | Edit::Add(_))
    }
}

/// Computes the unified diff of `actual` against `expected`.
///
/// Returns an empty sequence when the inputs are line-identical. Output is
/// deterministic: the same input pair always yields the same lines.
pub fn diff_lines(actual: &str, expected: &str) -> Vec<DiffLine> {
    group_into_hunks(&line_edits(actual, expected))
}

/// Flattens the changeset into one edit per line.
fn line_edits(actual: &str, expected: &str) -> Vec<Edit> {
    let changeset = Changeset::new(actual, expected, "\n");
    let mut edits = Vec::new();
    for diff in changeset.diffs {
        match diff {
            Difference::Same(chunk) => {
                edits.extend(chunk.split('\n').map(|line| Edit::Same(line.to_string())));
            }
            Difference::Rem(chunk) => {
                edits.extend(chunk.split('\n').map(|line| Edit::Remove(line.to_string())));
            }
            Difference::Add(chunk) => {
                edits.extend(chunk.split('\n').map(|line| Edit::Add(line.to_string())));
            }
        }
    }
    edits
}

/// Groups the edit script into unified hunks with range headers.
///
/// Changes closer than `2 * CONTEXT` lines share a hunk, matching the usual
/// unified-diff merging rule.
fn group_into_hunks(edits: &[Edit]) -> Vec<DiffLine> {
    let changed: Vec<usize> = edits
        .iter()
        .enumerate()
        .filter(|(_, edit)| !matches!(edit, Edit::Same(_)))
        .map(|(index, _)| index)
        .collect();
    if changed.is_empty() {
        return Vec::new();
    }

    // Inclusive index ranges covering each group of nearby changes.
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for &index in &changed {
        let start = index.saturating_sub(CONTEXT);
        let end = (index + CONTEXT).min(edits.len() - 1);
        match ranges.last_mut() {
            Some((_, last_end)) if start <= *last_end + 1 => *last_end = (*last_end).max(end),
            _ => ranges.push((start, end)),
        }
    }

    // Running line counts on each side, indexed by edit position.
    let mut actual_before = vec![0usize; edits.len() + 1];
    let mut expected_before = vec![0usize; edits.len() + 1];
    for (index, edit) in edits.iter().enumerate() {
        actual_before[index + 1] = actual_before[index] + usize::from(edit.in_actual());
        expected_before[index + 1] = expected_before[index] + usize::from(edit.in_expected());
    }

    let mut lines = Vec::new();
    for (start, end) in ranges {
        let actual_len = actual_before[end + 1] - actual_before[start];
        let expected_len = expected_before[end + 1] - expected_before[start];
        // A zero-length side addresses the line the change sits after.
        let actual_start = actual_before[start] + usize::from(actual_len > 0);
        let expected_start = expected_before[start] + usize::from(expected_len > 0);
        lines.push(DiffLine::Hunk(format!(
            "@@ -{actual_start},{actual_len} +{expected_start},{expected_len} @@"
        )));
        for edit in &edits[start..=end] {
            lines.push(match edit {
                Edit::Same(line) => DiffLine::Context(line.clone()),
                Edit::Remove(line) => DiffLine::Removed(line.clone()),
                Edit::Add(line) => DiffLine::Added(line.clone()),
            });
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_inputs_produce_no_hunks() {
        assert!(diff_lines("a\nb\n", "a\nb\n").is_empty());
    }

    #[test]
    fn single_line_change_is_one_hunk() {
        let lines = diff_lines("3\n", "2\n");
        assert_eq!(lines[0], DiffLine::Hunk("@@ -1,2 +1,2 @@".to_string()));
        assert!(lines.contains(&DiffLine::Removed("3".to_string())));
        assert!(lines.contains(&DiffLine::Added("2".to_string())));
    }

    #[test]
    fn distant_changes_split_into_separate_hunks() {
        let actual: String = (0..30).map(|n| format!("line {n}\n")).collect();
        let expected = actual.replace("line 2\n", "LINE 2\n").replace("line 27\n", "LINE 27\n");
        let hunks = diff_lines(&actual, &expected)
            .iter()
            .filter(|line| matches!(line, DiffLine::Hunk(_)))
            .count();
        assert_eq!(hunks, 2);
    }
}
