//! Minimal edit scripts between two strings.
//!
//! The engine tokenizes both inputs (by word or by character), strips the
//! common prefix and suffix, and runs Myers' O(ND) greedy algorithm on the
//! remaining middle. Ties between a deletion and an insertion that reach the
//! same furthest point are broken in favour of the deletion, so at equal cost
//! deletions come out before insertions.
//!
//! Scripts are minimal up to [`MAX_EDIT_COST`] edits. Past that the result
//! still rebuilds both inputs but may contain more edits than needed.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{RenditionError, Result};

/// Word tokens: runs of word characters, runs of whitespace, or a single
/// other character. Every character of the input belongs to exactly one token.
static WORD_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+|\s+|[^\w\s]").unwrap());

/// Kind of an edit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Text present in both inputs.
    Equal,
    /// Text present only in the first input.
    Delete,
    /// Text present only in the second input.
    Insert,
}

/// One step of an edit script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOp {
    pub op: Operation,
    pub text: String,
}

impl DiffOp {
    /// Create a new operation.
    pub fn new(op: Operation, text: impl Into<String>) -> Self {
        Self {
            op,
            text: text.into(),
        }
    }
}

/// Unit the edit script is computed over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Words, whitespace runs and single punctuation marks.
    #[default]
    Word,
    /// Unicode scalar values.
    Char,
}

impl Granularity {
    /// Split `text` into tokens whose concatenation is `text`.
    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        match self {
            Granularity::Word => WORD_TOKEN.find_iter(text).map(|m| m.as_str()).collect(),
            Granularity::Char => text
                .char_indices()
                .map(|(i, c)| &text[i..i + c.len_utf8()])
                .collect(),
        }
    }
}

/// Diff two strings at word granularity.
pub fn diff(a: &str, b: &str) -> Vec<DiffOp> {
    diff_with(a, b, Granularity::Word)
}

/// Diff two strings at the given granularity.
///
/// Concatenating the `Equal` and `Delete` texts of the result yields `a`;
/// concatenating the `Equal` and `Insert` texts yields `b`.
pub fn diff_with(a: &str, b: &str, granularity: Granularity) -> Vec<DiffOp> {
    if a == b {
        return if a.is_empty() {
            Vec::new()
        } else {
            vec![DiffOp::new(Operation::Equal, a)]
        };
    }

    let a_tokens = granularity.tokenize(a);
    let b_tokens = granularity.tokenize(b);

    let prefix = a_tokens
        .iter()
        .zip(&b_tokens)
        .take_while(|(x, y)| x == y)
        .count();
    let suffix = a_tokens[prefix..]
        .iter()
        .rev()
        .zip(b_tokens[prefix..].iter().rev())
        .take_while(|(x, y)| x == y)
        .count();

    let a_mid = &a_tokens[prefix..a_tokens.len() - suffix];
    let b_mid = &b_tokens[prefix..b_tokens.len() - suffix];

    let mut ops = Vec::new();
    if prefix > 0 {
        ops.push(DiffOp::new(Operation::Equal, a_tokens[..prefix].concat()));
    }
    for edit in myers(a_mid, b_mid) {
        let (op, token) = match edit {
            Edit::Equal(i) => (Operation::Equal, a_mid[i]),
            Edit::Delete(i) => (Operation::Delete, a_mid[i]),
            Edit::Insert(j) => (Operation::Insert, b_mid[j]),
        };
        match ops.last_mut() {
            Some(last) if last.op == op => last.text.push_str(token),
            _ => ops.push(DiffOp::new(op, token)),
        }
    }
    if suffix > 0 {
        let tail = a_tokens[a_tokens.len() - suffix..].concat();
        match ops.last_mut() {
            Some(last) if last.op == Operation::Equal => last.text.push_str(&tail),
            _ => ops.push(DiffOp::new(Operation::Equal, tail)),
        }
    }

    ops
}

/// Diff raw byte strings, failing if either is not valid UTF-8.
pub fn diff_bytes(a: &[u8], b: &[u8], granularity: Granularity) -> Result<Vec<DiffOp>> {
    let a = std::str::from_utf8(a)
        .map_err(|e| RenditionError::InvalidText(format!("source is not UTF-8: {}", e)))?;
    let b = std::str::from_utf8(b)
        .map_err(|e| RenditionError::InvalidText(format!("candidate is not UTF-8: {}", e)))?;
    Ok(diff_with(a, b, granularity))
}

/// Token-level edit, indexing into the input slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edit {
    Equal(usize),
    Delete(usize),
    Insert(usize),
}

/// Edit cost at which the search gives up on a minimal script.
///
/// The trace keeps one frontier per cost level, so memory grows with the
/// square of the cost reached. Inputs that differ by more than this many
/// tokens keep the furthest path found at this cost; the rest of both sides
/// becomes one deletion followed by one insertion.
pub const MAX_EDIT_COST: usize = 1024;

/// Myers' greedy shortest edit script, bounded by [`MAX_EDIT_COST`].
fn myers(a: &[&str], b: &[&str]) -> Vec<Edit> {
    myers_bounded(a, b, MAX_EDIT_COST)
}

/// Furthest x on diagonal `k` in the frontier row for cost `d`.
fn at(row: &[isize], d: isize, k: isize) -> isize {
    row[(k + d) as usize]
}

/// `trace[d]` holds the frontier for cost `d`, diagonals `-d..=d` only, so
/// the path can be recovered by walking the trace backwards.
fn myers_bounded(a: &[&str], b: &[&str], max_cost: usize) -> Vec<Edit> {
    let n = a.len() as isize;
    let m = b.len() as isize;

    if n == 0 {
        return (0..b.len()).map(Edit::Insert).collect();
    }
    if m == 0 {
        return (0..a.len()).map(Edit::Delete).collect();
    }

    let max = (n + m).min(isize::try_from(max_cost.max(1)).unwrap_or(isize::MAX));
    let mut trace: Vec<Vec<isize>> = Vec::new();
    let mut end = None;

    for d in 0..=max {
        let mut row = vec![0isize; (2 * d + 1) as usize];
        let prev = trace.last();
        let mut k = -d;
        while k <= d {
            let mut x = match prev {
                None => 0,
                Some(prev) => {
                    if k == -d || (k != d && at(prev, d - 1, k - 1) < at(prev, d - 1, k + 1)) {
                        at(prev, d - 1, k + 1)
                    } else {
                        at(prev, d - 1, k - 1) + 1
                    }
                }
            };
            let mut y = x - k;
            while x < n && y < m && a[x as usize] == b[y as usize] {
                x += 1;
                y += 1;
            }
            row[(k + d) as usize] = x;
            if x >= n && y >= m {
                end = Some((n, m));
                break;
            }
            k += 2;
        }
        trace.push(row);
        if end.is_some() {
            break;
        }
    }

    let (end_x, end_y) = match end {
        Some(point) => point,
        None => match furthest(&trace, n, m) {
            Some(point) => point,
            None => {
                let mut edits: Vec<Edit> = (0..a.len()).map(Edit::Delete).collect();
                edits.extend((0..b.len()).map(Edit::Insert));
                return edits;
            }
        },
    };

    let mut edits = Vec::with_capacity((n + m) as usize);
    let (mut x, mut y) = (end_x, end_y);
    for level in (1..trace.len()).rev() {
        let prev = &trace[level - 1];
        let d = level as isize;
        let k = x - y;
        let prev_k = if k == -d || (k != d && at(prev, d - 1, k - 1) < at(prev, d - 1, k + 1)) {
            k + 1
        } else {
            k - 1
        };
        let prev_x = at(prev, d - 1, prev_k);
        let prev_y = prev_x - prev_k;

        while x > prev_x && y > prev_y {
            edits.push(Edit::Equal((x - 1) as usize));
            x -= 1;
            y -= 1;
        }
        if x == prev_x {
            edits.push(Edit::Insert((y - 1) as usize));
        } else {
            edits.push(Edit::Delete((x - 1) as usize));
        }
        x = prev_x;
        y = prev_y;
    }
    while x > 0 {
        edits.push(Edit::Equal((x - 1) as usize));
        x -= 1;
    }
    edits.reverse();

    if (end_x, end_y) != (n, m) {
        edits.extend((end_x as usize..a.len()).map(Edit::Delete));
        edits.extend((end_y as usize..b.len()).map(Edit::Insert));
    }
    edits
}

/// The in-bounds point of the last frontier that covers the most of both
/// inputs.
fn furthest(trace: &[Vec<isize>], n: isize, m: isize) -> Option<(isize, isize)> {
    let row = trace.last()?;
    let d = (trace.len() - 1) as isize;
    (-d..=d)
        .step_by(2)
        .map(|k| {
            let x = at(row, d, k);
            (x, x - k)
        })
        .filter(|&(x, y)| x <= n && y <= m)
        .max_by_key(|&(x, y)| x + y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rebuild(ops: &[DiffOp], keep: Operation) -> String {
        ops.iter()
            .filter(|o| o.op == Operation::Equal || o.op == keep)
            .map(|o| o.text.as_str())
            .collect()
    }

    #[test]
    fn test_word_tokens_cover_input() {
        let text = "Hello, world!  It's 3pm.";
        let tokens = Granularity::Word.tokenize(text);
        assert_eq!(tokens.concat(), text);
        assert_eq!(tokens[0], "Hello");
        assert_eq!(tokens[1], ",");
        assert_eq!(tokens[2], " ");
    }

    #[test]
    fn test_char_tokens_handle_multibyte() {
        let tokens = Granularity::Char.tokenize("né😀");
        assert_eq!(tokens, vec!["n", "é", "😀"]);
    }

    #[test]
    fn test_identical_inputs() {
        assert!(diff("", "").is_empty());
        assert_eq!(diff("abc", "abc"), vec![DiffOp::new(Operation::Equal, "abc")]);
    }

    #[test]
    fn test_one_side_empty() {
        assert_eq!(diff("", "new text"), vec![DiffOp::new(Operation::Insert, "new text")]);
        assert_eq!(diff("old text", ""), vec![DiffOp::new(Operation::Delete, "old text")]);
    }

    #[test]
    fn test_word_substitution() {
        let ops = diff("The cat sat on the mat", "The dog sat on the mat");
        assert_eq!(
            ops,
            vec![
                DiffOp::new(Operation::Equal, "The "),
                DiffOp::new(Operation::Delete, "cat"),
                DiffOp::new(Operation::Insert, "dog"),
                DiffOp::new(Operation::Equal, " sat on the mat"),
            ]
        );
    }

    #[test]
    fn test_delete_precedes_insert_on_tie() {
        let ops = diff_with("a", "b", Granularity::Char);
        assert_eq!(
            ops,
            vec![
                DiffOp::new(Operation::Delete, "a"),
                DiffOp::new(Operation::Insert, "b"),
            ]
        );
    }

    #[test]
    fn test_char_diff_is_minimal() {
        // "kitten" -> "sitting": 2 substitutions and 1 insertion, 5 edits as delete/insert.
        let ops = diff_with("kitten", "sitting", Granularity::Char);
        let edited: usize = ops
            .iter()
            .filter(|o| o.op != Operation::Equal)
            .map(|o| o.text.chars().count())
            .sum();
        assert_eq!(edited, 5);
        assert_eq!(rebuild(&ops, Operation::Delete), "kitten");
        assert_eq!(rebuild(&ops, Operation::Insert), "sitting");
    }

    #[test]
    fn test_disjoint_inputs() {
        let ops = diff("alpha beta", "gamma delta");
        assert_eq!(rebuild(&ops, Operation::Delete), "alpha beta");
        assert_eq!(rebuild(&ops, Operation::Insert), "gamma delta");
    }

    #[test]
    fn test_long_disjoint_inputs_past_cost_cap() {
        let a = "a".repeat(4000);
        let b = "b".repeat(4000);
        let ops = diff_with(&a, &b, Granularity::Char);

        assert_eq!(
            ops,
            vec![
                DiffOp::new(Operation::Delete, a.clone()),
                DiffOp::new(Operation::Insert, b.clone()),
            ]
        );
    }

    #[test]
    fn test_capped_search_keeps_path_found_so_far() {
        let a = ["x", "same", "y", "z", "tail"];
        let b = ["p", "same", "q", "r", "tail"];
        let edits = myers_bounded(&a, &b, 2);

        let old: Vec<&str> = edits
            .iter()
            .filter_map(|e| match *e {
                Edit::Equal(i) | Edit::Delete(i) => Some(a[i]),
                Edit::Insert(_) => None,
            })
            .collect();
        let new: Vec<&str> = edits
            .iter()
            .filter_map(|e| match *e {
                Edit::Equal(i) => Some(a[i]),
                Edit::Insert(j) => Some(b[j]),
                Edit::Delete(_) => None,
            })
            .collect();
        assert_eq!(old, a);
        assert_eq!(new, b);
        // The two edits spent before the cap reach the shared token.
        assert_eq!(&edits[..3], &[Edit::Delete(0), Edit::Insert(0), Edit::Equal(1)]);

        // Uncapped, the shared tail is found too.
        let full = myers_bounded(&a, &b, usize::MAX);
        assert_eq!(full.iter().filter(|e| matches!(e, Edit::Equal(_))).count(), 2);
    }

    #[test]
    fn test_diff_bytes_rejects_invalid_utf8() {
        let err = diff_bytes(&[0xff, 0xfe], b"ok", Granularity::Word).unwrap_err();
        assert!(matches!(err, RenditionError::InvalidText(_)));

        let ops = diff_bytes(b"same", b"same", Granularity::Word).unwrap();
        assert_eq!(ops.len(), 1);
    }
}
