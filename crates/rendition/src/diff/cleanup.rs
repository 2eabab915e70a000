//! Segment classification: turns raw edit scripts into highlightable segments.

use serde::{Deserialize, Serialize};

use super::engine::{DiffOp, Operation};

/// Kind of a highlighted segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Unchanged text.
    Equal,
    /// Text only in the candidate.
    Inserted,
    /// Text only in the source.
    Deleted,
}

impl SegmentKind {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SegmentKind::Equal => "Equal",
            SegmentKind::Inserted => "Inserted",
            SegmentKind::Deleted => "Deleted",
        }
    }
}

impl From<Operation> for SegmentKind {
    fn from(op: Operation) -> Self {
        match op {
            Operation::Equal => SegmentKind::Equal,
            Operation::Insert => SegmentKind::Inserted,
            Operation::Delete => SegmentKind::Deleted,
        }
    }
}

/// A labeled, non-empty span of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSegment {
    pub kind: SegmentKind,
    pub text: String,
}

impl DiffSegment {
    /// Create a new segment.
    pub fn new(kind: SegmentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Options for the semantic cleanup pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupOptions {
    /// Whether to fold short equalities into surrounding changes.
    pub semantic: bool,

    /// Equalities shorter than this many characters are folded when they sit
    /// between two changes.
    pub min_equality_len: usize,
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self {
            semantic: true,
            min_equality_len: 4,
        }
    }
}

impl CleanupOptions {
    /// Coalesce only, no semantic cleanup.
    pub fn none() -> Self {
        Self {
            semantic: false,
            ..Self::default()
        }
    }
}

/// Classify a raw edit script into maximal segments.
pub fn classify(ops: &[DiffOp], options: &CleanupOptions) -> Vec<DiffSegment> {
    let segments = coalesce(
        ops.iter()
            .map(|op| (SegmentKind::from(op.op), op.text.as_str())),
    );
    cleanup(segments, options)
}

/// Re-run classification on segments that were already classified.
///
/// Classification is idempotent, so this returns its input unchanged when
/// given the output of [`classify`] with the same options.
pub fn classify_segments(segments: &[DiffSegment], options: &CleanupOptions) -> Vec<DiffSegment> {
    let segments = coalesce(segments.iter().map(|s| (s.kind, s.text.as_str())));
    cleanup(segments, options)
}

fn cleanup(mut segments: Vec<DiffSegment>, options: &CleanupOptions) -> Vec<DiffSegment> {
    if !options.semantic {
        return segments;
    }

    loop {
        let last = segments.len().saturating_sub(1);
        let mut folded = false;
        let mut pieces: Vec<(SegmentKind, String)> = Vec::with_capacity(segments.len() + 2);

        for (i, segment) in segments.into_iter().enumerate() {
            let interior = i > 0 && i < last;
            if segment.kind == SegmentKind::Equal
                && interior
                && segment.text.chars().count() < options.min_equality_len
            {
                pieces.push((SegmentKind::Deleted, segment.text.clone()));
                pieces.push((SegmentKind::Inserted, segment.text));
                folded = true;
            } else {
                pieces.push((segment.kind, segment.text));
            }
        }

        segments = coalesce(pieces.iter().map(|(k, t)| (*k, t.as_str())));
        if !folded {
            return segments;
        }
    }
}

/// Merge adjacent runs and order each change run as deletion then insertion.
///
/// Empty pieces are dropped. Within a run of consecutive non-equal pieces,
/// all deleted text is gathered into one segment followed by one segment of
/// all inserted text, preserving the relative order inside each side.
fn coalesce<'a>(pieces: impl Iterator<Item = (SegmentKind, &'a str)>) -> Vec<DiffSegment> {
    let mut out: Vec<DiffSegment> = Vec::new();
    let mut deleted = String::new();
    let mut inserted = String::new();

    for (kind, text) in pieces {
        if text.is_empty() {
            continue;
        }
        match kind {
            SegmentKind::Equal => {
                flush_changes(&mut out, &mut deleted, &mut inserted);
                match out.last_mut() {
                    Some(last) if last.kind == SegmentKind::Equal => last.text.push_str(text),
                    _ => out.push(DiffSegment::new(SegmentKind::Equal, text)),
                }
            }
            SegmentKind::Deleted => deleted.push_str(text),
            SegmentKind::Inserted => inserted.push_str(text),
        }
    }
    flush_changes(&mut out, &mut deleted, &mut inserted);

    out
}

fn flush_changes(out: &mut Vec<DiffSegment>, deleted: &mut String, inserted: &mut String) {
    if !deleted.is_empty() {
        out.push(DiffSegment::new(SegmentKind::Deleted, std::mem::take(deleted)));
    }
    if !inserted.is_empty() {
        out.push(DiffSegment::new(SegmentKind::Inserted, std::mem::take(inserted)));
    }
}

/// Concatenate the text of the source side (equal + deleted segments).
pub fn source_text(segments: &[DiffSegment]) -> String {
    segments
        .iter()
        .filter(|s| s.kind != SegmentKind::Inserted)
        .map(|s| s.text.as_str())
        .collect()
}

/// Concatenate the text of the candidate side (equal + inserted segments).
pub fn candidate_text(segments: &[DiffSegment]) -> String {
    segments
        .iter()
        .filter(|s| s.kind != SegmentKind::Deleted)
        .map(|s| s.text.as_str())
        .collect()
}
