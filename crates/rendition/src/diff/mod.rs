//! Text diffing for candidate review.
//!
//! Three stages, each usable on its own:
//!
//! - [`engine`] computes a minimal edit script between two strings
//! - [`cleanup`] coalesces the script into maximal [`DiffSegment`]s and
//!   optionally folds short equalities into neighbouring changes
//! - [`render`] turns segments into presentation-independent [`Markup`]
//!
//! # Example
//!
//! ```
//! use rendition::diff::{compare, DiffOptions, SegmentKind};
//!
//! let segments = compare(
//!     "The cat sat on the mat",
//!     "The dog sat on the mat",
//!     &DiffOptions::default(),
//! );
//!
//! assert_eq!(segments.len(), 4);
//! assert_eq!(segments[1].kind, SegmentKind::Deleted);
//! assert_eq!(segments[1].text, "cat");
//! ```

pub mod cleanup;
pub mod engine;
pub mod render;

use serde::{Deserialize, Serialize};

pub use cleanup::{
    candidate_text, classify, classify_segments, source_text, CleanupOptions, DiffSegment,
    SegmentKind,
};
pub use engine::{diff, diff_bytes, diff_with, DiffOp, Granularity, Operation};
pub use render::{render, Highlight, Markup, Span};

/// Options controlling how two texts are compared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOptions {
    /// Token unit for the edit script.
    pub granularity: Granularity,

    /// Post-processing applied to the edit script.
    pub cleanup: CleanupOptions,
}

impl DiffOptions {
    /// Use the given granularity.
    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Use the given cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = cleanup;
        self
    }
}

/// Diff `source` against `candidate` and classify the result.
pub fn compare(source: &str, candidate: &str, options: &DiffOptions) -> Vec<DiffSegment> {
    let ops = diff_with(source, candidate, options.granularity);
    classify(&ops, &options.cleanup)
}
