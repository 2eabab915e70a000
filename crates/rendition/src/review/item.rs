//! Review state for a single candidate.

use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use crate::diff::{compare, render, DiffOptions, DiffSegment, Markup};
use crate::error::{RenditionError, Result};
use crate::store::AcceptedTranslation;

/// Where a review item is in its view/edit cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ReviewState {
    /// Showing the highlighted diff against the source.
    Viewing,
    /// Showing raw text for editing.
    Editing {
        /// Text being edited; seeded from the item's current text.
        buffer: String,
    },
}

impl ReviewState {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ReviewState::Viewing => "Viewing",
            ReviewState::Editing { .. } => "Editing",
        }
    }
}

/// One candidate under review.
///
/// Commits are optimistic: the item's text and state change immediately
/// and are never rolled back, whatever happens to the save.
///
/// Clones share the diff cache of the text they were taken at, so a copy
/// can be rendered away from the session and still warm the original.
#[derive(Debug, Clone)]
pub struct ReviewItem {
    index: usize,
    source: Arc<str>,
    original: String,
    text: String,
    state: ReviewState,
    accepted: Option<String>,
    commit_count: usize,
    options: DiffOptions,
    segments: Arc<OnceLock<Vec<DiffSegment>>>,
}

impl ReviewItem {
    /// Create an item in the `Viewing` state with nothing cached.
    pub fn new(
        index: usize,
        source: Arc<str>,
        candidate: impl Into<String>,
        options: DiffOptions,
    ) -> Self {
        let original = candidate.into();
        Self {
            index,
            source,
            text: original.clone(),
            original,
            state: ReviewState::Viewing,
            accepted: None,
            commit_count: 0,
            options,
            segments: Arc::default(),
        }
    }

    /// Position of the candidate in the session.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The source sentence this candidate is compared against.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The candidate as it was generated.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The candidate's current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current state.
    pub fn state(&self) -> &ReviewState {
        &self.state
    }

    /// Check if the item is being edited.
    pub fn is_editing(&self) -> bool {
        matches!(self.state, ReviewState::Editing { .. })
    }

    /// The edit buffer, while editing.
    pub fn buffer(&self) -> Option<&str> {
        match &self.state {
            ReviewState::Editing { buffer } => Some(buffer),
            ReviewState::Viewing => None,
        }
    }

    /// Whether the current text differs from the generated candidate.
    pub fn is_modified(&self) -> bool {
        self.text != self.original
    }

    /// The most recently committed text.
    pub fn accepted(&self) -> Option<&str> {
        self.accepted.as_deref()
    }

    /// Whether the item has been committed at least once.
    pub fn is_committed(&self) -> bool {
        self.accepted.is_some()
    }

    /// How many times the item has been committed.
    pub fn commit_count(&self) -> usize {
        self.commit_count
    }

    /// Whether the diff for the current text has already been computed.
    pub fn is_diff_cached(&self) -> bool {
        self.segments.get().is_some()
    }

    /// Diff of the source against the current text, computed on first use.
    pub fn segments(&self) -> &[DiffSegment] {
        self.segments
            .get_or_init(|| compare(&self.source, &self.text, &self.options))
    }

    /// Highlighted markup for the current text.
    pub fn render(&self) -> Markup {
        render(self.segments())
    }

    /// Enter `Editing`, seeding the buffer with the current text.
    ///
    /// Calling this while already editing keeps the buffer as it is.
    pub fn start_edit(&mut self) -> &str {
        if !self.is_editing() {
            self.state = ReviewState::Editing {
                buffer: self.text.clone(),
            };
        }
        self.buffer().unwrap_or_default()
    }

    /// Replace the edit buffer.
    pub fn update_buffer(&mut self, text: impl Into<String>) -> Result<()> {
        match &mut self.state {
            ReviewState::Editing { buffer } => {
                *buffer = text.into();
                Ok(())
            }
            ReviewState::Viewing => Err(RenditionError::NotEditing { index: self.index }),
        }
    }

    /// Leave `Editing` without committing, returning the discarded buffer.
    pub fn cancel_edit(&mut self) -> Option<String> {
        match std::mem::replace(&mut self.state, ReviewState::Viewing) {
            ReviewState::Editing { buffer } => Some(buffer),
            ReviewState::Viewing => None,
        }
    }

    /// Accept `text` as this item's result and return to `Viewing`.
    ///
    /// Legal from both states. Returns the pair to persist.
    pub fn commit(&mut self, text: impl Into<String>) -> AcceptedTranslation {
        let text = text.into();
        if text != self.text {
            self.text = text;
            self.segments = Arc::default();
        }
        self.state = ReviewState::Viewing;
        self.accepted = Some(self.text.clone());
        self.commit_count += 1;

        AcceptedTranslation::new(self.source.to_string(), self.text.clone())
    }

    /// Commit without typing anything new: the edit buffer while editing,
    /// the current text otherwise.
    pub fn commit_as_is(&mut self) -> AcceptedTranslation {
        let text = self.buffer().unwrap_or(self.text.as_str()).to_string();
        self.commit(text)
    }

    /// Serializable snapshot, computing the diff if needed.
    pub fn view(&self) -> ItemView {
        let markup = self.render();
        ItemView {
            index: self.index,
            state: self.state.clone(),
            text: self.text.clone(),
            original: self.original.clone(),
            modified: self.is_modified(),
            accepted: self.accepted.clone(),
            commit_count: self.commit_count,
            segments: self.segments().to_vec(),
            html: markup.to_html(),
        }
    }
}

/// Snapshot of a review item for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemView {
    pub index: usize,
    #[serde(flatten)]
    pub state: ReviewState,
    pub text: String,
    pub original: String,
    pub modified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted: Option<String>,
    pub commit_count: usize,
    pub segments: Vec<DiffSegment>,
    pub html: String,
}
