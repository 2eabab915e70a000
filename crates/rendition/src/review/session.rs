//! Review session: all candidates for one source sentence.

use std::sync::Arc;

use tracing::{debug, info};

use crate::diff::DiffOptions;
use crate::error::{RenditionError, Result};
use crate::store::TranslationStore;

use super::commit::PendingSave;
use super::item::{ItemView, ReviewItem};

/// The candidates for one source sentence and their review state.
///
/// Items are fixed at construction: there is no way to add, remove, or
/// reorder them. Loading another sentence means building a new session.
pub struct ReviewSession {
    source: Arc<str>,
    items: Vec<ReviewItem>,
    store: Arc<dyn TranslationStore>,
}

impl ReviewSession {
    /// Create a session with one `Viewing` item per candidate.
    ///
    /// No diff is computed until an item's segments are first requested.
    pub fn new<I, S>(
        source: impl Into<String>,
        candidates: I,
        store: Arc<dyn TranslationStore>,
        options: DiffOptions,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let source: Arc<str> = Arc::from(source.into());
        let items: Vec<ReviewItem> = candidates
            .into_iter()
            .enumerate()
            .map(|(index, candidate)| {
                ReviewItem::new(index, Arc::clone(&source), candidate, options.clone())
            })
            .collect();

        debug!(candidates = items.len(), store = store.name(), "review session created");

        Self {
            source,
            items,
            store,
        }
    }

    /// The source sentence.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// All items, in candidate order.
    pub fn items(&self) -> &[ReviewItem] {
        &self.items
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the session has no candidates.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by position.
    pub fn item(&self, index: usize) -> Result<&ReviewItem> {
        let len = self.items.len();
        self.items
            .get(index)
            .ok_or(RenditionError::ItemNotFound { index, len })
    }

    fn item_mut(&mut self, index: usize) -> Result<&mut ReviewItem> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(RenditionError::ItemNotFound { index, len })
    }

    /// Start editing an item; returns the seeded buffer.
    pub fn start_edit(&mut self, index: usize) -> Result<String> {
        Ok(self.item_mut(index)?.start_edit().to_string())
    }

    /// Replace an item's edit buffer.
    pub fn update_buffer(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        self.item_mut(index)?.update_buffer(text)
    }

    /// Discard an item's edit buffer.
    pub fn cancel_edit(&mut self, index: usize) -> Result<Option<String>> {
        Ok(self.item_mut(index)?.cancel_edit())
    }

    /// Commit `text` for an item and start saving it.
    ///
    /// The item is updated before this returns; the save runs in the
    /// background and its outcome is only visible through the returned
    /// handle. A failed save does not revert the item.
    pub fn commit(&mut self, index: usize, text: impl Into<String>) -> Result<PendingSave> {
        let entry = self.item_mut(index)?.commit(text);
        info!(index, store = self.store.name(), "committed candidate");
        Ok(PendingSave::spawn(Arc::clone(&self.store), entry))
    }

    /// Commit an item's current text (or edit buffer) unchanged.
    pub fn commit_as_is(&mut self, index: usize) -> Result<PendingSave> {
        let entry = self.item_mut(index)?.commit_as_is();
        info!(index, store = self.store.name(), "committed candidate as-is");
        Ok(PendingSave::spawn(Arc::clone(&self.store), entry))
    }

    /// `(index, text)` for every committed item.
    pub fn accepted(&self) -> Vec<(usize, &str)> {
        self.items
            .iter()
            .filter_map(|item| item.accepted().map(|text| (item.index(), text)))
            .collect()
    }

    /// Snapshots of every item.
    pub fn views(&self) -> Vec<ItemView> {
        self.items.iter().map(ReviewItem::view).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn session(candidates: &[&str]) -> ReviewSession {
        ReviewSession::new(
            "The cat sat on the mat",
            candidates.iter().copied(),
            Arc::new(MemoryStore::new()),
            DiffOptions::default(),
        )
    }

    #[test]
    fn test_empty_session() {
        let session = session(&[]);
        assert!(session.is_empty());
        assert!(session.items().is_empty());
        assert!(session.accepted().is_empty());
    }

    #[test]
    fn test_items_keep_candidate_order() {
        let session = session(&["A", "B", "C"]);
        let texts: Vec<_> = session.items().iter().map(|i| i.text()).collect();
        assert_eq!(texts, vec!["A", "B", "C"]);
        assert_eq!(session.item(2).unwrap().index(), 2);
        assert!(session.items().iter().all(|i| !i.is_diff_cached()));
    }

    #[test]
    fn test_out_of_range_index() {
        let mut session = session(&["A"]);
        let err = session.start_edit(3).unwrap_err();
        assert!(matches!(err, RenditionError::ItemNotFound { index: 3, len: 1 }));
        assert!(session.item(1).is_err());
    }

    #[test]
    fn test_edits_are_isolated_per_item() {
        let mut session = session(&["A", "B"]);
        session.start_edit(0).unwrap();
        session.update_buffer(0, "A edited").unwrap();

        assert!(session.item(0).unwrap().is_editing());
        assert!(!session.item(1).unwrap().is_editing());
        assert!(session.update_buffer(1, "B edited").is_err());
    }
}
