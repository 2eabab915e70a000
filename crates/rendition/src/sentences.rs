//! Sentence navigation.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{RenditionError, Result};
use crate::store::TranslationStore;

/// Navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Previous,
}

/// Position in the sentence list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceCursor {
    /// The current sentence.
    pub sentence: String,
    /// Zero-based index of the current sentence.
    pub index: usize,
    /// Number of sentences.
    pub total: usize,
    /// Number of sentences that already have an accepted translation.
    pub completed: usize,
}

impl SentenceCursor {
    /// Fraction of sentences with an accepted translation (0.0-1.0).
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

/// Source of sentences to review, one at a time.
pub trait SentenceSource: Send + Sync {
    /// The current sentence, or `None` if there are no sentences.
    fn current(&self) -> Result<Option<SentenceCursor>>;

    /// Move the cursor. Stops at either end of the list.
    fn advance(&mut self, direction: Direction);
}

/// Ordered in-memory list of sentences.
pub struct SentenceList {
    sentences: Vec<String>,
    position: usize,
    store: Option<Arc<dyn TranslationStore>>,
}

impl SentenceList {
    /// Create from sentences; blank entries are dropped.
    pub fn new<S: Into<String>>(sentences: impl IntoIterator<Item = S>) -> Self {
        let sentences = sentences
            .into_iter()
            .map(Into::into)
            .map(|s: String| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Self {
            sentences,
            position: 0,
            store: None,
        }
    }

    /// Load one sentence per non-blank line of a text file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| RenditionError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::new(content.lines()))
    }

    /// Count completed sentences against this store.
    pub fn with_store(mut self, store: Arc<dyn TranslationStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Number of sentences.
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// All sentences, in order.
    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    /// Jump to a position, clamped to the list.
    pub fn seek(&mut self, index: usize) {
        self.position = index.min(self.sentences.len().saturating_sub(1));
    }

    fn completed(&self) -> Result<usize> {
        let Some(store) = &self.store else {
            return Ok(0);
        };
        let done: HashSet<String> = store.entries()?.into_iter().map(|e| e.original).collect();
        Ok(self.sentences.iter().filter(|s| done.contains(*s)).count())
    }
}

impl SentenceSource for SentenceList {
    fn current(&self) -> Result<Option<SentenceCursor>> {
        let Some(sentence) = self.sentences.get(self.position) else {
            return Ok(None);
        };
        Ok(Some(SentenceCursor {
            sentence: sentence.clone(),
            index: self.position,
            total: self.sentences.len(),
            completed: self.completed()?,
        }))
    }

    fn advance(&mut self, direction: Direction) {
        match direction {
            Direction::Next => {
                if self.position + 1 < self.sentences.len() {
                    self.position += 1;
                }
            }
            Direction::Previous => self.position = self.position.saturating_sub(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{AcceptedTranslation, MemoryStore};

    #[test]
    fn test_navigation_clamps() {
        let mut list = SentenceList::new(["one", "", "  two  ", "three"]);
        assert_eq!(list.len(), 3);

        list.advance(Direction::Previous);
        assert_eq!(list.current().unwrap().unwrap().index, 0);

        list.advance(Direction::Next);
        let cursor = list.current().unwrap().unwrap();
        assert_eq!(cursor.sentence, "two");
        assert_eq!(cursor.total, 3);

        list.advance(Direction::Next);
        list.advance(Direction::Next);
        assert_eq!(list.current().unwrap().unwrap().sentence, "three");
    }

    #[test]
    fn test_empty_list() {
        let mut list = SentenceList::new(Vec::<String>::new());
        list.advance(Direction::Next);
        assert!(list.current().unwrap().is_none());
    }

    #[test]
    fn test_completed_counts_store_entries() {
        let store = Arc::new(MemoryStore::new());
        store.record(&AcceptedTranslation::new("two", "dois")).unwrap();
        store.record(&AcceptedTranslation::new("other", "outro")).unwrap();

        let list = SentenceList::new(["one", "two"]).with_store(store);
        let cursor = list.current().unwrap().unwrap();
        assert_eq!(cursor.completed, 1);
        assert_eq!(cursor.progress(), 0.5);
    }
}
