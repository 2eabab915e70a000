//! Plain-text translation log.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::error::{RenditionError, Result};

use super::{append_record, AcceptedTranslation, TranslationStore};

const ORIGINAL_PREFIX: &str = "Original: ";
const TRANSLATION_PREFIX: &str = "Translation: ";

/// Append-only text store.
///
/// Each entry is written as:
///
/// ```text
/// Original: The big red fox ate a steak.
/// Translation: A grande raposa vermelha comeu um bife.
///
/// ```
///
/// The file doubles as the few-shot context handed to the generator, so it
/// is kept human readable. The format is line-oriented: line breaks inside a
/// sentence are written as single spaces. Use [`super::JsonlStore`] when
/// multi-line sentences must round-trip.
pub struct TextFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl TextFileStore {
    /// Create a store backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw file content, or an empty string if nothing was recorded yet.
    pub fn context_block(&self) -> Result<String> {
        if !self.path.exists() {
            return Ok(String::new());
        }
        fs::read_to_string(&self.path).map_err(|e| RenditionError::Io {
            path: self.path.clone(),
            source: e,
        })
    }
}

impl TranslationStore for TextFileStore {
    fn record(&self, entry: &AcceptedTranslation) -> Result<()> {
        entry.validate()?;

        let original = flatten(&entry.original);
        let translation = flatten(&entry.translation);
        if original != entry.original || translation != entry.translation {
            debug!(
                path = %self.path.display(),
                "flattened multi-line translation; use a .jsonl store to keep line breaks"
            );
        }
        let block = format!("{ORIGINAL_PREFIX}{original}\n{TRANSLATION_PREFIX}{translation}\n\n");

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RenditionError::Persistence("Text store lock poisoned".to_string()))?;
        append_record(&self.path, &block)?;

        debug!(path = %self.path.display(), "recorded translation");
        Ok(())
    }

    fn entries(&self) -> Result<Vec<AcceptedTranslation>> {
        Ok(parse_entries(&self.context_block()?))
    }

    /// Matches `original` as it was stored, with line breaks flattened.
    fn contains(&self, original: &str) -> Result<bool> {
        let original = flatten(original);
        Ok(self.entries()?.iter().any(|e| e.original == original))
    }

    fn name(&self) -> &str {
        "text"
    }
}

/// Collapse each line break (`\n`, `\r\n` or `\r`) into one space.
fn flatten(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

/// Parse `Original:`/`Translation:` pairs. Lines that don't fit the pattern
/// (hand-written notes, a dangling original) are skipped.
fn parse_entries(content: &str) -> Vec<AcceptedTranslation> {
    let mut entries = Vec::new();
    let mut pending: Option<&str> = None;

    for line in content.lines() {
        if let Some(original) = line.strip_prefix(ORIGINAL_PREFIX) {
            pending = Some(original);
        } else if let Some(translation) = line.strip_prefix(TRANSLATION_PREFIX) {
            if let Some(original) = pending.take() {
                entries.push(AcceptedTranslation {
                    original: original.to_string(),
                    translation: translation.to_string(),
                    accepted_at: None,
                });
            }
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entries() {
        let content = "Some preamble\n\
                       Original: Hello\n\
                       Translation: Olá\n\
                       \n\
                       Original: orphan\n\
                       Original: Bye\n\
                       Translation: Tchau\n";
        let entries = parse_entries(content);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].original, "Hello");
        assert_eq!(entries[0].translation, "Olá");
        assert_eq!(entries[1].original, "Bye");
        assert!(entries[1].accepted_at.is_none());
    }

    #[test]
    fn test_missing_file_is_empty() {
        let store = TextFileStore::new("/nonexistent/dir/translation.txt");
        assert_eq!(store.context_block().unwrap(), "");
        assert!(store.entries().unwrap().is_empty());
    }

    #[test]
    fn test_multi_line_entries_are_flattened() {
        assert_eq!(flatten("one\ntwo\r\nthree\rfour"), "one two three four");

        let dir = tempfile::TempDir::new().unwrap();
        let store = TextFileStore::new(dir.path().join("translation.txt"));
        store
            .record(&AcceptedTranslation::new("Line one\nline two", "Linha um\r\nlinha dois"))
            .unwrap();

        let entries = store.entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].original, "Line one line two");
        assert_eq!(entries[0].translation, "Linha um linha dois");
        assert!(store.contains("Line one\nline two").unwrap());
    }
}
