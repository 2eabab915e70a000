//! Persistence for accepted translations.
//!
//! A store records `(original, translation)` pairs as reviewers commit
//! candidates, and reads them back to give the generator few-shot context.
//!
//! # Supported Stores
//!
//! - **TextFileStore** - Append-only `Original:`/`Translation:` text file
//! - **JsonlStore** - One JSON object per line, with timestamps
//! - **MemoryStore** - In-process, for tests and dry runs

mod jsonl;
mod memory;
mod text;

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RenditionError, Result};

pub use jsonl::JsonlStore;
pub use memory::MemoryStore;
pub use text::TextFileStore;

/// A source sentence together with the translation a reviewer accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptedTranslation {
    /// The source sentence.
    pub original: String,

    /// The accepted translation.
    pub translation: String,

    /// When the translation was accepted, if the store keeps timestamps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<DateTime<Utc>>,
}

impl AcceptedTranslation {
    /// Create an entry stamped with the current time.
    pub fn new(original: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            translation: translation.into(),
            accepted_at: Some(Utc::now()),
        }
    }

    /// Reject entries with a blank original or translation.
    pub fn validate(&self) -> Result<()> {
        if self.original.trim().is_empty() || self.translation.trim().is_empty() {
            return Err(RenditionError::Persistence("Missing data".to_string()));
        }
        Ok(())
    }
}

/// Trait for translation stores.
///
/// Implementations must be thread-safe (Send + Sync): commits are recorded
/// from a blocking worker thread while the review session keeps running.
pub trait TranslationStore: Send + Sync {
    /// Durably record an accepted translation.
    fn record(&self, entry: &AcceptedTranslation) -> Result<()>;

    /// All recorded entries, oldest first.
    fn entries(&self) -> Result<Vec<AcceptedTranslation>>;

    /// Get the name of this store (for logging/debugging).
    fn name(&self) -> &str;

    /// Whether `original` already has an accepted translation.
    fn contains(&self, original: &str) -> Result<bool> {
        Ok(self.entries()?.iter().any(|e| e.original == original))
    }
}

/// Append one complete record to `path`, creating the file and its parent
/// directories as needed.
///
/// The record goes out in a single `write_all` on an append-mode handle.
/// Callers still hold their own write lock so concurrent commits from
/// different threads never interleave.
pub(crate) fn append_record(path: &Path, record: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                RenditionError::Persistence(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            RenditionError::Persistence(format!("Failed to open '{}': {}", path.display(), e))
        })?;

    file.write_all(record.as_bytes()).map_err(|e| {
        RenditionError::Persistence(format!("Failed to write '{}': {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_blank_fields() {
        assert!(AcceptedTranslation::new("Hello", "Olá").validate().is_ok());

        let err = AcceptedTranslation::new("", "Olá").validate().unwrap_err();
        assert!(matches!(err, RenditionError::Persistence(ref m) if m == "Missing data"));
        assert!(AcceptedTranslation::new("Hello", "  ").validate().is_err());
    }

    #[test]
    fn test_timestamp_is_optional_in_json() {
        let entry = AcceptedTranslation {
            original: "a".to_string(),
            translation: "b".to_string(),
            accepted_at: None,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"original":"a","translation":"b"}"#);

        let back: AcceptedTranslation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
