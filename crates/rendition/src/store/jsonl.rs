//! JSON Lines translation log.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{RenditionError, Result};

use super::{append_record, AcceptedTranslation, TranslationStore};

/// Store that writes one JSON object per line.
///
/// Unlike [`super::TextFileStore`] this keeps acceptance timestamps and
/// tolerates newlines inside sentences.
pub struct JsonlStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlStore {
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
}

impl TranslationStore for JsonlStore {
    fn record(&self, entry: &AcceptedTranslation) -> Result<()> {
        entry.validate()?;

        let mut line = serde_json::to_string(entry).map_err(|e| {
            RenditionError::Persistence(format!("Failed to serialize translation: {}", e))
        })?;
        line.push('\n');

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RenditionError::Persistence("JSONL store lock poisoned".to_string()))?;
        append_record(&self.path, &line)
    }

    fn entries(&self) -> Result<Vec<AcceptedTranslation>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path).map_err(|e| RenditionError::Io {
            path: self.path.clone(),
            source: e,
        })?;

        let mut entries = Vec::new();
        for (number, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| RenditionError::Io {
                path: self.path.clone(),
                source: e,
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let entry: AcceptedTranslation = serde_json::from_str(&line).map_err(|e| {
                RenditionError::Persistence(format!(
                    "Failed to parse '{}' line {}: {}",
                    self.path.display(),
                    number + 1,
                    e
                ))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    fn name(&self) -> &str {
        "jsonl"
    }
}
