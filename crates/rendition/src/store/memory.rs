//! In-memory translation store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::error::{RenditionError, Result};

use super::{AcceptedTranslation, TranslationStore};

/// Store that keeps entries in process memory.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<AcceptedTranslation>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose writes always fail, to exercise error paths.
    pub fn failing() -> Self {
        let store = Self::default();
        store.fail_writes.store(true, Ordering::SeqCst);
        store
    }

    /// Toggle write failures.
    pub fn set_failing(&self, failing: bool) {
        self.fail_writes.store(failing, Ordering::SeqCst);
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// Whether nothing was recorded yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<AcceptedTranslation>>> {
        self.entries
            .lock()
            .map_err(|_| RenditionError::Persistence("Memory store lock poisoned".to_string()))
    }
}

impl TranslationStore for MemoryStore {
    fn record(&self, entry: &AcceptedTranslation) -> Result<()> {
        entry.validate()?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RenditionError::Persistence(
                "Failed to save translation".to_string(),
            ));
        }
        self.lock()?.push(entry.clone());
        Ok(())
    }

    fn entries(&self) -> Result<Vec<AcceptedTranslation>> {
        Ok(self.lock()?.clone())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
