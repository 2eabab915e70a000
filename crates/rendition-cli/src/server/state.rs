//! Application state for the web server.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use rendition::{
    PromptStore, Rendition, ReviewSession, SentenceSource, TranslationProvider, TranslationStore,
};

/// A message for the reviewer that arrived after the request that caused it.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    /// Item the message is about, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub message: String,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Generates candidates and opens sessions.
    pub rendition: Arc<Rendition>,
    /// Sentences left to review.
    pub sentences: Arc<Mutex<Box<dyn SentenceSource>>>,
    /// Review of the current sentence, once candidates were generated.
    pub session: Arc<Mutex<Option<ReviewSession>>>,
    /// Bumped on every cursor move, while the session lock is held.
    pub epoch: Arc<AtomicU64>,
    /// Translation instructions.
    pub prompt: Arc<dyn PromptStore>,
    /// Failures reported by background saves, drained by the client.
    pub notifications: Arc<Mutex<Vec<Notification>>>,
}

impl AppState {
    /// Create new application state.
    pub fn new(
        provider: Arc<dyn TranslationProvider>,
        store: Arc<dyn TranslationStore>,
        sentences: Box<dyn SentenceSource>,
        prompt: Arc<dyn PromptStore>,
    ) -> Self {
        let rendition = Rendition::new(provider, store).with_prompt(Arc::clone(&prompt));
        Self {
            rendition: Arc::new(rendition),
            sentences: Arc::new(Mutex::new(sentences)),
            session: Arc::new(Mutex::new(None)),
            epoch: Arc::new(AtomicU64::new(0)),
            prompt,
            notifications: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The translation store.
    pub fn store(&self) -> &Arc<dyn TranslationStore> {
        self.rendition.store()
    }

    /// Current navigation epoch.
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Mark the cursor as moved. Sessions generated before this call are
    /// no longer installed.
    pub fn bump_epoch(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }

    /// Queue a notification for the client.
    pub async fn notify(&self, index: Option<usize>, message: impl Into<String>) {
        self.notifications.lock().await.push(Notification {
            index,
            message: message.into(),
        });
    }
}
