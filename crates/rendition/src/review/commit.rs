//! Fire-and-forget persistence of committed translations.

use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::error::{RenditionError, Result};
use crate::store::{AcceptedTranslation, TranslationStore};

/// Handle to a save started by a commit.
///
/// The review state has already been updated by the time this exists.
/// Awaiting [`PendingSave::outcome`] only tells the caller whether the
/// save reached the store; dropping the handle lets the save finish
/// unobserved.
#[derive(Debug)]
pub struct PendingSave {
    entry: AcceptedTranslation,
    receiver: oneshot::Receiver<Result<()>>,
}

impl PendingSave {
    /// Start recording `entry` in the background.
    ///
    /// Runs on the Tokio blocking pool when called inside a runtime and on a
    /// dedicated thread otherwise, so the caller never waits on I/O.
    pub(crate) fn spawn(store: Arc<dyn TranslationStore>, entry: AcceptedTranslation) -> Self {
        let (sender, receiver) = oneshot::channel();
        let job_entry = entry.clone();
        let job = move || {
            let result = store.record(&job_entry);
            match &result {
                Ok(()) => debug!(store = store.name(), "translation saved"),
                Err(e) => warn!(
                    store = store.name(),
                    original = %job_entry.original,
                    error = %e,
                    "failed to save translation"
                ),
            }
            // The receiver may have been dropped; nobody is waiting then.
            let _ = sender.send(result);
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(job);
            }
            Err(_) => {
                std::thread::spawn(job);
            }
        }

        Self { entry, receiver }
    }

    /// The pair being saved.
    pub fn entry(&self) -> &AcceptedTranslation {
        &self.entry
    }

    /// Wait for the save to finish.
    pub async fn outcome(self) -> Result<()> {
        self.receiver.await.unwrap_or_else(|_| {
            Err(RenditionError::Persistence(
                "Save task ended without reporting a result".to_string(),
            ))
        })
    }
}
