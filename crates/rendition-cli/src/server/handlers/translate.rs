//! Candidate generation handlers.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use rendition::{AcceptedTranslation, ItemView, ModelSelector, ReviewItem, ReviewSession};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Request body for generating candidates.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct TranslateRequest {
    /// Sentence to translate; the current sentence when absent.
    pub original_sentence: Option<String>,
    /// Translations the reviewer already saw for this sentence.
    pub saved_translations: Option<Vec<String>>,
    pub model: Option<ModelSelector>,
}

/// Review session as returned to the client.
#[derive(Serialize)]
pub struct SessionResponse {
    pub source: String,
    /// Current text of every candidate, in order.
    pub alternatives: Vec<String>,
    pub items: Vec<ItemView>,
}

impl SessionResponse {
    /// Build the response from items, computing any missing diffs.
    pub fn new(source: impl Into<String>, items: &[ReviewItem]) -> Self {
        Self {
            source: source.into(),
            alternatives: items.iter().map(|i| i.text().to_string()).collect(),
            items: items.iter().map(ReviewItem::view).collect(),
        }
    }
}

impl From<&ReviewSession> for SessionResponse {
    fn from(session: &ReviewSession) -> Self {
        Self::new(session.source(), session.items())
    }
}

/// Request body for saving a translation directly.
#[derive(Deserialize)]
pub struct SaveRequest {
    #[serde(default)]
    pub original_sentence: String,
    #[serde(default)]
    pub translation: String,
}

/// POST /api/translate
///
/// Replaces the current session only when generation succeeds and the
/// reviewer has not moved to another sentence in the meantime; a result that
/// went stale that way is dropped with `409 Conflict`.
pub async fn translate(
    State(state): State<AppState>,
    Json(req): Json<TranslateRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let source = match req.original_sentence {
        Some(sentence) => sentence,
        None => state
            .sentences
            .lock()
            .await
            .current()?
            .map(|cursor| cursor.sentence)
            .unwrap_or_default(),
    };

    if source.trim().is_empty() {
        return Err(ApiError::BadRequest("No sentence provided".to_string()));
    }

    let epoch = state.epoch();
    let rendition = Arc::clone(&state.rendition);
    let prior = req.saved_translations.unwrap_or_default();
    let model = req.model.unwrap_or_default();

    let (session, response) = tokio::task::spawn_blocking(move || {
        rendition.review(&source, prior, model).map(|session| {
            let response = SessionResponse::from(&session);
            (session, response)
        })
    })
    .await?
    .inspect_err(|e| warn!(error = %e, "candidate generation failed"))?;

    let mut current = state.session.lock().await;
    if state.epoch() != epoch {
        info!("sentence changed during generation; dropping candidates");
        return Err(ApiError::Conflict(
            "Sentence changed while candidates were generated".to_string(),
        ));
    }
    *current = Some(session);

    Ok(Json(response))
}

/// POST /api/save_translation
pub async fn save_translation(
    State(state): State<AppState>,
    Json(req): Json<SaveRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let entry = AcceptedTranslation::new(req.original_sentence, req.translation);
    if entry.validate().is_err() {
        return Err(ApiError::BadRequest("Missing data".to_string()));
    }

    let store = Arc::clone(state.store());
    tokio::task::spawn_blocking(move || store.record(&entry)).await??;

    Ok(Json(serde_json::json!({ "success": true })))
}
