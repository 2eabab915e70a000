//! Sentence navigation handlers.

use axum::{extract::State, Json};

use rendition::{Direction, SentenceCursor};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// GET /api/sentence
pub async fn get_sentence(
    State(state): State<AppState>,
) -> Result<Json<Option<SentenceCursor>>, ApiError> {
    let sentences = state.sentences.lock().await;
    Ok(Json(sentences.current()?))
}

/// POST /api/sentence/next
pub async fn next_sentence(
    State(state): State<AppState>,
) -> Result<Json<Option<SentenceCursor>>, ApiError> {
    move_cursor(state, Direction::Next).await
}

/// POST /api/sentence/previous
pub async fn previous_sentence(
    State(state): State<AppState>,
) -> Result<Json<Option<SentenceCursor>>, ApiError> {
    move_cursor(state, Direction::Previous).await
}

async fn move_cursor(
    state: AppState,
    direction: Direction,
) -> Result<Json<Option<SentenceCursor>>, ApiError> {
    let mut sentences = state.sentences.lock().await;
    sentences.advance(direction);

    // Candidates belong to the sentence they were generated for.
    let mut session = state.session.lock().await;
    session.take();
    state.bump_epoch();
    drop(session);

    Ok(Json(sentences.current()?))
}
