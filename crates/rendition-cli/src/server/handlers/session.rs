//! Review item handlers: edit, cancel, buffer, commit.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use tokio::sync::MutexGuard;

use rendition::{ItemView, ReviewItem, ReviewSession};

use super::translate::SessionResponse;
use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Request body for replacing an edit buffer.
#[derive(Deserialize)]
pub struct BufferRequest {
    pub text: String,
}

/// Request body for committing an item.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct CommitRequest {
    /// Text to accept; the buffer or current text when absent.
    pub text: Option<String>,
}

fn active<'a>(
    guard: &'a mut MutexGuard<'_, Option<ReviewSession>>,
) -> Result<&'a mut ReviewSession, ApiError> {
    guard
        .as_mut()
        .ok_or_else(|| ApiError::NotFound("No active review session".to_string()))
}

/// Render a detached copy of an item on the blocking pool.
///
/// Diffs can be expensive for long text, so they are never computed while
/// the session lock is held or on a runtime worker.
async fn render_item(item: ReviewItem) -> Result<ItemView, ApiError> {
    Ok(tokio::task::spawn_blocking(move || item.view()).await?)
}

/// GET /api/session
pub async fn get_session(State(state): State<AppState>) -> Result<Json<SessionResponse>, ApiError> {
    let (source, items) = {
        let mut guard = state.session.lock().await;
        let session = active(&mut guard)?;
        (session.source().to_string(), session.items().to_vec())
    };
    let response = tokio::task::spawn_blocking(move || SessionResponse::new(source, &items)).await?;
    Ok(Json(response))
}

/// POST /api/session/items/:index/edit
pub async fn start_edit(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<ItemView>, ApiError> {
    let item = {
        let mut guard = state.session.lock().await;
        let session = active(&mut guard)?;
        session.start_edit(index)?;
        session.item(index)?.clone()
    };
    Ok(Json(render_item(item).await?))
}

/// POST /api/session/items/:index/cancel
pub async fn cancel_edit(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<ItemView>, ApiError> {
    let item = {
        let mut guard = state.session.lock().await;
        let session = active(&mut guard)?;
        session.cancel_edit(index)?;
        session.item(index)?.clone()
    };
    Ok(Json(render_item(item).await?))
}

/// PUT /api/session/items/:index/buffer
pub async fn update_buffer(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(req): Json<BufferRequest>,
) -> Result<Json<ItemView>, ApiError> {
    let item = {
        let mut guard = state.session.lock().await;
        let session = active(&mut guard)?;
        session.update_buffer(index, req.text)?;
        session.item(index)?.clone()
    };
    Ok(Json(render_item(item).await?))
}

/// POST /api/session/items/:index/commit
///
/// Responds with the committed item right away. The save finishes in the
/// background; a failure shows up in `/api/notifications` and leaves the
/// item as committed.
pub async fn commit_item(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(req): Json<CommitRequest>,
) -> Result<Json<ItemView>, ApiError> {
    let (pending, item) = {
        let mut guard = state.session.lock().await;
        let session = active(&mut guard)?;
        let pending = match req.text {
            Some(text) => session.commit(index, text)?,
            None => session.commit_as_is(index)?,
        };
        (pending, session.item(index)?.clone())
    };

    let watcher = state.clone();
    tokio::spawn(async move {
        if let Err(e) = pending.outcome().await {
            watcher.notify(Some(index), e.to_string()).await;
        }
    });

    Ok(Json(render_item(item).await?))
}
