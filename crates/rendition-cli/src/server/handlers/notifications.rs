//! Notification handlers.

use axum::{extract::State, Json};

use crate::server::state::{AppState, Notification};

/// GET /api/notifications
///
/// Returns and clears everything queued since the last call.
pub async fn take_notifications(State(state): State<AppState>) -> Json<Vec<Notification>> {
    let mut queue = state.notifications.lock().await;
    Json(std::mem::take(&mut *queue))
}
