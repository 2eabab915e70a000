//! Translation instruction handlers.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Instruction text, in both directions.
#[derive(Serialize, Deserialize)]
pub struct PromptBody {
    pub prompt: String,
}

/// GET /api/prompt
pub async fn get_prompt(State(state): State<AppState>) -> Result<Json<PromptBody>, ApiError> {
    Ok(Json(PromptBody {
        prompt: state.prompt.get()?,
    }))
}

/// PUT /api/prompt
pub async fn set_prompt(
    State(state): State<AppState>,
    Json(req): Json<PromptBody>,
) -> Result<Json<PromptBody>, ApiError> {
    state.prompt.set(&req.prompt)?;
    Ok(Json(req))
}
