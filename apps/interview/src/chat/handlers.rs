use axum::{extract::State, Json};

use crate::chat::service::{ChatRequest, ChatResponse};
use crate::errors::AppError;
use crate::models::history::HistoryRow;
use crate::state::AppState;

/// POST /api/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    Ok(Json(state.chat.process_message(request).await?))
}

/// GET /api/responses
/// Dumps every stored row, oldest first.
pub async fn handle_responses(
    State(state): State<AppState>,
) -> Result<Json<Vec<HistoryRow>>, AppError> {
    Ok(Json(state.chat.all_responses().await?))
}
