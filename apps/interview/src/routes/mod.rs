pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::chat::handlers as chat;
use crate::interview::handlers as interview;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Fixed-catalog interview
        .route("/interview/start", post(interview::handle_start))
        .route("/interview/answer", post(interview::handle_answer))
        .route(
            "/interview/evaluate/:session_id",
            post(interview::handle_evaluate),
        )
        .route(
            "/interview/status/:session_id",
            get(interview::handle_status),
        )
        // Open-ended checklist chat
        .route("/api/chat", post(chat::handle_chat))
        .route("/api/responses", get(chat::handle_responses))
        .with_state(state)
}
