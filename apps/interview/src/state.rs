use std::sync::Arc;

use crate::chat::service::ChatService;
use crate::interview::service::InterviewService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Fixed-catalog interview flow.
    pub interviews: Arc<InterviewService>,
    /// Open-ended checklist chat flow.
    pub chat: Arc<ChatService>,
}
