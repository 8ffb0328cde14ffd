//! Axum route handlers for the fixed-catalog interview API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::interview::evaluation::EvaluationResult;
use crate::interview::service::{AnswerOutcome, StartedInterview};
use crate::interview::session::{Exchange, SessionStatus};
use crate::state::AppState;

const COMPLETION_MESSAGE: &str = "Interview completed. You can now request the evaluation.";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StartRequest {
    pub candidate_name: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub session_id: String,
    pub answer: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AnswerResponse {
    Completed {
        completed: bool,
        message: String,
    },
    Next {
        completed: bool,
        question: String,
        question_number: usize,
        total_questions: usize,
    },
}

impl From<AnswerOutcome> for AnswerResponse {
    fn from(outcome: AnswerOutcome) -> Self {
        match outcome {
            AnswerOutcome::Completed => AnswerResponse::Completed {
                completed: true,
                message: COMPLETION_MESSAGE.to_string(),
            },
            AnswerOutcome::Next {
                question,
                question_number,
                total_questions,
            } => AnswerResponse::Next {
                completed: false,
                question,
                question_number,
                total_questions,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub candidate_name: String,
    /// ISO-8601 evaluation timestamp.
    pub date: String,
    pub evaluation: EvaluationResult,
    pub conversation_history: Vec<Exchange>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /interview/start
pub async fn handle_start(
    State(state): State<AppState>,
    Json(request): Json<StartRequest>,
) -> Result<Json<StartedInterview>, AppError> {
    let started = state.interviews.start(&request.candidate_name).await?;
    Ok(Json(started))
}

/// POST /interview/answer
pub async fn handle_answer(
    State(state): State<AppState>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    let outcome = state
        .interviews
        .submit_answer(&request.session_id, &request.answer)
        .await?;
    Ok(Json(outcome.into()))
}

/// POST /interview/evaluate/:session_id
///
/// 404 for unknown sessions, 400 while questions remain unanswered.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<EvaluateResponse>, AppError> {
    let result = state.interviews.evaluate(&session_id).await?;
    Ok(Json(EvaluateResponse {
        candidate_name: result.candidate_name,
        date: result.evaluated_at.to_rfc3339(),
        evaluation: result.evaluation,
        conversation_history: result.transcript,
    }))
}

/// GET /interview/status/:session_id
pub async fn handle_status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionStatus>, AppError> {
    Ok(Json(state.interviews.status(&session_id).await?))
}
