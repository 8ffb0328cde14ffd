//! Interview service — drives sessions through the fixed question catalog.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::gateway::TextCompletionGateway;
use crate::history::{HistoryStore, NewRecord};
use crate::interview::catalog::QuestionCatalog;
use crate::interview::evaluation::EvaluationResult;
use crate::interview::rubric::render_rubric;
use crate::interview::session::{Advance, Exchange, Session, SessionError, SessionStatus};
use crate::interview::store::{SessionHandle, SessionStore};

#[derive(Debug, Clone, Serialize)]
pub struct StartedInterview {
    pub session_id: String,
    pub question: String,
    pub question_number: usize,
    pub total_questions: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnswerOutcome {
    Next {
        question: String,
        question_number: usize,
        total_questions: usize,
    },
    Completed,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterviewEvaluation {
    pub candidate_name: String,
    pub evaluated_at: DateTime<Utc>,
    pub evaluation: EvaluationResult,
    pub transcript: Vec<Exchange>,
}

pub struct InterviewService {
    catalog: Arc<QuestionCatalog>,
    sessions: Arc<dyn SessionStore>,
    history: Arc<dyn HistoryStore>,
    gateway: TextCompletionGateway,
}

impl InterviewService {
    pub fn new(
        catalog: Arc<QuestionCatalog>,
        sessions: Arc<dyn SessionStore>,
        history: Arc<dyn HistoryStore>,
        gateway: TextCompletionGateway,
    ) -> Self {
        Self {
            catalog,
            sessions,
            history,
            gateway,
        }
    }

    /// Opens a new session and returns its first question.
    pub async fn start(&self, candidate_name: &str) -> Result<StartedInterview, AppError> {
        let first = self
            .catalog
            .list_questions()
            .first()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("question catalog is empty")))?;

        let session = Session::start(candidate_name);
        let session_id = session.id.clone();
        self.sessions.put(session).await;
        info!("Started interview session {session_id} for '{candidate_name}'");

        Ok(StartedInterview {
            session_id,
            question: first.prompt.to_string(),
            question_number: 1,
            total_questions: self.catalog.len(),
        })
    }

    /// Records an answer to the current question and advances the session.
    ///
    /// The session lock is held across the durable append, so the stored history and the
    /// in-memory transcript advance together.
    pub async fn submit_answer(
        &self,
        session_id: &str,
        answer: &str,
    ) -> Result<AnswerOutcome, AppError> {
        let handle = self.session(session_id).await?;
        let mut session = handle.lock().await;

        let exchange = session
            .pending_exchange(&self.catalog, answer)
            .inspect_err(|e| warn!("Rejected answer: {e}"))?;
        let question_id = self
            .catalog
            .get(session.current_index())
            .map(|q| q.id.to_string());

        self.history
            .append_record(NewRecord {
                session_id: session.id.clone(),
                question: Some(exchange.question),
                answer: Some(exchange.answer),
                field: question_id,
            })
            .await?;

        let outcome = match session.record_answer(&self.catalog, answer)? {
            Advance::Next { question, position } => AnswerOutcome::Next {
                question: question.prompt.to_string(),
                question_number: position,
                total_questions: self.catalog.len(),
            },
            Advance::Completed => {
                info!("Interview session {session_id} completed");
                AnswerOutcome::Completed
            }
        };
        Ok(outcome)
    }

    pub async fn status(&self, session_id: &str) -> Result<SessionStatus, AppError> {
        let handle = self.session(session_id).await?;
        let session = handle.lock().await;
        Ok(session.status(&self.catalog))
    }

    /// Evaluates a completed interview.
    ///
    /// The transcript is snapshotted and the lock released before the gateway call,
    /// so a slow provider never blocks status reads on the same session.
    pub async fn evaluate(&self, session_id: &str) -> Result<InterviewEvaluation, AppError> {
        let handle = self.session(session_id).await?;

        let (candidate_name, transcript) = {
            let session = handle.lock().await;
            session
                .ensure_evaluable()
                .inspect_err(|e| warn!("Rejected evaluation: {e}"))?;
            (session.candidate_name.clone(), session.transcript.clone())
        };

        let evaluation = self.gateway.evaluate(&transcript, &render_rubric()).await?;

        handle.lock().await.mark_evaluated()?;
        info!(
            "Interview session {session_id} evaluated: {:?}",
            evaluation.recommendation
        );

        Ok(InterviewEvaluation {
            candidate_name,
            evaluated_at: Utc::now(),
            evaluation,
            transcript,
        })
    }

    async fn session(&self, session_id: &str) -> Result<SessionHandle, AppError> {
        self.sessions
            .get(session_id)
            .await
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()).into())
    }
}
