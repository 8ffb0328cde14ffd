//! Interview session state machine.
//!
//! `NotStarted → InProgress → Completed → Evaluated`. `NotStarted` is the absence of a
//! session; `Session::start` lands directly in `InProgress`. The question pointer is the
//! transcript length, so "transcript length == current index" holds by construction.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::interview::catalog::{Question, QuestionCatalog};
use crate::interview::rubric::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    InProgress,
    Completed,
    Evaluated,
}

/// One answered question. Appended, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub question: String,
    pub answer: String,
    pub category: Category,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Interview session {0} not found")]
    NotFound(String),

    #[error("Interview session {0} is already completed")]
    AlreadyCompleted(String),

    #[error("Interview session {0} is not yet completed")]
    NotYetCompleted(String),
}

/// Result of the `InProgress` answer transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance<'c> {
    Next {
        question: &'c Question,
        /// 1-based position of `question`.
        position: usize,
    },
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStatus {
    pub candidate_name: String,
    pub completed: bool,
    pub current_question: usize,
    pub total_questions: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: String,
    pub candidate_name: String,
    pub phase: SessionPhase,
    pub transcript: Vec<Exchange>,
}

impl Session {
    pub fn start(candidate_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            candidate_name: candidate_name.into(),
            phase: SessionPhase::InProgress,
            transcript: Vec::new(),
        }
    }

    /// Zero-based index of the next question to ask.
    pub fn current_index(&self) -> usize {
        self.transcript.len()
    }

    pub fn is_completed(&self) -> bool {
        !matches!(self.phase, SessionPhase::InProgress)
    }

    /// Builds the exchange the given answer would record, without mutating the session.
    /// Fails with `AlreadyCompleted` once every question has been answered.
    pub fn pending_exchange(
        &self,
        catalog: &QuestionCatalog,
        answer: &str,
    ) -> Result<Exchange, SessionError> {
        if self.is_completed() {
            return Err(SessionError::AlreadyCompleted(self.id.clone()));
        }
        let question = catalog
            .get(self.current_index())
            .ok_or_else(|| SessionError::AlreadyCompleted(self.id.clone()))?;
        Ok(Exchange {
            question: question.prompt.to_string(),
            answer: answer.to_string(),
            category: question.category,
        })
    }

    /// Applies the answer transition: append, advance, and complete on the last question.
    pub fn record_answer<'c>(
        &mut self,
        catalog: &'c QuestionCatalog,
        answer: &str,
    ) -> Result<Advance<'c>, SessionError> {
        let exchange = self.pending_exchange(catalog, answer)?;
        self.transcript.push(exchange);

        let index = self.current_index();
        match catalog.get(index) {
            Some(question) => Ok(Advance::Next {
                question,
                position: index + 1,
            }),
            None => {
                self.phase = SessionPhase::Completed;
                Ok(Advance::Completed)
            }
        }
    }

    /// Checks that the session may be evaluated. Re-evaluation of an evaluated session is allowed.
    pub fn ensure_evaluable(&self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::InProgress => Err(SessionError::NotYetCompleted(self.id.clone())),
            SessionPhase::Completed | SessionPhase::Evaluated => Ok(()),
        }
    }

    /// `Completed → Evaluated`.
    pub fn mark_evaluated(&mut self) -> Result<(), SessionError> {
        self.ensure_evaluable()?;
        self.phase = SessionPhase::Evaluated;
        Ok(())
    }

    pub fn status(&self, catalog: &QuestionCatalog) -> SessionStatus {
        let current_question = if self.is_completed() {
            catalog.len()
        } else {
            self.current_index() + 1
        };
        SessionStatus {
            candidate_name: self.candidate_name.clone(),
            completed: self.is_completed(),
            current_question,
            total_questions: catalog.len(),
        }
    }
}
