//! Conversation history store — durable, append-only record of every turn.
//!
//! Each call writes exactly one row with a single INSERT, so concurrent readers never
//! observe a partial record. Turns are returned ordered by `recorded_at`, ties broken by
//! insertion order (`id`).

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use thiserror::Error;

use crate::models::history::HistoryRow;
use crate::models::transcript::{Role, Turn};

#[cfg(test)]
pub mod memory;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// One row to be appended. A row may carry a question, an answer, or both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewRecord {
    pub session_id: String,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub field: Option<String>,
}

impl NewRecord {
    /// Row for a single turn; the services write whole exchanges through `append_record`.
    #[allow(dead_code)]
    pub fn turn(session_id: &str, role: Role, text: &str) -> Self {
        let (question, answer) = match role {
            Role::Bot => (Some(text.to_string()), None),
            Role::Candidate => (None, Some(text.to_string())),
        };
        Self {
            session_id: session_id.to_string(),
            question,
            answer,
            field: None,
        }
    }
}

#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn append_record(&self, record: NewRecord) -> Result<(), HistoryError>;

    /// Returns every stored row, oldest first.
    async fn all_records(&self) -> Result<Vec<HistoryRow>, HistoryError>;

    /// Returns the rows of one session, oldest first.
    async fn session_records(&self, session_id: &str) -> Result<Vec<HistoryRow>, HistoryError>;

    /// Records a single turn.
    #[allow(dead_code)]
    async fn append(&self, session_id: &str, role: Role, text: &str) -> Result<(), HistoryError> {
        self.append_record(NewRecord::turn(session_id, role, text))
            .await
    }

    /// Ordered transcript of a session. Unknown sessions yield an empty transcript.
    async fn history(&self, session_id: &str) -> Result<Vec<Turn>, HistoryError> {
        let rows = self.session_records(session_id).await?;
        Ok(rows_to_turns(&rows))
    }
}

/// Expands stored rows into turns: a row's question precedes its answer.
pub fn rows_to_turns(rows: &[HistoryRow]) -> Vec<Turn> {
    let mut turns = Vec::with_capacity(rows.len() * 2);
    for row in rows {
        if let Some(question) = &row.question {
            turns.push(Turn::bot(question.clone()));
        }
        if let Some(answer) = &row.answer {
            turns.push(Turn::candidate(answer.clone()));
        }
    }
    turns
}

/// PostgreSQL-backed history store.
#[derive(Clone)]
pub struct PgHistoryStore {
    pool: PgPool,
}

impl PgHistoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryStore for PgHistoryStore {
    async fn append_record(&self, record: NewRecord) -> Result<(), HistoryError> {
        sqlx::query(
            r#"
            INSERT INTO interview_turns (session_id, recorded_at, question, answer, field)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.session_id)
        .bind(Utc::now())
        .bind(record.question)
        .bind(record.answer)
        .bind(record.field)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn all_records(&self) -> Result<Vec<HistoryRow>, HistoryError> {
        Ok(sqlx::query_as::<_, HistoryRow>(
            "SELECT * FROM interview_turns ORDER BY recorded_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn session_records(&self, session_id: &str) -> Result<Vec<HistoryRow>, HistoryError> {
        Ok(sqlx::query_as::<_, HistoryRow>(
            r#"
            SELECT * FROM interview_turns
            WHERE session_id = $1
            ORDER BY recorded_at ASC, id ASC
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?)
    }
}
