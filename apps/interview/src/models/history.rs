use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One durable row of the `interview_turns` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HistoryRow {
    pub id: i64,
    pub session_id: String,
    pub recorded_at: DateTime<Utc>,
    pub question: Option<String>,
    pub answer: Option<String>,
    /// Checklist field the answer fills in, when the question was a known one.
    pub field: Option<String>,
}
