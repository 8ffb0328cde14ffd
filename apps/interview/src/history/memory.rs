//! Test double: history kept in a Vec. Same ordering contract as the Postgres store.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::{HistoryError, HistoryStore, NewRecord};
use crate::models::history::HistoryRow;

#[derive(Default)]
pub struct InMemoryHistoryStore {
    rows: Mutex<Vec<HistoryRow>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn append_record(&self, record: NewRecord) -> Result<(), HistoryError> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as i64 + 1;
        rows.push(HistoryRow {
            id,
            session_id: record.session_id,
            recorded_at: Utc::now(),
            question: record.question,
            answer: record.answer,
            field: record.field,
        });
        Ok(())
    }

    async fn all_records(&self) -> Result<Vec<HistoryRow>, HistoryError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn session_records(&self, session_id: &str) -> Result<Vec<HistoryRow>, HistoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.session_id == session_id)
            .cloned()
            .collect())
    }
}
