//! Session store — where live interview sessions are kept.
//!
//! Each session sits behind its own async mutex. Holding a `SessionHandle` lock
//! serializes every mutation of that session; different sessions never contend.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::interview::session::Session;

pub type SessionHandle = Arc<Mutex<Session>>;

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, session_id: &str) -> Option<SessionHandle>;

    /// Inserts a session, returning its handle. Replaces any session with the same id.
    async fn put(&self, session: Session) -> SessionHandle;

    /// Removes a session. Not routed yet; kept for stores with explicit cleanup.
    #[allow(dead_code)]
    async fn delete(&self, session_id: &str) -> Option<SessionHandle>;
}

/// In-process session table. Sessions are never expired.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, SessionHandle>> {
        self.sessions.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn table_mut(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, SessionHandle>> {
        self.sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_id: &str) -> Option<SessionHandle> {
        self.table().get(session_id).cloned()
    }

    async fn put(&self, session: Session) -> SessionHandle {
        let id = session.id.clone();
        let handle = Arc::new(Mutex::new(session));
        self.table_mut().insert(id, Arc::clone(&handle));
        handle
    }

    async fn delete(&self, session_id: &str) -> Option<SessionHandle> {
        self.table_mut().remove(session_id)
    }
}
