//! Test double: a provider that replays canned responses and records requests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{CompletionProvider, CompletionRequest, LlmError};

pub enum Scripted {
    Text(String),
    Fail(LlmError),
    /// Never answers within any realistic timeout.
    Stall,
}

#[derive(Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<Scripted>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(vec![Scripted::Text(text.to_string())])
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request);
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Text(text)) => Ok(text),
            Some(Scripted::Fail(err)) => Err(err),
            Some(Scripted::Stall) => {
                tokio::time::sleep(Duration::from_secs(24 * 60 * 60)).await;
                Err(LlmError::EmptyContent)
            }
            None => Err(LlmError::EmptyContent),
        }
    }
}
