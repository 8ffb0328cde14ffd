//! Text-Completion Gateway — the two request shapes the interview service needs.
//!
//! Both shapes go through one `CompletionProvider`. Every call is bounded by `timeout`;
//! failures are reported once, never retried here.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::chat::checklist::render_checklist;
use crate::gateway::prompts::{
    CHAT_MAX_TOKENS, CHAT_SYSTEM_TEMPLATE, CHAT_TEMPERATURE, EVALUATION_PROMPT_TEMPLATE,
    EVALUATION_SYSTEM,
};
use crate::interview::evaluation::{parse_evaluation, EvaluationResult, MalformedEvaluation};
use crate::interview::rubric::Category;
use crate::interview::session::Exchange;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{ChatMessage, CompletionProvider, CompletionRequest, LlmError};
use crate::models::transcript::{Role, Turn};

pub mod prompts;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Generation failed: {0}")]
    GenerationFailed(#[source] LlmError),

    #[error(transparent)]
    Malformed(#[from] MalformedEvaluation),
}

#[derive(Clone)]
pub struct TextCompletionGateway {
    provider: Arc<dyn CompletionProvider>,
    timeout: Duration,
}

impl TextCompletionGateway {
    pub fn new(provider: Arc<dyn CompletionProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Asks the model for the next data-collection question given the chat so far.
    pub async fn next_question(&self, transcript: &[Turn]) -> Result<String, GatewayError> {
        let request = CompletionRequest {
            messages: build_chat_messages(transcript),
            max_tokens: Some(CHAT_MAX_TOKENS),
            temperature: Some(CHAT_TEMPERATURE),
        };
        let text = self.complete(request).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(GatewayError::GenerationFailed(LlmError::EmptyContent));
        }
        Ok(text.to_string())
    }

    /// Requests a rubric evaluation of a finished interview and validates the reply.
    pub async fn evaluate(
        &self,
        transcript: &[Exchange],
        rubric: &str,
    ) -> Result<EvaluationResult, GatewayError> {
        let system = format!("{EVALUATION_SYSTEM} {JSON_ONLY_SYSTEM}");
        let request = CompletionRequest {
            messages: vec![
                ChatMessage::system(system),
                ChatMessage::user(build_evaluation_prompt(transcript, rubric)),
            ],
            max_tokens: None,
            temperature: None,
        };
        let raw = self.complete(request).await?;
        let evaluation = parse_evaluation(&raw)?;
        info!(
            "Evaluation parsed: weighted_score={}, recommendation={:?}",
            evaluation.weighted_score, evaluation.recommendation
        );
        Ok(evaluation)
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, GatewayError> {
        match tokio::time::timeout(self.timeout, self.provider.complete(request)).await {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => {
                warn!("LLM provider call failed: {e}");
                Err(GatewayError::GenerationFailed(e))
            }
            Err(_) => {
                warn!("LLM provider call exceeded {}s", self.timeout.as_secs());
                Err(GatewayError::GenerationFailed(LlmError::Timeout(
                    self.timeout.as_secs(),
                )))
            }
        }
    }
}

/// System prompt followed by the chat, candidate turns as `user` and bot turns as `assistant`.
fn build_chat_messages(transcript: &[Turn]) -> Vec<ChatMessage> {
    let system = CHAT_SYSTEM_TEMPLATE.replace("{checklist}", &render_checklist());
    std::iter::once(ChatMessage::system(system))
        .chain(transcript.iter().map(|turn| match turn.role {
            Role::Candidate => ChatMessage::user(turn.text.clone()),
            Role::Bot => ChatMessage::assistant(turn.text.clone()),
        }))
        .collect()
}

pub fn build_evaluation_prompt(transcript: &[Exchange], rubric: &str) -> String {
    let transcript_json = serde_json::to_string_pretty(transcript).unwrap_or_default();
    let score_lines = Category::ALL
        .iter()
        .map(|c| {
            format!(
                "        \"{}\": {{\"score\": X, \"justification\": \"...\"}}",
                c.key()
            )
        })
        .collect::<Vec<_>>()
        .join(",\n");
    EVALUATION_PROMPT_TEMPLATE
        .replace("{rubric}", rubric)
        .replace("{transcript}", &transcript_json)
        .replace("{score_lines}", &score_lines)
}
