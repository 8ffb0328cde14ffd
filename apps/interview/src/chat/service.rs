//! Open-ended chat mode: the model decides the next question from the stored conversation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::chat::checklist::CandidateField;
use crate::errors::AppError;
use crate::gateway::TextCompletionGateway;
use crate::history::{HistoryStore, NewRecord};
use crate::models::history::HistoryRow;
use crate::models::transcript::Turn;

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    #[serde(default)]
    pub text: String,
    /// The question the candidate is answering: a checklist key or the question text.
    #[serde(default)]
    pub current_question: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub text: String,
    pub conversation_history: Vec<Turn>,
}

pub struct ChatService {
    history: Arc<dyn HistoryStore>,
    gateway: TextCompletionGateway,
}

impl ChatService {
    pub fn new(history: Arc<dyn HistoryStore>, gateway: TextCompletionGateway) -> Self {
        Self { history, gateway }
    }

    /// Stores the candidate's reply (if any) and asks the model what to ask next.
    /// An empty `text` opens the conversation without storing anything.
    pub async fn process_message(&self, request: ChatRequest) -> Result<ChatResponse, AppError> {
        if request.session_id.trim().is_empty() {
            return Err(AppError::Validation("session_id cannot be empty".to_string()));
        }

        let mut conversation = self.history.history(&request.session_id).await?;

        if !request.text.trim().is_empty() {
            let question = request.current_question.trim();
            let field = CandidateField::from_key(question).map(|f| f.key().to_string());
            self.history
                .append_record(NewRecord {
                    session_id: request.session_id.clone(),
                    question: (!question.is_empty()).then(|| question.to_string()),
                    answer: Some(request.text.clone()),
                    field,
                })
                .await?;
            conversation.push(Turn::candidate(request.text.clone()));
        }

        let next = self.gateway.next_question(&conversation).await?;
        conversation.push(Turn::bot(next.clone()));
        info!(
            "Chat session {}: {} turns",
            request.session_id,
            conversation.len()
        );

        Ok(ChatResponse {
            text: next,
            conversation_history: conversation,
        })
    }

    pub async fn all_responses(&self) -> Result<Vec<HistoryRow>, AppError> {
        Ok(self.history.all_records().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::history::memory::InMemoryHistoryStore;
    use crate::llm_client::scripted::{Scripted, ScriptedProvider};
    use crate::llm_client::{LlmError, MessageRole};

    fn service(
        replies: Vec<Scripted>,
    ) -> (ChatService, Arc<InMemoryHistoryStore>, Arc<ScriptedProvider>) {
        let history = Arc::new(InMemoryHistoryStore::new());
        let provider = Arc::new(ScriptedProvider::new(replies));
        let gateway = TextCompletionGateway::new(provider.clone(), Duration::from_secs(5));
        (ChatService::new(history.clone(), gateway), history, provider)
    }

    fn request(text: &str, current_question: &str) -> ChatRequest {
        ChatRequest {
            session_id: "chat-1".to_string(),
            text: text.to_string(),
            current_question: current_question.to_string(),
        }
    }

    #[tokio::test]
    async fn test_opening_message_stores_nothing() {
        let (svc, history, _) = service(vec![Scripted::Text("Hello! What's your name?".into())]);
        let response = svc.process_message(request("", "")).await.unwrap();

        assert_eq!(response.text, "Hello! What's your name?");
        assert_eq!(
            response.conversation_history,
            vec![Turn::bot("Hello! What's your name?")]
        );
        assert!(history.all_records().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_answer_is_stored_with_checklist_field() {
        let (svc, history, provider) = service(vec![
            Scripted::Text("What's your name?".into()),
            Scripted::Text("Thanks Kiran! Your mobile number?".into()),
        ]);
        svc.process_message(request("", "")).await.unwrap();
        let response = svc.process_message(request("Kiran", "name")).await.unwrap();

        assert_eq!(response.text, "Thanks Kiran! Your mobile number?");
        let rows = history.all_records().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].answer.as_deref(), Some("Kiran"));
        assert_eq!(rows[0].field.as_deref(), Some("name"));

        // The second request carried the stored row plus the new answer exactly once.
        let second = &provider.requests()[1];
        let user_turns: Vec<_> = second
            .messages
            .iter()
            .filter(|m| m.role == MessageRole::User)
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(user_turns, ["Kiran"]);
    }

    #[tokio::test]
    async fn test_history_is_replayed_across_requests() {
        let (svc, _, _) = service(vec![
            Scripted::Text("Email?".into()),
            Scripted::Text("Post applied for?".into()),
        ]);
        svc.process_message(request("Kiran", "What is your name?"))
            .await
            .unwrap();
        let response = svc
            .process_message(request("kiran@example.com", "email"))
            .await
            .unwrap();

        assert_eq!(
            response.conversation_history,
            vec![
                Turn::bot("What is your name?"),
                Turn::candidate("Kiran"),
                Turn::candidate("kiran@example.com"),
                Turn::bot("Post applied for?"),
            ]
        );
    }

    #[tokio::test]
    async fn test_free_text_question_has_no_field() {
        let (svc, history, _) = service(vec![Scripted::Text("Next?".into())]);
        svc.process_message(request("Kiran", "What should I call you?"))
            .await
            .unwrap();
        let rows = history.all_records().await.unwrap();
        assert_eq!(rows[0].field, None);
        assert_eq!(rows[0].question.as_deref(), Some("What should I call you?"));
    }

    #[tokio::test]
    async fn test_gateway_failure_surfaces() {
        let (svc, _, _) = service(vec![Scripted::Fail(LlmError::RateLimited(
            "slow down".into(),
        ))]);
        let err = svc.process_message(request("", "")).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::GenerationFailed(LlmError::RateLimited(_))
        ));
    }

    #[tokio::test]
    async fn test_blank_session_id_rejected() {
        let (svc, _, provider) = service(vec![]);
        let mut req = request("hi", "");
        req.session_id = "  ".into();
        assert!(matches!(
            svc.process_message(req).await,
            Err(AppError::Validation(_))
        ));
        assert!(provider.requests().is_empty());
    }
}
