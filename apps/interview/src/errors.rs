use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::gateway::GatewayError;
use crate::history::HistoryError;
use crate::interview::session::SessionError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Interview session {0} not found")]
    SessionNotFound(String),

    #[error("Interview session {0} is already completed")]
    AlreadyCompleted(String),

    #[error("Interview session {0} is not yet completed")]
    NotYetCompleted(String),

    #[error("Malformed evaluation: {reason}")]
    MalformedEvaluation { reason: String, raw: String },

    #[error("Generation failed: {0}")]
    GenerationFailed(#[source] LlmError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("History store error: {0}")]
    History(#[from] HistoryError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound(id) => AppError::SessionNotFound(id),
            SessionError::AlreadyCompleted(id) => AppError::AlreadyCompleted(id),
            SessionError::NotYetCompleted(id) => AppError::NotYetCompleted(id),
        }
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::GenerationFailed(e) => AppError::GenerationFailed(e),
            GatewayError::Malformed(m) => AppError::MalformedEvaluation {
                reason: m.reason,
                raw: m.raw,
            },
        }
    }
}

impl AppError {
    /// HTTP status and stable machine-readable code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::SessionNotFound(_) => (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND"),
            AppError::AlreadyCompleted(_) => (StatusCode::CONFLICT, "ALREADY_COMPLETED"),
            AppError::NotYetCompleted(_) => (StatusCode::BAD_REQUEST, "NOT_YET_COMPLETED"),
            AppError::MalformedEvaluation { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "MALFORMED_EVALUATION")
            }
            AppError::GenerationFailed(_) => (StatusCode::BAD_GATEWAY, "GENERATION_FAILED"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::History(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = match &self {
            AppError::SessionNotFound(_) => "Interview session not found".to_string(),
            AppError::AlreadyCompleted(_) => {
                "Interview is already completed. You can now request the evaluation.".to_string()
            }
            AppError::NotYetCompleted(_) => "Interview is not yet completed".to_string(),
            AppError::Validation(msg) => msg.clone(),
            AppError::MalformedEvaluation { reason, raw } => {
                tracing::error!("Malformed evaluation ({reason}); raw provider output: {raw}");
                "Error parsing evaluation response".to_string()
            }
            AppError::GenerationFailed(e) => {
                tracing::error!("Generation failed: {e}");
                "The language model could not produce a response".to_string()
            }
            AppError::History(e) => {
                tracing::error!("History store error: {e}");
                "A storage error occurred".to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal server error occurred".to_string()
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::evaluation::MalformedEvaluation;

    #[test]
    fn test_session_errors_map_to_http_statuses() {
        let cases = [
            (SessionError::NotFound("s".into()), StatusCode::NOT_FOUND),
            (SessionError::AlreadyCompleted("s".into()), StatusCode::CONFLICT),
            (SessionError::NotYetCompleted("s".into()), StatusCode::BAD_REQUEST),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).status_and_code().0, status);
        }
    }

    #[test]
    fn test_malformed_evaluation_keeps_raw_but_is_internal() {
        let err = AppError::from(GatewayError::Malformed(MalformedEvaluation {
            reason: "not json".into(),
            raw: "secret model output".into(),
        }));
        match &err {
            AppError::MalformedEvaluation { raw, .. } => assert_eq!(raw, "secret model output"),
            other => panic!("unexpected: {other:?}"),
        }
        assert_eq!(err.status_and_code().0, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_response_body_does_not_leak_raw_output() {
        let err = AppError::MalformedEvaluation {
            reason: "not json".into(),
            raw: "secret model output".into(),
        };
        let response = err.into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.contains("MALFORMED_EVALUATION"));
        assert!(!body.contains("secret model output"));
    }
}
