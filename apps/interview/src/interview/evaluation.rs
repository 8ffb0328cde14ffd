//! Evaluation payload schema.
//!
//! Model output is untrusted: the raw text is parsed against `RawEvaluation`, then every
//! field is validated before an `EvaluationResult` is produced. Any aggregate the model
//! supplies is ignored; the weighted score is always recomputed from the fixed weight table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::interview::rubric::{compute_weighted_score, Category};
use crate::llm_client::strip_json_fences;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Recommend,
    Consider,
    #[serde(rename = "Do Not Recommend")]
    DoNotRecommend,
}

impl Recommendation {
    fn parse(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .trim()
            .to_ascii_lowercase()
            .chars()
            .map(|c| if c == '_' || c == '-' { ' ' } else { c })
            .collect();
        match normalized.split_whitespace().collect::<Vec<_>>().join(" ").as_str() {
            "recommend" => Some(Recommendation::Recommend),
            "consider" => Some(Recommendation::Consider),
            "do not recommend" => Some(Recommendation::DoNotRecommend),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub score: f64,
    pub justification: String,
}

/// Validated evaluation of a completed interview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub scores: BTreeMap<Category, CategoryScore>,
    pub weighted_score: f64,
    pub recommendation: Recommendation,
    pub summary: String,
}

/// The provider's reply could not be trusted. `raw` keeps the full text for diagnosis.
#[derive(Debug, Error)]
#[error("Malformed evaluation: {reason}")]
pub struct MalformedEvaluation {
    pub reason: String,
    pub raw: String,
}

#[derive(Debug, Deserialize)]
struct RawEvaluation {
    scores: BTreeMap<String, RawCategoryScore>,
    recommendation: String,
    summary: String,
}

#[derive(Debug, Deserialize)]
struct RawCategoryScore {
    score: f64,
    justification: String,
}

/// Parses and validates the provider's evaluation text.
pub fn parse_evaluation(raw: &str) -> Result<EvaluationResult, MalformedEvaluation> {
    let malformed = |reason: String| MalformedEvaluation {
        reason,
        raw: raw.to_string(),
    };

    let payload: RawEvaluation = serde_json::from_str(strip_json_fences(raw))
        .map_err(|e| malformed(format!("payload is not the expected JSON object: {e}")))?;

    let mut scores = BTreeMap::new();
    for category in Category::ALL {
        let entry = payload
            .scores
            .get(category.key())
            .ok_or_else(|| malformed(format!("missing category '{}'", category.key())))?;
        if !entry.score.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&entry.score) {
            return Err(malformed(format!(
                "score {} for '{}' is outside [{MIN_SCORE}, {MAX_SCORE}]",
                entry.score,
                category.key()
            )));
        }
        let justification = entry.justification.trim();
        if justification.is_empty() {
            return Err(malformed(format!("blank justification for '{}'", category.key())));
        }
        scores.insert(
            category,
            CategoryScore {
                score: entry.score,
                justification: justification.to_string(),
            },
        );
    }

    let recommendation = Recommendation::parse(&payload.recommendation).ok_or_else(|| {
        malformed(format!("unknown recommendation '{}'", payload.recommendation))
    })?;

    let plain: BTreeMap<Category, f64> = scores.iter().map(|(c, s)| (*c, s.score)).collect();
    let weighted_score = compute_weighted_score(&plain).map_err(|e| malformed(e.to_string()))?;

    Ok(EvaluationResult {
        scores,
        weighted_score,
        recommendation,
        summary: payload.summary.trim().to_string(),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const VALID_EVALUATION: &str = r#"{
        "scores": {
            "communication": {"score": 8, "justification": "Clear and structured."},
            "future_vision": {"score": 7, "justification": "Reasonable goals."},
            "conflict_resolution": {"score": 9, "justification": "Balanced approach."},
            "personality_fit": {"score": 6, "justification": "Some alignment."}
        },
        "overall_score": 9.9,
        "recommendation": "Recommend",
        "summary": "Strong candidate overall."
    }"#;

    #[test]
    fn test_valid_payload_parses() {
        let result = parse_evaluation(VALID_EVALUATION).unwrap();
        assert_eq!(result.scores.len(), 4);
        assert_eq!(result.recommendation, Recommendation::Recommend);
        assert_eq!(result.summary, "Strong candidate overall.");
        assert_eq!(
            result.scores[&Category::ConflictResolution].justification,
            "Balanced approach."
        );
    }

    #[test]
    fn test_provider_aggregate_is_ignored() {
        let result = parse_evaluation(VALID_EVALUATION).unwrap();
        // 8*0.25 + 7*0.20 + 9*0.30 + 6*0.25 = 7.6, not the supplied 9.9
        assert_eq!(result.weighted_score, 7.6);
    }

    #[test]
    fn test_fenced_payload_parses() {
        let fenced = format!("```json\n{VALID_EVALUATION}\n```");
        assert!(parse_evaluation(&fenced).is_ok());
    }

    #[test]
    fn test_non_json_keeps_raw_text() {
        let raw = "I think the candidate did well overall.";
        let err = parse_evaluation(raw).unwrap_err();
        assert_eq!(err.raw, raw);
        assert!(err.reason.contains("JSON"));
    }

    #[test]
    fn test_missing_category_rejected() {
        let raw = VALID_EVALUATION.replace("personality_fit", "team_spirit");
        let err = parse_evaluation(&raw).unwrap_err();
        assert!(err.reason.contains("personality_fit"), "{}", err.reason);
    }

    #[test]
    fn test_missing_justification_rejected() {
        let raw = r#"{
            "scores": {
                "communication": {"score": 8},
                "future_vision": {"score": 7},
                "conflict_resolution": {"score": 9},
                "personality_fit": {"score": 6}
            },
            "recommendation": "Recommend",
            "summary": "ok"
        }"#;
        let err = parse_evaluation(raw).unwrap_err();
        assert!(err.reason.contains("justification"), "{}", err.reason);
    }

    #[test]
    fn test_blank_justification_rejected() {
        let raw = VALID_EVALUATION.replace("Reasonable goals.", "   ");
        let err = parse_evaluation(&raw).unwrap_err();
        assert!(err.reason.contains("future_vision"), "{}", err.reason);
    }

    #[test]
    fn test_out_of_range_score_rejected() {
        let raw = VALID_EVALUATION.replace("\"score\": 9,", "\"score\": 11,");
        let err = parse_evaluation(&raw).unwrap_err();
        assert!(err.reason.contains("outside"), "{}", err.reason);
    }

    #[test]
    fn test_unknown_recommendation_rejected() {
        let raw = VALID_EVALUATION.replace("\"Recommend\"", "\"Strong Hire\"");
        assert!(parse_evaluation(&raw).is_err());
    }

    #[test]
    fn test_recommendation_spelling_variants() {
        assert_eq!(
            Recommendation::parse("do_not_recommend"),
            Some(Recommendation::DoNotRecommend)
        );
        assert_eq!(
            Recommendation::parse("  Do Not  Recommend "),
            Some(Recommendation::DoNotRecommend)
        );
        assert_eq!(Recommendation::parse("CONSIDER"), Some(Recommendation::Consider));
        assert_eq!(Recommendation::parse("maybe"), None);
    }

    #[test]
    fn test_recommendation_serializes_to_label() {
        let json = serde_json::to_string(&Recommendation::DoNotRecommend).unwrap();
        assert_eq!(json, "\"Do Not Recommend\"");
    }
}
