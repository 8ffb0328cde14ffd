use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Evaluation category. Drives weighting only, never question flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Communication,
    FutureVision,
    ConflictResolution,
    PersonalityFit,
}

impl Category {
    /// Every category of the fixed weight table, in rubric order.
    pub const ALL: [Category; 4] = [
        Category::Communication,
        Category::FutureVision,
        Category::ConflictResolution,
        Category::PersonalityFit,
    ];

    pub fn weight(self) -> f64 {
        match self {
            Category::Communication => 0.25,
            Category::FutureVision => 0.20,
            Category::ConflictResolution => 0.30,
            Category::PersonalityFit => 0.25,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Category::Communication => "communication",
            Category::FutureVision => "future_vision",
            Category::ConflictResolution => "conflict_resolution",
            Category::PersonalityFit => "personality_fit",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Category::Communication => "Communication Skills",
            Category::FutureVision => "Future Vision",
            Category::ConflictResolution => "Conflict Resolution",
            Category::PersonalityFit => "Personality Fit",
        }
    }

    pub fn criterion(self) -> &'static str {
        match self {
            Category::Communication => {
                "Assess clarity, articulation, and professional communication"
            }
            Category::FutureVision => "Evaluate career goals and ambition",
            Category::ConflictResolution => {
                "Assess approach to handling conflicts and priorities"
            }
            Category::PersonalityFit => "Evaluate overall cultural fit and personality",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RubricError {
    #[error("Missing score for category '{}'", .0.key())]
    MissingCategory(Category),
}

/// Weighted aggregate over the fixed weight table: Σ score × weight, rounded to 2 decimals.
///
/// Every category must be present; a missing one is an error rather than a zero.
pub fn compute_weighted_score(scores: &BTreeMap<Category, f64>) -> Result<f64, RubricError> {
    let mut total = 0.0;
    for category in Category::ALL {
        let score = scores
            .get(&category)
            .ok_or(RubricError::MissingCategory(category))?;
        total += score * category.weight();
    }
    Ok(round2(total))
}

/// Rounds to 2 decimals, exact halves to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Renders the numbered rubric block embedded in evaluation prompts.
pub fn render_rubric() -> String {
    Category::ALL
        .iter()
        .enumerate()
        .map(|(i, c)| {
            format!(
                "{}. {} ({:.0}%): {}",
                i + 1,
                c.title(),
                c.weight() * 100.0,
                c.criterion()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
