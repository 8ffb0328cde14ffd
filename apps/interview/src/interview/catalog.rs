use serde::Serialize;

use crate::interview::rubric::Category;

/// A single interview prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub prompt: &'static str,
    pub category: Category,
    /// Weight of the question's category in the evaluation.
    pub weight: f64,
}

impl Question {
    const fn new(id: &'static str, prompt: &'static str, category: Category, weight: f64) -> Self {
        Self {
            id,
            prompt,
            category,
            weight,
        }
    }
}

const STANDARD_QUESTIONS: [Question; 5] = [
    Question::new(
        "personal",
        "Please introduce yourself and tell me about your educational background.",
        Category::Communication,
        0.25,
    ),
    Question::new(
        "career",
        "What post are you applying for and why did you choose this field?",
        Category::FutureVision,
        0.20,
    ),
    Question::new(
        "hobbies",
        "What are your major interests and hobbies? How do they relate to your career goals?",
        Category::PersonalityFit,
        0.25,
    ),
    Question::new(
        "future",
        "Where do you see yourself after 5 years? What steps are you taking to achieve these goals?",
        Category::FutureVision,
        0.20,
    ),
    Question::new(
        "conflict",
        "If your superior stops you after 6pm when you have prior commitments, how would you handle this situation?",
        Category::ConflictResolution,
        0.30,
    ),
];

/// Ordered, immutable list of interview questions. Order is interview order.
#[derive(Debug, Clone)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    pub fn standard() -> Self {
        Self {
            questions: STANDARD_QUESTIONS.to_vec(),
        }
    }

    pub fn list_questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[cfg(test)]
    pub fn from_questions(questions: Vec<Question>) -> Self {
        assert!(!questions.is_empty(), "catalog must contain at least one question");
        Self { questions }
    }
}
