/// Candidate attributes collected by the open-ended chat flow, in the order the bot asks for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateField {
    Name,
    Mobile,
    Email,
    Post,
    Marks,
    Income,
    Category,
    Religion,
    Hobbies,
    FutureGoals,
    AdditionalInfo,
    ScenarioResponse,
}

impl CandidateField {
    pub const ALL: [CandidateField; 12] = [
        CandidateField::Name,
        CandidateField::Mobile,
        CandidateField::Email,
        CandidateField::Post,
        CandidateField::Marks,
        CandidateField::Income,
        CandidateField::Category,
        CandidateField::Religion,
        CandidateField::Hobbies,
        CandidateField::FutureGoals,
        CandidateField::AdditionalInfo,
        CandidateField::ScenarioResponse,
    ];

    /// Stored in the `field` column; also the `current_question` key clients send.
    pub fn key(self) -> &'static str {
        match self {
            CandidateField::Name => "name",
            CandidateField::Mobile => "mobile",
            CandidateField::Email => "email",
            CandidateField::Post => "post",
            CandidateField::Marks => "marks",
            CandidateField::Income => "income",
            CandidateField::Category => "category",
            CandidateField::Religion => "religion",
            CandidateField::Hobbies => "hobbies",
            CandidateField::FutureGoals => "future_goals",
            CandidateField::AdditionalInfo => "additional_info",
            CandidateField::ScenarioResponse => "scenario_response",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CandidateField::Name => "Name",
            CandidateField::Mobile => "Mobile number",
            CandidateField::Email => "Email ID",
            CandidateField::Post => "Post applied for",
            CandidateField::Marks => "10th Board marks and percentage",
            CandidateField::Income => "Parents annual income",
            CandidateField::Category => "Category",
            CandidateField::Religion => "Religion",
            CandidateField::Hobbies => "Major interests and hobbies",
            CandidateField::FutureGoals => "Future goals (5 years)",
            CandidateField::AdditionalInfo => "Additional information",
            CandidateField::ScenarioResponse => {
                "Response to scenario: handling after-hours work request with prior commitments"
            }
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.key().eq_ignore_ascii_case(key))
    }
}

/// Numbered checklist embedded in the chat system prompt.
pub fn render_checklist() -> String {
    CandidateField::ALL
        .iter()
        .enumerate()
        .map(|(i, f)| format!("{}. {}", i + 1, f.label()))
        .collect::<Vec<_>>()
        .join("\n")
}
