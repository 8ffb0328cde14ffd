// Gateway prompt templates. Placeholders are substituted with `str::replace`.

pub const EVALUATION_SYSTEM: &str = "\
You are an expert HR evaluator. \
Analyze the interview responses and provide detailed scoring and feedback. \
Be objective and thorough in your evaluation.";

pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"Based on the following interview conversation, evaluate the candidate on these criteria:
{rubric}

Conversation History:
{transcript}

Please provide:
1. Scores for each criterion (0-10)
2. Brief justification for each score
3. Final recommendation (Recommend/Consider/Do Not Recommend)
4. A short summary of the candidate

Format your response as JSON with the following structure:
{
    "scores": {
{score_lines}
    },
    "recommendation": "Recommend" | "Consider" | "Do Not Recommend",
    "summary": "..."
}"#;

pub const CHAT_SYSTEM_TEMPLATE: &str = "\
You are an HR assistant chatbot. You need to collect the following information from job applicants:
{checklist}

Generate natural, conversational questions to collect this information, one at a time.
Be professional but friendly in tone.
Validate responses appropriately.";

pub const CHAT_MAX_TOKENS: u32 = 150;
pub const CHAT_TEMPERATURE: f32 = 0.7;
