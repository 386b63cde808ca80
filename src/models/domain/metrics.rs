use serde::{Deserialize, Serialize};

/// Bloom's taxonomy level. Extracted values outside this set are discarded
/// by the parser rather than stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum CognitiveLevel {
    Remember,
    Understand,
    Apply,
    Analyze,
    Evaluate,
    Create,
}

impl CognitiveLevel {
    pub const ALL: [CognitiveLevel; 6] = [
        CognitiveLevel::Remember,
        CognitiveLevel::Understand,
        CognitiveLevel::Apply,
        CognitiveLevel::Analyze,
        CognitiveLevel::Evaluate,
        CognitiveLevel::Create,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "remember" => Some(CognitiveLevel::Remember),
            "understand" => Some(CognitiveLevel::Understand),
            "apply" => Some(CognitiveLevel::Apply),
            "analyze" => Some(CognitiveLevel::Analyze),
            "evaluate" => Some(CognitiveLevel::Evaluate),
            "create" => Some(CognitiveLevel::Create),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CognitiveLevel::Remember => "Remember",
            CognitiveLevel::Understand => "Understand",
            CognitiveLevel::Apply => "Apply",
            CognitiveLevel::Analyze => "Analyze",
            CognitiveLevel::Evaluate => "Evaluate",
            CognitiveLevel::Create => "Create",
        }
    }
}

impl std::fmt::Display for CognitiveLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-question difficulty metrics. Every field carries a default so a
/// record is always fully populated, no matter how little the parser
/// managed to extract. The optional fields are produced only by the
/// synthesis fallback.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuestionMetrics {
    pub question_id: String,
    pub difficulty_label: String,
    pub difficulty_score: f64,
    pub syllabus_alignment_score: f64,
    pub cognitive_level: CognitiveLevel,
    pub application_depth: i32,
    pub estimated_time_to_solve: String,
    pub complexity_index: f64,
    pub explanation: String,
    pub ai_model_used: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marks_vs_effort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concept_density: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_weightage_match: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_confidence: Option<f64>,
}

impl QuestionMetrics {
    /// The fully-defaulted record for a question nothing could be
    /// extracted from.
    pub fn with_defaults(question_id: &str, ai_model_used: &str) -> Self {
        QuestionMetrics {
            question_id: question_id.to_string(),
            difficulty_label: "Moderate".to_string(),
            difficulty_score: 6.0,
            syllabus_alignment_score: 7.0,
            cognitive_level: CognitiveLevel::Apply,
            application_depth: 3,
            estimated_time_to_solve: "15 minutes".to_string(),
            complexity_index: complexity_from_depth(3),
            explanation: "Analysis completed for this question.".to_string(),
            ai_model_used: ai_model_used.to_string(),
            marks_vs_effort: None,
            concept_density: None,
            question_type: None,
            topic_weightage_match: None,
            analysis_confidence: None,
        }
    }
}

/// Complexity index is never extracted from text: it is derived from the
/// application depth, rescaled from 1-5 onto the 1-10 chart axis.
pub fn complexity_from_depth(application_depth: i32) -> f64 {
    (application_depth * 2).clamp(1, 10) as f64
}
