use serde::{Deserialize, Serialize};

use crate::models::domain::QuestionMetrics;

/// The complete outcome of one analysis request: the raw provider text plus
/// the structured metrics distilled from it. Built once per request and
/// returned straight to the HTTP caller, never persisted.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AnalysisResult {
    pub analysis: String,
    pub metrics: QuestionMetrics,
    pub all_questions_metrics: Vec<QuestionMetrics>,
    pub ai_model: String,
    pub total_questions_analyzed: usize,
}

impl AnalysisResult {
    pub fn new(analysis: String, all_metrics: Vec<QuestionMetrics>, ai_model: &str) -> Self {
        debug_assert!(!all_metrics.is_empty(), "analysis always yields at least one record");
        let total = all_metrics.len();
        let primary = all_metrics[0].clone();
        AnalysisResult {
            analysis,
            metrics: primary,
            all_questions_metrics: all_metrics,
            ai_model: ai_model.to_string(),
            total_questions_analyzed: total,
        }
    }
}

/// Outcome of a question-paper generation request: the generated paper text
/// echoed back with the parameters that shaped it.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct GenerationResult {
    pub questions: String,
    pub ai_model: String,
    pub difficulty_level: String,
    pub question_type: String,
    pub syllabus_topics: String,
}
