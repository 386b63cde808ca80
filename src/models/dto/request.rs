use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be at least 3 characters long"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, max = 128, message = "Password must be at least 6 characters long"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username and password are required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Username and password are required"))]
    pub password: String,
}

/// Body for POST /analyze. Text is already extracted from the uploaded
/// PDFs by the client side; this service never touches PDF bytes.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnalyzeRequest {
    #[validate(length(min = 1, message = "Syllabus text is required"))]
    pub syllabus_text: String,

    #[serde(default)]
    pub objectives: String,

    #[validate(length(min = 1, message = "Question text is required"))]
    pub question_text: String,

    /// Provider override for this request; falls back to the configured
    /// default when absent.
    #[serde(default)]
    pub ai_model: Option<String>,
}

/// Body for POST /generate.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateRequest {
    #[validate(length(min = 1, message = "Syllabus text is required"))]
    pub syllabus_text: String,

    #[serde(default)]
    pub objectives: String,

    #[serde(default = "default_question_type")]
    pub question_type: String,

    #[serde(default = "default_difficulty_level")]
    pub difficulty_level: String,

    #[serde(default)]
    pub syllabus_topics: String,

    #[serde(default)]
    pub ai_model: Option<String>,
}

fn default_question_type() -> String {
    "assignment".to_string()
}

fn default_difficulty_level() -> String {
    "moderate".to_string()
}
