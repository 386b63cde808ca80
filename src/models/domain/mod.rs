pub mod analysis;
pub mod metrics;
pub mod user;

pub use analysis::{AnalysisResult, GenerationResult};
pub use metrics::{CognitiveLevel, QuestionMetrics};
pub use user::User;
