pub mod analysis_service;
pub mod metrics_synthesis;
pub mod prompt_builder;
pub mod response_parser;
pub mod text_budget;
pub mod user_service;
