//! Assembles the analysis and generation prompts from budgeted source
//! text. The analysis template instructs providers to emit the
//! `**Question: <id>**` marker the response parser splits on.

use crate::constants::prompts::{
    DifficultyProfile, QuestionTypeProfile, ANALYSIS_PREAMBLE, ANALYSIS_TASK, ASSIGNMENT_PROFILE,
    CASE_STUDY_PROFILE, EASY_PROFILE, GENERATION_PREAMBLE, MCQ_PROFILE, MODERATE_PROFILE,
    TOUGH_PROFILE,
};
use crate::services::text_budget::{extract_key_topics, smart_truncate};

pub const ANALYSIS_SYLLABUS_BUDGET: usize = 4000;
pub const ANALYSIS_OBJECTIVES_BUDGET: usize = 1000;
// Much larger limit for the question paper itself
pub const ANALYSIS_QUESTION_BUDGET: usize = 8000;

pub const GENERATION_SYLLABUS_BUDGET: usize = 6000;
pub const GENERATION_OBJECTIVES_BUDGET: usize = 1500;
pub const GENERATION_TOPICS_BUDGET: usize = 500;

pub fn difficulty_profile(level: &str) -> &'static DifficultyProfile {
    match level.trim().to_lowercase().as_str() {
        "easy" => &EASY_PROFILE,
        "tough" => &TOUGH_PROFILE,
        _ => &MODERATE_PROFILE,
    }
}

pub fn question_type_profile(question_type: &str) -> &'static QuestionTypeProfile {
    match question_type.trim().to_lowercase().as_str() {
        "mcq" => &MCQ_PROFILE,
        "casestudy" => &CASE_STUDY_PROFILE,
        _ => &ASSIGNMENT_PROFILE,
    }
}

pub fn build_analysis_prompt(syllabus_text: &str, objectives: &str, question_text: &str) -> String {
    let key_topics = extract_key_topics(syllabus_text);
    log::info!("Key topics extracted: {} topics", key_topics.len());

    let syllabus = smart_truncate(syllabus_text, ANALYSIS_SYLLABUS_BUDGET, &key_topics);
    let objectives = smart_truncate(objectives, ANALYSIS_OBJECTIVES_BUDGET, &[]);
    let question = smart_truncate(question_text, ANALYSIS_QUESTION_BUDGET, &[]);

    log::info!(
        "Text lengths after smart truncation - Syllabus: {}, Objectives: {}, Question: {}",
        syllabus.len(),
        objectives.len(),
        question.len()
    );

    format!(
        "{preamble}\n\nSYLLABUS (Key Topics):\n{syllabus}\n\nLEARNING OBJECTIVES:\n{objectives}\n\nQUESTION PAPER TO ANALYZE:\n{question}\n\n{task}",
        preamble = ANALYSIS_PREAMBLE,
        syllabus = syllabus,
        objectives = objectives,
        question = question,
        task = ANALYSIS_TASK,
    )
}

pub fn build_generation_prompt(
    syllabus_text: &str,
    objectives: &str,
    question_type: &str,
    difficulty_level: &str,
    syllabus_topics: &str,
) -> String {
    let key_topics = extract_key_topics(syllabus_text);
    log::info!("Key topics extracted: {} topics", key_topics.len());

    let syllabus = smart_truncate(syllabus_text, GENERATION_SYLLABUS_BUDGET, &key_topics);
    let objectives = smart_truncate(objectives, GENERATION_OBJECTIVES_BUDGET, &[]);
    let topics = if syllabus_topics.is_empty() {
        String::new()
    } else {
        smart_truncate(syllabus_topics, GENERATION_TOPICS_BUDGET, &[])
    };

    let difficulty = difficulty_profile(difficulty_level);
    let selected_type = question_type_profile(question_type);

    let topics_focus = if topics.is_empty() {
        String::new()
    } else {
        format!(
            "\nSPECIFIC TOPIC FOCUS:\nThe questions should particularly emphasize these topics: {}\nWhile still covering the broader syllabus, give special attention to these specified areas.\n",
            topics
        )
    };

    let difficulty_upper = difficulty_level.to_uppercase();
    let type_upper = question_type.to_uppercase();

    format!(
        "{preamble}\n\n\
        SYLLABUS CONTENT:\n{syllabus}\n\n\
        LEARNING OBJECTIVES:\n{objectives}\n\
        {topics_focus}\
        DIFFICULTY LEVEL: {difficulty_upper}\n\
        Target difficulty: {difficulty_description}\n\n\
        QUESTION TYPE: {type_upper}\n\
        Generate {type_description}.\n\n\
        DIFFICULTY-SPECIFIC REQUIREMENTS FOR {difficulty_upper} LEVEL:\n\
        1. **Cognitive Focus**: Emphasize {cognitive_levels} level thinking\n\
        2. **Complexity**: Questions should have {complexity}\n\
        3. **Time Allocation**: Design questions with {time_allocation}\n\
        4. **Bloom's Taxonomy Distribution**: {bloom_focus}\n\
        5. **Question Characteristics**: {question_characteristics}\n\
        6. **Recommended Action Verbs**: Use verbs like {example_verbs}\n\n\
        GENERAL REQUIREMENTS:\n\
        1. **Question Format**: {type_format}\n\
        2. **Coverage**: Ensure questions cover all major topics from the syllabus\n\
        3. **Alignment**: All questions must directly relate to the provided learning objectives\n\
        4. **Practical Application**: Include real-world scenarios appropriate to the difficulty level\n\n\
        SPECIFIC INSTRUCTIONS FOR {type_upper}:\n\
        {type_example}\n\n\
        STRUCTURE:\n\
        - Generate 8-10 questions total\n\
        - Provide clear question numbering (Q1, Q2, etc.)\n\
        - Include marks allocation for each question (adjust marks based on difficulty)\n\
        - Add brief instructions for students at the beginning\n\
        - Ensure all questions match the {difficulty_level} difficulty level consistently\n\n\
        QUALITY STANDARDS FOR {difficulty_upper} DIFFICULTY:\n\
        - Questions should be unambiguous and clearly worded\n\
        - Maintain consistent difficulty level throughout the paper\n\
        - Avoid questions that are too easy or too hard for the specified level\n\
        - Ensure each question tests specific learning outcomes at the appropriate cognitive level\n\
        - Maintain academic rigor appropriate for {difficulty_level} level assessment\n\n\
        IMPORTANT: Every single question in the paper must be at {difficulty_upper} difficulty level. Do not mix difficulty levels.\n\n\
        Please generate a complete, ready-to-use question paper that an instructor could immediately use for {difficulty_level} level assessment.",
        preamble = GENERATION_PREAMBLE,
        syllabus = syllabus,
        objectives = objectives,
        topics_focus = topics_focus,
        difficulty_upper = difficulty_upper,
        difficulty_description = difficulty.description,
        type_upper = type_upper,
        type_description = selected_type.description,
        cognitive_levels = difficulty.cognitive_levels,
        complexity = difficulty.complexity,
        time_allocation = difficulty.time_allocation,
        bloom_focus = difficulty.bloom_focus,
        question_characteristics = difficulty.question_characteristics,
        example_verbs = difficulty.example_verbs,
        type_format = selected_type.format,
        type_example = selected_type.example,
        difficulty_level = difficulty_level,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_prompt_embeds_all_three_sections() {
        let prompt = build_analysis_prompt("syllabus body", "objective body", "Q1. Define X.");

        assert!(prompt.contains("SYLLABUS (Key Topics):\nsyllabus body"));
        assert!(prompt.contains("LEARNING OBJECTIVES:\nobjective body"));
        assert!(prompt.contains("QUESTION PAPER TO ANALYZE:\nQ1. Define X."));
    }

    #[test]
    fn test_analysis_prompt_states_the_marker_contract() {
        let prompt = build_analysis_prompt("s", "o", "q");
        // The parser splits on this exact marker shape; the instruction and
        // the split pattern must never drift apart.
        assert!(prompt.contains("**Question: [Question ID]**"));
        assert!(prompt.contains("**Difficulty Label**"));
        assert!(prompt.contains("**Brief Explanation**"));
    }

    #[test]
    fn test_analysis_prompt_respects_budgets() {
        let syllabus = "s".repeat(20_000);
        let objectives = "o".repeat(20_000);
        let question = format!("Question 1 {}", "q".repeat(20_000));

        let prompt = build_analysis_prompt(&syllabus, &objectives, &question);

        // Generous upper bound: three budgeted sections plus scaffolding.
        let scaffolding = ANALYSIS_PREAMBLE.len() + ANALYSIS_TASK.len() + 400;
        assert!(
            prompt.len()
                < ANALYSIS_SYLLABUS_BUDGET
                    + ANALYSIS_OBJECTIVES_BUDGET
                    + ANALYSIS_QUESTION_BUDGET
                    + scaffolding
        );
    }

    #[test]
    fn test_unknown_difficulty_falls_back_to_moderate() {
        let profile = difficulty_profile("brutal");
        assert_eq!(profile.description, MODERATE_PROFILE.description);
    }

    #[test]
    fn test_unknown_question_type_falls_back_to_assignment() {
        let profile = question_type_profile("essay");
        assert_eq!(profile.description, ASSIGNMENT_PROFILE.description);
    }

    #[test]
    fn test_generation_prompt_interpolates_difficulty_table() {
        let prompt = build_generation_prompt("syllabus", "objectives", "mcq", "tough", "");

        assert!(prompt.contains("DIFFICULTY LEVEL: TOUGH"));
        assert!(prompt.contains("Analyze (30%), Evaluate (35%), Create (35%)"));
        assert!(prompt.contains("QUESTION TYPE: MCQ"));
        assert!(prompt.contains("three plausible distractors"));
    }

    #[test]
    fn test_generation_prompt_topic_focus_is_optional() {
        let without = build_generation_prompt("syllabus", "objectives", "assignment", "easy", "");
        assert!(!without.contains("SPECIFIC TOPIC FOCUS"));

        let with =
            build_generation_prompt("syllabus", "objectives", "assignment", "easy", "B-trees");
        assert!(with.contains("SPECIFIC TOPIC FOCUS"));
        assert!(with.contains("B-trees"));
    }
}
