//! Instructional scaffolding for the analysis and generation prompts.
//! The `**Question: [Question ID]**` marker named below is a wire contract
//! with the response parser: providers are instructed to emit it and the
//! parser splits on it.

pub const ANALYSIS_PREAMBLE: &str = "You are an expert in educational assessment and curriculum design.

IMPORTANT: Analyze EVERY SINGLE QUESTION in the question paper. Do not stop until you have analyzed all questions.

Given:
1. A summarized syllabus from a textbook or course outline.
2. The official course learning objectives.
3. A set of exam questions.";

pub const ANALYSIS_TASK: &str = "TASK: Analyze EACH AND EVERY question individually. For EACH question found in the question paper, provide:

1. **Difficulty Label**: (Easy, Moderate, Tough)
2. **Difficulty Score**: (scale of 1 to 10)
3. **Syllabus Alignment Score**: (scale of 1 to 10) - How well the question aligns with the provided syllabus
4. **Bloom's Taxonomy Level**: (Remember, Understand, Apply, Analyze, Evaluate, Create)
5. **Application Depth**: (scale of 1 to 5, where 1 = direct recall, 5 = real-world case analysis)
6. **Estimated Time to Solve**: (in minutes)
7. **Brief Explanation**: (2-3 sentences explaining the difficulty assessment)

CRITICAL REQUIREMENTS:
- Analyze ALL questions in the paper (Q1, Q1A, Q1B, Q2, Q2A, Q2B, Q3, etc.)
- Do not skip any question
- Provide complete analysis for each question
- Use the format: **Question: [Question ID]** followed by the 7 metrics
- Continue until you have covered every single question in the paper

Focus purely on question content and syllabus-objective alignment.
Do not infer or assume any student background or performance.
Provide specific numeric scores and clear reasoning for EVERY question.";

pub const GENERATION_PREAMBLE: &str = "You are an expert educator and question paper designer with extensive experience in curriculum development.

TASK: Generate a comprehensive question paper based on the provided syllabus and learning objectives.";

/// Per-difficulty parameters interpolated into the generation template.
pub struct DifficultyProfile {
    pub description: &'static str,
    pub cognitive_levels: &'static str,
    pub complexity: &'static str,
    pub time_allocation: &'static str,
    pub question_characteristics: &'static str,
    pub bloom_focus: &'static str,
    pub example_verbs: &'static str,
}

pub static EASY_PROFILE: DifficultyProfile = DifficultyProfile {
    description: "basic recall and understanding level",
    cognitive_levels: "Remember and Understand",
    complexity: "straightforward concepts and direct applications",
    time_allocation: "short to medium time requirements (5-15 minutes per question)",
    question_characteristics:
        "Clear, direct questions focusing on definitions, explanations, and basic applications",
    bloom_focus: "Remember (40%), Understand (40%), Apply (20%)",
    example_verbs: "define, explain, describe, list, identify, compare, classify",
};

pub static MODERATE_PROFILE: DifficultyProfile = DifficultyProfile {
    description: "application and analysis level",
    cognitive_levels: "Understand, Apply, and Analyze",
    complexity: "moderate complexity requiring analysis and problem-solving",
    time_allocation: "medium time requirements (10-25 minutes per question)",
    question_characteristics:
        "Questions requiring application of concepts, analysis of scenarios, and problem-solving",
    bloom_focus: "Understand (30%), Apply (40%), Analyze (30%)",
    example_verbs: "apply, analyze, solve, examine, compare, contrast, demonstrate, implement",
};

pub static TOUGH_PROFILE: DifficultyProfile = DifficultyProfile {
    description: "evaluation and synthesis level",
    cognitive_levels: "Analyze, Evaluate, and Create",
    complexity: "high complexity requiring critical thinking and synthesis",
    time_allocation: "longer time requirements (20-45 minutes per question)",
    question_characteristics:
        "Complex questions requiring evaluation, synthesis, critical thinking, and creation of solutions",
    bloom_focus: "Analyze (30%), Evaluate (35%), Create (35%)",
    example_verbs: "evaluate, critique, justify, design, create, synthesize, propose, develop",
};

/// Per-question-type parameters interpolated into the generation template.
pub struct QuestionTypeProfile {
    pub description: &'static str,
    pub format: &'static str,
    pub example: &'static str,
}

pub static ASSIGNMENT_PROFILE: QuestionTypeProfile = QuestionTypeProfile {
    description: "comprehensive assignment questions that test deep understanding and application",
    format: "detailed questions with multiple parts (a, b, c) that build upon each other",
    example: "Q1. (a) Define [concept] and explain its importance. (b) Analyze how [concept] applies to [scenario]. (c) Design a solution using [concept] for the given problem.",
};

pub static MCQ_PROFILE: QuestionTypeProfile = QuestionTypeProfile {
    description: "multiple choice questions with 4 options each, testing knowledge and understanding",
    format: "clear questions with one correct answer and three plausible distractors",
    example: "Q1. Which of the following best describes [concept]?\nA) Option 1\nB) Option 2 (Correct)\nC) Option 3\nD) Option 4",
};

pub static CASE_STUDY_PROFILE: QuestionTypeProfile = QuestionTypeProfile {
    description: "case study based questions that require analysis and critical thinking",
    format: "realistic scenarios followed by analytical questions",
    example: "Case Study: [Detailed scenario]\nQ1. Analyze the situation described above.\nQ2. What are the key challenges?\nQ3. Propose a solution with justification.",
};
