//! Best-effort extraction of structured metrics from a provider's
//! free-text answer. Stage 1 splits on the `**Question: <id>**` marker the
//! prompt instructs the model to emit; stage 2 runs a prioritized pattern
//! cascade per field, most specific first, first match wins. A field no
//! pattern matches takes its fixed default, so every record is total.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::models::domain::metrics::{complexity_from_depth, CognitiveLevel, QuestionMetrics};

static QUESTION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*Question[:\s]*([^*]+)\*\*").expect("question marker pattern"));

static EMPHASIS_MARKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*+").expect("emphasis pattern"));

fn compile_cascade(sources: &[&str]) -> Vec<Regex> {
    sources
        .iter()
        .map(|source| {
            RegexBuilder::new(source)
                .case_insensitive(true)
                .build()
                .expect("field extraction pattern")
        })
        .collect()
}

// Bold-markdown bullet first, bare keyword proximity last. The order is the
// tie-break: generic patterns like `score: 7` must not shadow the labeled
// bullet they are a fallback for.
static DIFFICULTY_LABEL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_cascade(&[
        r"\*\s*\*\*difficulty\s+label\*\*[:\s]*([^\n\r]+)",
        r"difficulty\s+label[:\s]*([^\n\r]+)",
        r"difficulty[:\s]+(easy|moderate|tough|hard|difficult)",
        r"(easy|moderate|tough|hard|difficult)\s+difficulty",
    ])
});

static DIFFICULTY_SCORE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_cascade(&[
        r"\*\s*\*\*difficulty\s+score\*\*[:\s]*(\d+(?:\.\d+)?)",
        r"difficulty\s+score[:\s]*(\d+(?:\.\d+)?)",
        r"score[:\s]*(\d+(?:\.\d+)?)",
    ])
});

static ALIGNMENT_SCORE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_cascade(&[
        r"\*\s*\*\*syllabus\s+alignment\s+score\*\*[:\s]*(\d+(?:\.\d+)?)",
        r"syllabus\s+alignment\s+score[:\s]*(\d+(?:\.\d+)?)",
        r"alignment[:\s]*(\d+(?:\.\d+)?)",
    ])
});

static COGNITIVE_LEVEL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_cascade(&[
        r"\*\s*\*\*bloom'?s?\s+taxonomy\s+level\*\*[:\s]*([^\n\r]+)",
        r"bloom'?s?\s+taxonomy\s+level[:\s]*([^\n\r]+)",
        r"cognitive\s+level[:\s]*([^\n\r]+)",
        r"(remember|understand|apply|analyze|evaluate|create)",
    ])
});

static APPLICATION_DEPTH_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_cascade(&[
        r"\*\s*\*\*application\s+depth\*\*[:\s]*(\d+)",
        r"application\s+depth[:\s]*(\d+)",
        r"depth[:\s]*(\d+)",
    ])
});

static ESTIMATED_TIME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_cascade(&[
        r"\*\s*\*\*estimated\s+time\s+to\s+solve\*\*[:\s]*([^\n\r]+)",
        r"estimated\s+time[:\s]*([^\n\r]+)",
        r"time\s+to\s+solve[:\s]*([^\n\r]+)",
        r"(\d+)\s*minutes?",
    ])
});

static EXPLANATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_cascade(&[
        r"\*\s*\*\*brief\s+explanation\*\*[:\s]*([^\n\r*]+)",
        r"brief\s+explanation[:\s]*([^\n\r*]+)",
        r"explanation[:\s]*([^\n\r*]+)",
    ])
});

// Coarse whole-response scans, used only when structured extraction came up
// empty, to seed the synthesis fallback.
static COARSE_DIFFICULTY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_cascade(&[
        r"difficulty[:\s]+(easy|moderate|tough|hard|difficult)",
        r"(easy|moderate|tough|hard|difficult)\s+difficulty",
        r"level[:\s]+(easy|moderate|tough|hard|difficult)",
        r"\b(easy|moderate|tough|hard|difficult)\b",
    ])
});

static COARSE_SCORE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_cascade(&[
        r"score[:\s]+(\d+(?:\.\d+)?)",
        r"alignment[:\s]+(\d+(?:\.\d+)?)",
        r"(\d+(?:\.\d+)?)\s*/\s*10",
        r"(\d+(?:\.\d+)?)\s*out\s*of\s*10",
        r"rating[:\s]+(\d+(?:\.\d+)?)",
    ])
});

/// Result of a full parse. `extracted_any` is false only when the response
/// carried no question markers and not a single field pattern matched,
/// which is the signal for the caller to synthesize metrics instead.
#[derive(Debug)]
pub struct ParseOutcome {
    pub records: Vec<QuestionMetrics>,
    pub extracted_any: bool,
}

/// Stage 1: ordered `(question_id, content_block)` pairs. Empty when the
/// response contains no markers at all.
pub fn split_questions(response: &str) -> Vec<(String, String)> {
    let mut blocks = Vec::new();
    let mut markers = QUESTION_MARKER.captures_iter(response).peekable();

    while let Some(captures) = markers.next() {
        let question_id = captures[1].trim().to_string();
        let whole = captures.get(0).expect("group 0 of a match");
        let block_end = markers
            .peek()
            .and_then(|next| next.get(0))
            .map(|m| m.start())
            .unwrap_or(response.len());

        let content = response[whole.end()..block_end].trim().to_string();
        blocks.push((question_id, content));
    }

    blocks
}

/// Parse a provider response into one record per detected question. Total:
/// any input, including the empty string, yields at least one record.
pub fn parse_analysis(response: &str, ai_model: &str) -> ParseOutcome {
    let blocks = split_questions(response);
    let has_markers = !blocks.is_empty();

    let mut records = Vec::new();
    let mut matched_fields = 0;

    if has_markers {
        for (question_id, content) in &blocks {
            let (metrics, matched) = extract_question_metrics(question_id, content, ai_model);
            matched_fields += matched;
            records.push(metrics);
        }
    } else {
        // Providers that ignore the marker instruction still get a best
        // effort over the whole answer as a single pseudo-question.
        let (metrics, matched) = extract_question_metrics("Q1", response, ai_model);
        matched_fields += matched;
        records.push(metrics);
    }

    ParseOutcome {
        records,
        extracted_any: has_markers || matched_fields > 0,
    }
}

/// Stage 2 over one content block. Returns the record plus how many fields
/// an actual pattern match populated (as opposed to defaults).
pub fn extract_question_metrics(
    question_id: &str,
    content: &str,
    ai_model: &str,
) -> (QuestionMetrics, usize) {
    let mut metrics = QuestionMetrics::with_defaults(question_id, ai_model);
    let mut matched = 0;

    if let Some(label) = first_capture(&DIFFICULTY_LABEL_PATTERNS, content) {
        metrics.difficulty_label = title_case(&strip_emphasis(&label));
        matched += 1;
    }

    if let Some(score) = first_numeric(&DIFFICULTY_SCORE_PATTERNS, content) {
        metrics.difficulty_score = score.clamp(1.0, 10.0);
        matched += 1;
    }

    if let Some(score) = first_numeric(&ALIGNMENT_SCORE_PATTERNS, content) {
        metrics.syllabus_alignment_score = score.clamp(1.0, 10.0);
        matched += 1;
    }

    if let Some(level) = extract_cognitive_level(content) {
        metrics.cognitive_level = level;
        matched += 1;
    }

    if let Some(depth) = first_capture(&APPLICATION_DEPTH_PATTERNS, content)
        .and_then(|raw| raw.parse::<i32>().ok())
    {
        metrics.application_depth = depth.clamp(1, 5);
        matched += 1;
    }

    if let Some(time) = first_capture(&ESTIMATED_TIME_PATTERNS, content) {
        let time = strip_emphasis(&time);
        metrics.estimated_time_to_solve = if time.contains("minute") {
            time
        } else {
            format!("{} minutes", time)
        };
        matched += 1;
    }

    if let Some(explanation) = first_capture(&EXPLANATION_PATTERNS, content) {
        metrics.explanation = strip_emphasis(&explanation);
        matched += 1;
    }

    metrics.complexity_index = complexity_from_depth(metrics.application_depth);

    (metrics, matched)
}

pub fn detect_difficulty_word(response: &str) -> Option<String> {
    first_capture(&COARSE_DIFFICULTY_PATTERNS, response).map(|word| word.to_lowercase())
}

pub fn detect_numeric_score(response: &str) -> Option<String> {
    first_capture(&COARSE_SCORE_PATTERNS, response)
}

fn first_capture(cascade: &[Regex], content: &str) -> Option<String> {
    cascade.iter().find_map(|pattern| {
        pattern
            .captures(content)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().trim().to_string())
    })
}

fn first_numeric(cascade: &[Regex], content: &str) -> Option<f64> {
    first_capture(cascade, content).and_then(|raw| raw.parse::<f64>().ok())
}

/// Bloom level cascade with validation: a pattern whose capture is not one
/// of the six levels does not win; the cascade keeps going.
fn extract_cognitive_level(content: &str) -> Option<CognitiveLevel> {
    COGNITIVE_LEVEL_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(content)
            .and_then(|captures| captures.get(1))
            .and_then(|m| CognitiveLevel::parse(&strip_emphasis(m.as_str())))
    })
}

fn strip_emphasis(value: &str) -> String {
    EMPHASIS_MARKS.replace_all(value, "").trim().to_string()
}

pub(crate) fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    #[test]
    fn test_scenario_single_labeled_block() {
        let response = "**Question: Q1**\n* **Difficulty Score**: 8\n* **Application Depth**: 4";
        let outcome = parse_analysis(response, "gemini");

        assert!(outcome.extracted_any);
        assert_eq!(outcome.records.len(), 1);

        let record = &outcome.records[0];
        assert_eq!(record.question_id, "Q1");
        assert_eq!(record.difficulty_score, 8.0);
        assert_eq!(record.application_depth, 4);
        assert_eq!(record.complexity_index, 8.0);
    }

    #[test]
    fn test_two_markers_yield_two_ordered_records() {
        let outcome = parse_analysis(&fixtures::two_question_analysis(), "openrouter");

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].question_id, "Q1 A");
        assert_eq!(outcome.records[1].question_id, "Q1 B");
    }

    #[test]
    fn test_full_fixture_extraction() {
        let outcome = parse_analysis(&fixtures::two_question_analysis(), "openrouter");
        let first = &outcome.records[0];

        assert_eq!(first.difficulty_label, "Moderate");
        assert_eq!(first.difficulty_score, 6.0);
        assert_eq!(first.syllabus_alignment_score, 9.0);
        assert_eq!(first.cognitive_level, CognitiveLevel::Create);
        assert_eq!(first.application_depth, 4);
        assert_eq!(first.complexity_index, 8.0);
        assert_eq!(first.estimated_time_to_solve, "20 minutes");
        assert!(first.explanation.starts_with("This question requires students"));

        let second = &outcome.records[1];
        assert_eq!(second.difficulty_score, 7.0);
        assert_eq!(second.cognitive_level, CognitiveLevel::Apply);
        assert_eq!(second.application_depth, 3);
        assert_eq!(second.complexity_index, 6.0);
    }

    #[test]
    fn test_no_markers_and_no_fields_gives_one_default_record() {
        let outcome = parse_analysis("the model rambled about nothing in particular", "groq");

        assert!(!outcome.extracted_any);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(
            outcome.records[0],
            QuestionMetrics::with_defaults("Q1", "groq")
        );
    }

    #[test]
    fn test_empty_input_is_total() {
        let outcome = parse_analysis("", "groq");
        assert_eq!(outcome.records.len(), 1);
        assert!(!outcome.extracted_any);
    }

    #[test]
    fn test_markerless_response_with_fields_is_a_pseudo_question() {
        let response = "Overall this paper is tough difficulty with a score: 9 rating.";
        let outcome = parse_analysis(response, "gemini");

        assert!(outcome.extracted_any);
        assert_eq!(outcome.records[0].question_id, "Q1");
        assert_eq!(outcome.records[0].difficulty_label, "Tough");
        assert_eq!(outcome.records[0].difficulty_score, 9.0);
    }

    #[test]
    fn test_most_specific_pattern_wins() {
        // The generic `score:` pattern would grab the alignment figure if
        // the labeled bullet did not take priority.
        let content = "* **Syllabus Alignment Score**: 9\n* **Difficulty Score**: 4";
        let (metrics, _) = extract_question_metrics("Q2", content, "gemini");

        assert_eq!(metrics.difficulty_score, 4.0);
        assert_eq!(metrics.syllabus_alignment_score, 9.0);
    }

    #[test]
    fn test_markdown_emphasis_is_stripped() {
        let content = "* **Difficulty Label**: **Tough**\n* **Brief Explanation**: Needs care";
        let (metrics, _) = extract_question_metrics("Q1", content, "gemini");

        assert_eq!(metrics.difficulty_label, "Tough");
        assert_eq!(metrics.explanation, "Needs care");
    }

    #[test]
    fn test_invalid_bloom_level_is_discarded() {
        let content = "* **Bloom's Taxonomy Level**: Memorize";
        let (metrics, _) = extract_question_metrics("Q1", content, "gemini");

        // Falls back to the default, never stores the invalid value.
        assert_eq!(metrics.cognitive_level, CognitiveLevel::Apply);
    }

    #[test]
    fn test_invalid_labeled_level_falls_through_to_bare_keyword() {
        let content = "* **Bloom's Taxonomy Level**: Synthesize\nThe student must evaluate options.";
        let (metrics, _) = extract_question_metrics("Q1", content, "gemini");

        assert_eq!(metrics.cognitive_level, CognitiveLevel::Evaluate);
    }

    #[test]
    fn test_estimated_time_gains_minutes_suffix() {
        let (metrics, _) =
            extract_question_metrics("Q1", "* **Estimated Time to Solve**: 25", "gemini");
        assert_eq!(metrics.estimated_time_to_solve, "25 minutes");

        let (metrics, _) =
            extract_question_metrics("Q1", "* **Estimated Time to Solve**: 25 minutes", "gemini");
        assert_eq!(metrics.estimated_time_to_solve, "25 minutes");
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let content = "* **Difficulty Score**: 42\n* **Application Depth**: 9";
        let (metrics, _) = extract_question_metrics("Q1", content, "gemini");

        assert_eq!(metrics.difficulty_score, 10.0);
        assert_eq!(metrics.application_depth, 5);
        assert_eq!(metrics.complexity_index, 10.0);
    }

    #[test]
    fn test_range_invariants_hold_on_hostile_input() {
        let hostile = [
            "",
            "score: 99999 depth: -3",
            "**Question: **",
            "* **Difficulty Score**: 0.5",
            "難易度: 高い",
        ];

        for input in hostile {
            for record in parse_analysis(input, "huggingface").records {
                assert!((1.0..=10.0).contains(&record.difficulty_score));
                assert!((1..=5).contains(&record.application_depth));
                assert!((1.0..=10.0).contains(&record.complexity_index));
                assert_eq!(
                    record.complexity_index,
                    complexity_from_depth(record.application_depth)
                );
            }
        }
    }

    #[test]
    fn test_coarse_scans_for_synthesis_seed() {
        let response = "I'd call this a hard paper, maybe 7/10 overall.";

        assert_eq!(detect_difficulty_word(response), Some("hard".to_string()));
        assert_eq!(detect_numeric_score(response), Some("7".to_string()));
        assert_eq!(detect_difficulty_word("nothing here"), None);
        assert_eq!(detect_numeric_score("nothing here"), None);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("tough"), "Tough");
        assert_eq!(title_case("VERY tough"), "Very Tough");
        assert_eq!(title_case(""), "");
    }
}
