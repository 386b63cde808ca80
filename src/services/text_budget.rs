//! Character-budgeted truncation that tries to keep the high-value parts of
//! a document: keyword-anchored excerpts for syllabi, structural lead-in
//! for question papers, head plus tail for everything else.

use regex::RegexBuilder;

/// Markers whose presence identifies a question paper, where the lead-in
/// carries the most salvageable content.
const STRUCTURE_MARKERS: [&str; 6] = ["question", "q1", "q2", "q3", "part a", "part b"];

const TRUNCATED_MARKER: &str = "... [truncated]";
const MORE_QUESTIONS_MARKER: &str = "... [truncated - more questions may exist]";
const MIDDLE_TRUNCATED_MARKER: &str = "... [middle content truncated] ...";

/// Characters of context kept around a priority-keyword match.
const CONTEXT_BEFORE: usize = 100;
const CONTEXT_AFTER: usize = 200;

/// Truncate `text` to roughly `max_chars` characters (a short truncation
/// marker may be appended). Pure function of its inputs: within-budget text
/// is returned unchanged, so the operation is idempotent.
pub fn smart_truncate(text: &str, max_chars: usize, priority_keywords: &[String]) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        // No usable budget at all; only the marker survives.
        return TRUNCATED_MARKER.to_string();
    }

    // All offsets below are char positions, never raw byte indexes, so a
    // window can never land inside a multi-byte character.
    let bounds = char_boundaries(text);

    if !priority_keywords.is_empty() {
        let mut important_sections = Vec::new();
        for keyword in priority_keywords {
            if keyword.trim().is_empty() {
                continue;
            }
            let pattern = RegexBuilder::new(&regex::escape(keyword))
                .case_insensitive(true)
                .build();
            let Ok(pattern) = pattern else { continue };

            if let Some(found) = pattern.find(text) {
                let start = char_index_of(&bounds, found.start());
                let end = char_index_of(&bounds, found.end());
                let context_start = start.saturating_sub(CONTEXT_BEFORE);
                let context_end = (end + CONTEXT_AFTER).min(char_count);
                important_sections.push(slice_chars(text, &bounds, context_start, context_end));
            }
        }

        if !important_sections.is_empty() {
            let combined = important_sections.join("... ");
            if combined.chars().count() <= max_chars {
                return combined;
            }
        }
    }

    let lowered = text.to_lowercase();
    if STRUCTURE_MARKERS.iter().any(|marker| lowered.contains(marker)) {
        // Question papers: keep as much of the question text as possible.
        return format!(
            "{}{}",
            slice_chars(text, &bounds, 0, max_chars),
            MORE_QUESTIONS_MARKER
        );
    }

    if max_chars > 200 {
        // Preserve both the lead-in and the conclusion.
        let head = slice_chars(text, &bounds, 0, max_chars * 7 / 10);
        let tail_len = max_chars * 3 / 10;
        let tail = slice_chars(text, &bounds, char_count - tail_len, char_count);
        return format!("{}{}{}", head, MIDDLE_TRUNCATED_MARKER, tail);
    }

    format!(
        "{}{}",
        slice_chars(text, &bounds, 0, max_chars),
        TRUNCATED_MARKER
    )
}

/// Pick syllabus lines that look like topic headings, to seed the
/// priority keywords for truncation. Capped at the top ten.
pub fn extract_key_topics(syllabus_text: &str) -> Vec<String> {
    const TOPIC_INDICATORS: [&str; 5] = ["chapter", "unit", "topic", "section", "module"];

    syllabus_text
        .lines()
        .filter(|line| {
            let lowered = line.to_lowercase();
            TOPIC_INDICATORS
                .iter()
                .any(|indicator| lowered.contains(indicator))
        })
        .map(|line| line.trim().to_string())
        .take(10)
        .collect()
}

/// Byte offset of every char boundary, plus the end of the string.
fn char_boundaries(text: &str) -> Vec<usize> {
    let mut bounds: Vec<usize> = text.char_indices().map(|(offset, _)| offset).collect();
    bounds.push(text.len());
    bounds
}

/// Char position of a byte offset that is known to sit on a boundary.
fn char_index_of(bounds: &[usize], byte_offset: usize) -> usize {
    bounds.partition_point(|&b| b < byte_offset)
}

fn slice_chars<'a>(text: &'a str, bounds: &[usize], start: usize, end: usize) -> &'a str {
    let last = bounds.len() - 1;
    let start = start.min(last);
    let end = end.min(last).max(start);
    &text[bounds[start]..bounds[end]]
}
