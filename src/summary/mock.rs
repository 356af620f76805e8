//! Local summarizer used when no LLM is configured
//!
//! Slices the transcript into sentence fragments and picks points, decisions and
//! action items out of them with keyword patterns. Deterministic and I/O free, so the
//! rest of the service can be exercised without an API key.

use regex::Regex;

use super::{ActionItem, Summary};

/// Default number of fragments kept as points
pub const DEFAULT_MAX_POINTS: usize = 6;

/// Owners handed out round-robin to detected action items
const OWNERS: [&str; 4] = ["Alex", "Priya", "Sam", "Jordan"];

const EMPTY_TRANSCRIPT_POINT: &str = "No discussion points were captured.";

#[derive(Debug, Clone)]
pub struct MockSummarizer {
    max_points: usize,
    sentence_end: Regex,
    decision: Regex,
    action: Regex,
    deadline: Regex,
}

impl Default for MockSummarizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_POINTS)
    }
}

impl MockSummarizer {
    pub fn new(max_points: usize) -> Self {
        Self {
            max_points: max_points.max(1),
            sentence_end: Regex::new(r"[.!?]+\s+").expect("static pattern"),
            decision: Regex::new(r"(?i)\b(decid\w*|decision\w*|agree\w*|approve\w*|demo\w*)\b")
                .expect("static pattern"),
            action: Regex::new(
                r"(?i)\b(monday|tuesday|wednesday|thursday|friday|saturday|sunday|due|deliver\w*|follow[- ]up|by (tomorrow|end of day|eod|next week))\b",
            )
            .expect("static pattern"),
            deadline: Regex::new(
                r"(?i)\b(monday|tuesday|wednesday|thursday|friday|saturday|sunday|tomorrow|next week|end of day|eod)\b",
            )
            .expect("static pattern"),
        }
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    /// Build a summary from the transcript alone.
    pub fn summarize(&self, transcript: &str) -> Summary {
        let fragments = self.fragments(transcript);

        let mut points: Vec<String> = fragments.iter().take(self.max_points).cloned().collect();
        if points.is_empty() {
            points.push(EMPTY_TRANSCRIPT_POINT.to_string());
        }

        let decisions = fragments
            .iter()
            .filter(|f| self.decision.is_match(f))
            .cloned()
            .collect();

        let action_items = fragments
            .iter()
            .filter(|f| self.action.is_match(f))
            .enumerate()
            .map(|(i, fragment)| ActionItem {
                owner: OWNERS[i % OWNERS.len()].to_string(),
                task: fragment.clone(),
                due: self.due_date(fragment),
            })
            .collect();

        Summary {
            points,
            decisions,
            action_items,
        }
    }

    /// Split on newlines and after sentence-ending punctuation, keeping the punctuation.
    pub fn fragments(&self, transcript: &str) -> Vec<String> {
        let mut fragments = Vec::new();

        for line in transcript.lines() {
            let mut start = 0;
            for m in self.sentence_end.find_iter(line) {
                let end = m.start() + m.as_str().trim_end().len();
                push_fragment(&mut fragments, &line[start..end]);
                start = m.end();
            }
            push_fragment(&mut fragments, &line[start..]);
        }

        fragments
    }

    fn due_date(&self, fragment: &str) -> String {
        match self.deadline.find(fragment) {
            Some(m) if m.as_str().eq_ignore_ascii_case("eod") => "EOD".to_string(),
            Some(m) => capitalize(&m.as_str().to_lowercase()),
            None => "TBD".to_string(),
        }
    }
}

fn push_fragment(fragments: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        fragments.push(trimmed.to_string());
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
