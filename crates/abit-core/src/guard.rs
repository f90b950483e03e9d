//! Post-generation safety and quality checks.

use crate::filters;
use crate::level::Level;
use crate::messages;

/// Sanitizes generated text before it reaches the user. First match wins;
/// no regeneration is attempted after a rejection.
pub struct ResponseGuard {
    min_answer_len: usize,
}

/// Apology/uncertainty prefixes that signal the model could not answer.
const APOLOGY_PREFIXES: &[&str] = &["извините", "я не знаю"];

impl ResponseGuard {
    pub fn new(min_answer_len: usize) -> Self {
        Self { min_answer_len }
    }

    /// Final answer text: the trimmed model output, or a fallback when it
    /// fails a check. Rejections are warnings, not errors — the pipeline
    /// functioned, the answer quality did not.
    pub fn sanitize(&self, raw: &str, level: Level, question: &str) -> String {
        if filters::contains_profanity(raw) {
            // Profanity in a generated answer indicates prompt leakage or
            // model failure; never shown to the user.
            tracing::warn!(
                target: "abit::guard",
                level = level.as_str(),
                question = %truncate(question, 120),
                reason = "profanity",
                "generated answer rejected"
            );
            return messages::UNSAFE_ANSWER.to_string();
        }

        let trimmed = raw.trim();
        let lower = trimmed.to_lowercase();
        let too_short = trimmed.chars().count() < self.min_answer_len;
        let apologetic = APOLOGY_PREFIXES.iter().any(|p| lower.starts_with(p));
        let no_info = filters::contains_no_info_phrase(trimmed);
        if too_short || apologetic || no_info {
            tracing::warn!(
                target: "abit::guard",
                level = level.as_str(),
                question = %truncate(question, 120),
                reason = "no_information",
                "generated answer rejected"
            );
            return messages::NO_INFO.to_string();
        }

        trimmed.to_string()
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
