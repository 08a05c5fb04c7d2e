// src/domain/flashcard.rs
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single question/answer pair. Both sides are non-empty once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flashcard {
    question: String,
    answer: String,
}

impl Flashcard {
    /// Build a card from raw sides, trimming both.
    ///
    /// Returns `None` if either side is empty after trimming.
    pub fn new(question: impl AsRef<str>, answer: impl AsRef<str>) -> Option<Self> {
        let question = question.as_ref().trim();
        let answer = answer.as_ref().trim();
        if question.is_empty() || answer.is_empty() {
            return None;
        }
        Some(Self {
            question: question.to_string(),
            answer: answer.to_string(),
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }
}

/// Cards derived from one generation response, held only in memory.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardSet {
    pub id: u64,
    pub original_text: String,
    pub cards: Vec<Flashcard>,
    pub created_at: DateTime<Utc>,
}
