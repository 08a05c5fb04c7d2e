// src/infrastructure/flashcard_parser.rs
//
// Best-effort extraction of question/answer pairs from free-form generated
// text. Malformed input never fails; it just yields fewer cards.
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::constants::MIN_FALLBACK_ANSWER_CHARS;
use crate::domain::Flashcard;

lazy_static! {
    static ref LEADING_BULLET: Regex =
        Regex::new(r"^\*\s*").expect("Failed to compile bullet regex");
}

const BOLD_MARKER: &str = "**";
const HEADING_WORD: &str = "Flashcard";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Question,
    Answer,
}

/// Label variants per side. Classification is substring containment, tested
/// in table order; stripping removes the first occurrence of every variant in turn.
const LABEL_TABLE: [(Side, [&str; 4]); 2] = [
    (
        Side::Question,
        ["**Front:**", "**Front (Question):**", "Front (Question):", "Front:"],
    ),
    (
        Side::Answer,
        ["**Back:**", "**Back (Answer):**", "Back (Answer):", "Back:"],
    ),
];

#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    /// Text following a side label; `None` if nothing remained after stripping.
    Labeled(Side, Option<String>),
    Plain(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    for (side, labels) in &LABEL_TABLE {
        if labels.iter().any(|label| line.contains(label)) {
            return Line::Labeled(*side, non_empty(strip_labels(line, labels)));
        }
    }
    Line::Plain(line)
}

fn strip_labels(line: &str, labels: &[&str]) -> String {
    let mut text = line.to_string();
    for label in labels {
        if let Some(pos) = text.find(label) {
            text.replace_range(pos..pos + label.len(), "");
        }
    }
    strip_bullet(&text).trim().to_string()
}

fn strip_bullet(text: &str) -> String {
    LEADING_BULLET.replace(text, "").into_owned()
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// An unlabeled line accepted as the answer to a pending question.
///
/// Heuristic: narrative text can be mistaken for an answer when the
/// generated format drifts.
fn fallback_answer(line: &str) -> Option<String> {
    if line.contains(BOLD_MARKER) || line.contains(HEADING_WORD) {
        return None;
    }
    let stripped = strip_bullet(line).trim().to_string();
    if stripped.chars().count() > MIN_FALLBACK_ANSWER_CHARS {
        Some(stripped)
    } else {
        None
    }
}

/// The card currently being assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ParserState {
    /// No question yet. An answer label seen before any question is kept and
    /// paired with the next question.
    AwaitingQuestion { stray_answer: Option<String> },
    AwaitingAnswer { question: String },
    Complete { question: String, answer: String },
}

impl ParserState {
    fn start() -> Self {
        ParserState::AwaitingQuestion { stray_answer: None }
    }

    fn from_parts(question: Option<String>, answer: Option<String>) -> Self {
        match (question, answer) {
            (Some(question), Some(answer)) => ParserState::Complete { question, answer },
            (Some(question), None) => ParserState::AwaitingAnswer { question },
            (None, stray_answer) => ParserState::AwaitingQuestion { stray_answer },
        }
    }

    fn into_parts(self) -> (Option<String>, Option<String>) {
        match self {
            ParserState::AwaitingQuestion { stray_answer } => (None, stray_answer),
            ParserState::AwaitingAnswer { question } => (Some(question), None),
            ParserState::Complete { question, answer } => (Some(question), Some(answer)),
        }
    }

    /// Advance on one non-blank line, pushing a finished card into `cards` when
    /// a new question starts after a complete one.
    fn step(self, line: Line<'_>, cards: &mut Vec<Flashcard>) -> Self {
        match line {
            Line::Labeled(Side::Question, question) => {
                let answer = match self {
                    ParserState::Complete { question, answer } => {
                        cards.extend(Flashcard::new(question, answer));
                        None
                    }
                    // A question without an answer is overwritten, never emitted.
                    other => other.into_parts().1,
                };
                ParserState::from_parts(question, answer)
            }
            Line::Labeled(Side::Answer, answer) => {
                let (question, _) = self.into_parts();
                ParserState::from_parts(question, answer)
            }
            Line::Plain(text) => match self {
                ParserState::AwaitingAnswer { question } => match fallback_answer(text) {
                    Some(answer) => ParserState::Complete { question, answer },
                    None => ParserState::AwaitingAnswer { question },
                },
                other => other,
            },
        }
    }

    fn finish(self, cards: &mut Vec<Flashcard>) {
        if let ParserState::Complete { question, answer } = self {
            cards.extend(Flashcard::new(question, answer));
        }
    }
}

/// Extract flashcards from generated text, in input order.
///
/// Recognised labels are `Front:` / `Front (Question):` and `Back:` /
/// `Back (Answer):`, bold or plain, optionally behind a `*` bullet. A question
/// left without an answer at the end of input is dropped.
pub fn parse_flashcards(text: &str) -> Vec<Flashcard> {
    let mut cards = Vec::new();
    let mut state = ParserState::start();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let classified = classify(line);
        trace!(?classified, "Classified flashcard line");
        state = state.step(classified, &mut cards);
    }
    state.finish(&mut cards);

    debug!(cards = cards.len(), input_len = text.len(), "Parsed flashcards");
    cards
}
