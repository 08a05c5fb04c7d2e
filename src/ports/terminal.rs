// src/ports/terminal.rs
use chrono::{DateTime, Utc};
use std::fmt::Write;

use crate::application::flashcards_page::FlashcardViewer;
use crate::domain::{FlashcardSet, Note, SummaryRecord};
use crate::util::text::{first_line, preview, short_id};
use crate::util::time::{relative_time, short_timestamp};

const PREVIEW_CHARS: usize = 60;

/// Plain-text rendering for the terminal.
#[derive(Debug)]
pub struct TerminalPresenter {
    now: DateTime<Utc>,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self { now: Utc::now() }
    }

    /// Fix the reference time used for relative ages.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// One line per note: id, title, age, tags, then a content preview.
    pub fn render_note_list(&self, notes: &[&Note]) -> String {
        if notes.is_empty() {
            return "No notes found.\n".to_string();
        }
        let mut out = String::new();
        for note in notes {
            let age = note
                .last_touched()
                .map(|t| relative_time(t, self.now))
                .unwrap_or_default();
            let _ = write!(out, "{}\t{}", note.id, note.title);
            if !age.is_empty() {
                let _ = write!(out, "\t{age}");
            }
            if !note.tags.is_empty() {
                let _ = write!(out, "\t[{}]", note.tags.join(", "));
            }
            out.push('\n');
            let snippet = preview(first_line(&note.content), PREVIEW_CHARS);
            if !snippet.is_empty() {
                let _ = writeln!(out, "\t{snippet}");
            }
        }
        out
    }

    pub fn render_note(&self, note: &Note) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# {}", note.title);
        let _ = writeln!(out, "id: {}", note.id);
        if !note.tags.is_empty() {
            let _ = writeln!(out, "tags: {}", note.tags.join(", "));
        }
        if let Some(created) = note.created_at {
            let _ = writeln!(out, "created: {}", short_timestamp(created));
        }
        if let Some(updated) = note.updated_at {
            let _ = writeln!(out, "updated: {}", relative_time(updated, self.now));
        }
        out.push('\n');
        out.push_str(&note.content);
        if !note.content.ends_with('\n') {
            out.push('\n');
        }
        out
    }

    pub fn render_tags(&self, tags: &[String]) -> String {
        if tags.is_empty() {
            return "No tags.\n".to_string();
        }
        tags.iter().map(|t| format!("{t}\n")).collect()
    }

    pub fn render_summary(&self, record: &SummaryRecord) -> String {
        format!(
            "Summary #{} ({})\n\n{}\n",
            short_id(record.id),
            short_timestamp(record.created_at),
            record.summary.trim_end()
        )
    }

    pub fn render_flashcard_set(&self, set: &FlashcardSet) -> String {
        let mut out = format!(
            "Flashcard set #{} ({} cards, {})\n",
            short_id(set.id),
            set.cards.len(),
            short_timestamp(set.created_at)
        );
        for (i, card) in set.cards.iter().enumerate() {
            let _ = write!(out, "\n{}. Q: {}\n   A: {}\n", i + 1, card.question(), card.answer());
        }
        out
    }

    /// The showing side of the current card with its position.
    pub fn render_card(&self, viewer: &FlashcardViewer) -> String {
        let (position, total) = viewer.position();
        let side = if viewer.is_flipped() { "Answer" } else { "Question" };
        format!(
            "Card {position} of {total} - {side}\n\n  {}\n",
            viewer.visible_text()
        )
    }
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new()
    }
}
