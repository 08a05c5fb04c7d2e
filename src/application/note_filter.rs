// src/application/note_filter.rs
use crate::domain::Note;

/// Exact tag restriction on top of the text search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TagFilter {
    #[default]
    All,
    Tag(String),
}

impl TagFilter {
    /// `"all"` (any case) and blank input mean no restriction.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            TagFilter::All
        } else {
            TagFilter::Tag(trimmed.to_string())
        }
    }
}

/// Search state for the notes view, recomputed against the full list on every change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    query: String,
    tag: TagFilter,
}

impl NoteFilter {
    pub fn new(query: impl Into<String>, tag: TagFilter) -> Self {
        Self {
            query: query.into(),
            tag,
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_tag(&mut self, tag: TagFilter) {
        self.tag = tag;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn tag(&self) -> &TagFilter {
        &self.tag
    }

    /// Case-insensitive substring match on title, content or any tag,
    /// intersected with the tag restriction.
    pub fn matches(&self, note: &Note) -> bool {
        self.matches_query(note) && self.matches_tag(note)
    }

    fn matches_query(&self, note: &Note) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        note.title.to_lowercase().contains(&needle)
            || note.content.to_lowercase().contains(&needle)
            || note.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    }

    fn matches_tag(&self, note: &Note) -> bool {
        match &self.tag {
            TagFilter::All => true,
            TagFilter::Tag(tag) => note.has_tag(tag),
        }
    }

    pub fn apply<'a>(&self, notes: &'a [Note]) -> Vec<&'a Note> {
        notes.iter().filter(|n| self.matches(n)).collect()
    }
}
