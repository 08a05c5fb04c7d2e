// src/application/note_list.rs
use std::sync::Arc;

use crate::domain::Note;

/// Outcome of a gateway call, applied to the local mirror of the note list.
#[derive(Debug, Clone, PartialEq)]
pub enum NoteAction {
    Loaded(Vec<Note>),
    Created(Note),
    Updated(Note),
    Deleted(String),
}

/// Immutable snapshot of the notes held locally, newest-created first.
///
/// Entries are keyed by the service identifier. Every mutation goes through
/// [`NoteList::reduce`], which returns a new snapshot and leaves the old one intact,
/// so the same sequence of actions always produces the same list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteList {
    notes: Arc<[Note]>,
}

impl NoteList {
    pub fn new(notes: Vec<Note>) -> Self {
        Self {
            notes: notes.into(),
        }
    }

    pub fn reduce(&self, action: NoteAction) -> NoteList {
        match action {
            NoteAction::Loaded(notes) => NoteList::new(notes),
            NoteAction::Created(note) => {
                let mut notes = Vec::with_capacity(self.notes.len() + 1);
                let id = note.id.clone();
                notes.push(note);
                notes.extend(self.notes.iter().filter(|n| n.id != id).cloned());
                NoteList::new(notes)
            }
            NoteAction::Updated(note) => {
                if self.get(&note.id).is_none() {
                    return self.clone();
                }
                NoteList::new(
                    self.notes
                        .iter()
                        .map(|n| if n.id == note.id { note.clone() } else { n.clone() })
                        .collect(),
                )
            }
            NoteAction::Deleted(id) => {
                NoteList::new(self.notes.iter().filter(|n| n.id != id).cloned().collect())
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn as_slice(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Every distinct tag across all notes, in first-seen order.
    pub fn all_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for tag in self.notes.iter().flat_map(|n| n.tags.iter()) {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
        tags
    }
}
