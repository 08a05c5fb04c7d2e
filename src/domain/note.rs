// src/domain/note.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::util::text::split_tags;

/// A note as stored by the remote service.
///
/// The identifier is assigned by the service and travels as `_id` on the wire.
/// Fields this client does not model (owner, version) are kept in `extra` and
/// sent back unchanged on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Note {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Latest known modification time, falling back to creation time.
    pub fn last_touched(&self) -> Option<DateTime<Utc>> {
        self.updated_at.or(self.created_at)
    }
}

/// Body of a create request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags: Vec::new(),
        }
    }

    /// Replace the tags with those parsed from a comma-separated input string.
    pub fn with_tag_input(mut self, input: &str) -> Self {
        self.tags = split_tags(input);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// Field edits applied locally before the whole record is sent back.
///
/// Unset fields keep the note's current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteEdit {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl NoteEdit {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.tags.is_none()
    }

    /// Produce the full replacement record for `note`.
    pub fn apply(&self, note: &Note) -> Note {
        let mut updated = note.clone();
        if let Some(title) = &self.title {
            updated.title = title.clone();
        }
        if let Some(content) = &self.content {
            updated.content = content.clone();
        }
        if let Some(tags) = &self.tags {
            updated.tags = tags.clone();
        }
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_service_json_when_deserializing_then_maps_underscore_id_and_timestamps() {
        // Arrange
        let json = r#"{
            "_id": "65f1c0ffee",
            "user": "u1",
            "title": "Rust",
            "content": "Ownership",
            "tags": ["lang"],
            "createdAt": "2024-03-01T10:00:00.000Z",
            "updatedAt": "2024-03-02T10:00:00.000Z",
            "__v": 0
        }"#;

        // Act
        let note: Note = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(note.id, "65f1c0ffee");
        assert_eq!(note.tags, vec!["lang"]);
        assert!(note.created_at.is_some());
        assert_eq!(note.last_touched(), note.updated_at);
    }

    #[test]
    fn given_unmodelled_service_fields_when_reserializing_then_sends_them_back() {
        // Arrange
        let json = r#"{"_id":"n1","title":"T","user":"u1","__v":3}"#;
        let note: Note = serde_json::from_str(json).unwrap();

        // Act
        let value = serde_json::to_value(&note).unwrap();

        // Assert
        assert_eq!(value["user"], "u1");
        assert_eq!(value["__v"], 3);
        assert_eq!(value["_id"], "n1");
        assert!(!note.extra.contains_key("_id"));
    }

    #[test]
    fn given_minimal_json_when_deserializing_then_defaults_optional_fields() {
        let note: Note = serde_json::from_str(r#"{"_id":"1","title":"T"}"#).unwrap();

        assert_eq!(note.content, "");
        assert!(note.tags.is_empty());
        assert_eq!(note.last_touched(), None);
    }

    #[test]
    fn given_note_when_serializing_then_uses_wire_names() {
        let note = Note {
            id: "abc".to_string(),
            title: "T".to_string(),
            content: "C".to_string(),
            tags: vec![],
            created_at: None,
            updated_at: None,
            extra: Default::default(),
        };

        let value = serde_json::to_value(&note).unwrap();

        assert_eq!(value["_id"], "abc");
        assert!(value.get("createdAt").is_none());
    }

    #[test]
    fn given_tag_input_when_building_draft_then_splits_and_trims() {
        let draft = NoteDraft::new("T", "C").with_tag_input(" rust, , cli ,");

        assert_eq!(draft.tags, vec!["rust", "cli"]);
    }

    #[test]
    fn given_partial_edit_when_applying_then_keeps_other_fields() {
        // Arrange
        let note = Note {
            id: "1".to_string(),
            title: "Old".to_string(),
            content: "Body".to_string(),
            tags: vec!["a".to_string()],
            created_at: None,
            updated_at: None,
            extra: Default::default(),
        };
        let edit = NoteEdit {
            title: Some("New".to_string()),
            ..Default::default()
        };

        // Act
        let updated = edit.apply(&note);

        // Assert
        assert_eq!(updated.title, "New");
        assert_eq!(updated.content, "Body");
        assert_eq!(updated.tags, vec!["a"]);
        assert_eq!(updated.id, "1");
    }
}
