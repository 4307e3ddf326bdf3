//! Note domain model.
//!
//! # Responsibility
//! - Define the atomic unit of content stored in a notebook.
//! - Provide small value types for canvas placement and timestamps.
//!
//! # Invariants
//! - `id` is supplied externally and never derived from content.
//! - `created_at <= modified_at` for notes built through the repository.
//! - A note never lists itself in `links` (enforced by the repository).

use crate::model::value::AttributeValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Unix epoch milliseconds. Opaque to the engine apart from ordering.
pub type Timestamp = i64;

/// Opaque note identifier.
///
/// Ids come from an [`IdGenerator`](crate::env::IdGenerator); the engine only
/// compares them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Position on the spatial canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of a note card on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A single note in the knowledge graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Stable id used as the notebook key and as link target.
    pub id: NoteId,
    pub title: String,
    /// Plain text body.
    pub content: String,
    /// `None` until the note is placed on the canvas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    pub created_at: Timestamp,
    /// Refreshed by every repository update.
    pub modified_at: Timestamp,
    /// Outgoing links in the order they were created.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<NoteId>,
    /// Template/inheritance reference. Stored and round-tripped only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prototype: Option<NoteId>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl Note {
    /// Creates an empty note with both timestamps set to `now`.
    pub fn new(id: NoteId, title: impl Into<String>, now: Timestamp) -> Self {
        Self {
            id,
            title: title.into(),
            content: String::new(),
            position: None,
            size: None,
            created_at: now,
            modified_at: now,
            links: Vec::new(),
            prototype: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    pub fn links_to(&self, target: &NoteId) -> bool {
        self.links.contains(target)
    }

    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::{Note, NoteId, Point};

    #[test]
    fn new_note_sets_both_timestamps() {
        let note = Note::new(NoteId::from("n-1"), "Title", 42);
        assert_eq!(note.created_at, 42);
        assert_eq!(note.modified_at, 42);
        assert!(note.content.is_empty());
        assert!(note.links.is_empty());
        assert!(note.position.is_none());
    }

    #[test]
    fn serialization_skips_empty_optional_fields() {
        let note = Note::new(NoteId::from("n-1"), "Title", 1);
        let json = serde_json::to_value(&note).expect("note should serialize");
        assert_eq!(json["id"], "n-1");
        assert!(json.get("position").is_none());
        assert!(json.get("links").is_none());
        assert!(json.get("attributes").is_none());

        let placed = note.with_position(Point::new(3.0, 4.0));
        let json = serde_json::to_value(&placed).expect("note should serialize");
        assert_eq!(json["position"]["x"], 3.0);
    }
}
