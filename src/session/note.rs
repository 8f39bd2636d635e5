//! Note records exchanged with the note store.

use serde::{Deserialize, Serialize};

/// Title stored when a drawing is saved without one.
pub const UNTITLED_DRAWING: &str = "Untitled Drawing";

/// Kind of note; only `Drawing` notes carry a scene in `content`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
    Text,
    Code,
    Drawing,
}

/// A stored note. `content` is opaque to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type")]
    pub note_type: NoteType,
    #[serde(default)]
    pub content: String,
}

impl Note {
    /// A drawing note; an empty or blank title becomes [`UNTITLED_DRAWING`].
    pub fn drawing(title: &str, content: String) -> Self {
        let title = if title.trim().is_empty() {
            UNTITLED_DRAWING.to_string()
        } else {
            title.to_string()
        };
        Self {
            title,
            note_type: NoteType::Drawing,
            content,
        }
    }
}
