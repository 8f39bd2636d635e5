//! Drawing persistence.
//!
//! Converts a scene to and from the string stored in a note's `content`,
//! defines the note store boundary with a file-backed implementation, and
//! ties an editor to a note through [`DrawingSession`].

mod codec;
mod document;
mod note;
mod store;

pub use codec::{CodecError, backfill_ids, decode_scene, encode_scene};
pub use document::{DrawingSession, PersistError, SessionError, SessionPhase};
pub use note::{Note, NoteType, UNTITLED_DRAWING};
pub use store::{FileNoteStore, NoteStore, StoreError, read_note_file, write_note_file};

#[cfg(test)]
mod tests;
