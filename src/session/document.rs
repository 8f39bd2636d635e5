//! An editor bound to one drawing note.

use super::codec::{self, CodecError};
use super::note::{Note, NoteType};
use super::store::{NoteStore, StoreError};
use crate::input::EditorState;
use crate::util::now_millis;
use log::{info, warn};
use std::sync::Arc;
use thiserror::Error;

/// Underlying cause of a failed load or save.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Errors surfaced to the caller of a [`DrawingSession`].
#[derive(Debug, Error)]
pub enum SessionError {
    /// The caller should leave the editor; nothing was loaded.
    #[error("failed to load drawing '{id}': {source}")]
    Load {
        id: String,
        #[source]
        source: PersistError,
    },

    /// The scene in memory is untouched and can be saved again.
    #[error("failed to save drawing: {0}")]
    Save(#[source] PersistError),

    #[error("drawing is still loading")]
    NotReady,
}

/// Whether the editor may be shown yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for the store; show a placeholder
    Loading,
    /// Editor is live
    Ready,
}

/// An [`EditorState`] tied to a note in a [`NoteStore`].
///
/// A session for a new drawing has no note id until its first save, which
/// creates the note; later saves update it.
pub struct DrawingSession {
    store: Arc<dyn NoteStore>,
    note_id: Option<String>,
    /// Title saved with the note
    pub title: String,
    phase: SessionPhase,
    editor: EditorState,
}

impl DrawingSession {
    /// A session for a drawing that does not exist yet.
    pub fn new_blank(store: Arc<dyn NoteStore>, editor: EditorState) -> Self {
        Self {
            store,
            note_id: None,
            title: String::new(),
            phase: SessionPhase::Ready,
            editor,
        }
    }

    /// A session for note `id` that has not been fetched yet.
    pub fn loading(store: Arc<dyn NoteStore>, id: impl Into<String>, editor: EditorState) -> Self {
        Self {
            store,
            note_id: Some(id.into()),
            title: String::new(),
            phase: SessionPhase::Loading,
            editor,
        }
    }

    /// Fetches note `id` and returns a ready session.
    pub async fn open(
        store: Arc<dyn NoteStore>,
        id: impl Into<String>,
        editor: EditorState,
    ) -> Result<Self, SessionError> {
        let mut session = Self::loading(store, id, editor);
        session.load().await?;
        Ok(session)
    }

    /// Loads the note's scene into the editor and switches to `Ready`.
    ///
    /// On failure the session stays in `Loading`.
    pub async fn load(&mut self) -> Result<(), SessionError> {
        let Some(id) = self.note_id.clone() else {
            self.phase = SessionPhase::Ready;
            return Ok(());
        };

        let load_error = |source: PersistError| SessionError::Load {
            id: id.clone(),
            source,
        };

        let note = self
            .store
            .load(&id)
            .await
            .map_err(|err| load_error(err.into()))?;
        if note.note_type != NoteType::Drawing {
            warn!(
                "Note {id} has type {:?}; reading its content as a drawing",
                note.note_type
            );
        }

        let frame =
            codec::decode_scene(&note.content, now_millis()).map_err(|err| load_error(err.into()))?;

        info!("Loaded drawing {id} with {} elements", frame.len());
        self.title = note.title;
        self.editor.load_scene(frame);
        self.phase = SessionPhase::Ready;
        Ok(())
    }

    /// Persists the current scene and returns the note id.
    pub async fn save(&mut self) -> Result<String, SessionError> {
        if self.phase != SessionPhase::Ready {
            return Err(SessionError::NotReady);
        }

        let content = codec::encode_scene(self.editor.frame())
            .map_err(|err| SessionError::Save(err.into()))?;
        let note = Note::drawing(&self.title, content);

        let id = match &self.note_id {
            Some(id) => {
                self.store
                    .update(id, &note)
                    .await
                    .map_err(|err| SessionError::Save(err.into()))?;
                id.clone()
            }
            None => {
                let id = self
                    .store
                    .create(&note)
                    .await
                    .map_err(|err| SessionError::Save(err.into()))?;
                self.note_id = Some(id.clone());
                id
            }
        };

        info!(
            "Saved drawing {id} ({} elements)",
            self.editor.elements().len()
        );
        Ok(id)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn note_id(&self) -> Option<&str> {
        self.note_id.as_deref()
    }

    /// The editor, once loading has finished.
    pub fn editor(&self) -> Option<&EditorState> {
        match self.phase {
            SessionPhase::Ready => Some(&self.editor),
            SessionPhase::Loading => None,
        }
    }

    pub fn editor_mut(&mut self) -> Option<&mut EditorState> {
        match self.phase {
            SessionPhase::Ready => Some(&mut self.editor),
            SessionPhase::Loading => None,
        }
    }
}
