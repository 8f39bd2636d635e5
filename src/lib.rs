//! Vector drawing editor core for drawing notes.
//!
//! The [`input::EditorState`] turns pointer and keyboard events into edits of
//! a scene of [`draw::Element`]s with undo/redo; [`session`] converts scenes
//! to and from the string stored in a note and talks to the note store.

pub mod config;
pub mod draw;
pub mod input;
pub mod session;
pub mod util;

pub use config::Config;
pub use draw::{Element, Frame};
pub use input::EditorState;
pub use session::DrawingSession;
