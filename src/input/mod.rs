//! Input handling and tool state machine.
//!
//! This module translates surface pointer and keyboard events into edits of
//! the scene. It maintains the current tool, the paint settings (colour,
//! stroke width), the selection, and the state machine for an in-progress
//! stroke.

pub mod events;
pub mod modifiers;
pub mod state;
pub mod tool;

pub use events::{Key, PointerTarget};
pub use modifiers::Modifiers;
pub use state::{DrawingState, EditorState, TextPrompt};
pub use tool::Tool;
