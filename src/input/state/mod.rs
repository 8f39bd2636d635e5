mod actions;
mod core;
mod mouse;
mod selection;

pub use self::core::{DrawingState, EditorState, MAX_STROKE_WIDTH, MIN_STROKE_WIDTH};
pub use mouse::TextPrompt;
