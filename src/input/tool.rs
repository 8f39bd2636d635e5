//! Editor tool selection.

use crate::draw::ElementTool;
use std::fmt;
use std::str::FromStr;

/// Editor tool selection.
///
/// The active tool determines what a pointer press does: `Select` picks and
/// manipulates existing elements, every other tool creates a new element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tool {
    /// Pick, drag and resize existing elements
    Select,
    /// Freehand stroke in the current colour (default)
    #[default]
    Pen,
    /// Freehand stroke that punches through earlier strokes
    Eraser,
    /// Prompt for a string and place it at the click position
    Text,
    /// Straight arrow from press to release
    Arrow,
    /// Rectangle outline from the press corner
    Rectangle,
    /// Circle outline centred on the press position
    Circle,
}

impl Tool {
    pub const ALL: [Tool; 7] = [
        Tool::Select,
        Tool::Pen,
        Tool::Eraser,
        Tool::Text,
        Tool::Arrow,
        Tool::Rectangle,
        Tool::Circle,
    ];

    /// The element tool recorded on elements this tool creates.
    pub fn element_tool(self) -> Option<ElementTool> {
        match self {
            Tool::Select => None,
            Tool::Pen => Some(ElementTool::Pen),
            Tool::Eraser => Some(ElementTool::Eraser),
            Tool::Text => Some(ElementTool::Text),
            Tool::Arrow => Some(ElementTool::Arrow),
            Tool::Rectangle => Some(ElementTool::Rectangle),
            Tool::Circle => Some(ElementTool::Circle),
        }
    }

    /// Whether the surface should show a stroke-sized dot under the pointer.
    pub fn uses_dot_cursor(self) -> bool {
        matches!(
            self,
            Tool::Pen | Tool::Rectangle | Tool::Circle | Tool::Arrow
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tool::Select => "select",
            Tool::Pen => "pen",
            Tool::Eraser => "eraser",
            Tool::Text => "text",
            Tool::Arrow => "arrow",
            Tool::Rectangle => "rectangle",
            Tool::Circle => "circle",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .into_iter()
            .find(|tool| tool.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown tool '{}'", s))
    }
}
