//! Generic input event types for the editor surface.

/// What the pointer was over when it was pressed.
///
/// Hit-testing belongs to the rendering surface; the editor only receives its
/// verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerTarget {
    /// Empty canvas background
    Canvas,
    /// An existing element, by id
    Element(String),
}

impl PointerTarget {
    pub fn element(id: impl Into<String>) -> Self {
        PointerTarget::Element(id.into())
    }
}

/// Generic key representation.
///
/// Surfaces map their native key codes to these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    Escape,
    Delete,
    Backspace,
    Shift,
    Ctrl,
    /// Meta/Cmd/Super
    Meta,
    Alt,
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Name used for keybinding lookup, `None` for modifiers and unknown keys.
    pub fn binding_name(self) -> Option<String> {
        match self {
            Key::Char(c) => Some(c.to_string()),
            Key::Escape => Some("Escape".to_string()),
            Key::Delete => Some("Delete".to_string()),
            Key::Backspace => Some("Backspace".to_string()),
            Key::Shift | Key::Ctrl | Key::Meta | Key::Alt | Key::Unknown => None,
        }
    }
}
