//! Keybinding configuration types and parsing.
//!
//! This module defines the configurable keybinding system that allows users
//! to customize keyboard shortcuts for history and tool actions.

use crate::input::Tool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All possible actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // History
    Undo,
    Redo,
    ClearCanvas,

    // Tool selection
    SelectTool,
    PenTool,
    EraserTool,
    TextTool,
    ArrowTool,
    RectangleTool,
    CircleTool,
}

impl Action {
    /// The tool this action switches to, if it is a tool selection.
    pub fn tool(self) -> Option<Tool> {
        match self {
            Action::SelectTool => Some(Tool::Select),
            Action::PenTool => Some(Tool::Pen),
            Action::EraserTool => Some(Tool::Eraser),
            Action::TextTool => Some(Tool::Text),
            Action::ArrowTool => Some(Tool::Arrow),
            Action::RectangleTool => Some(Tool::Rectangle),
            Action::CircleTool => Some(Tool::Circle),
            Action::Undo | Action::Redo | Action::ClearCanvas => None,
        }
    }
}

/// A single keybinding: a key with optional modifiers.
///
/// `Ctrl`, `Meta`, `Cmd` and `Super` all set the primary modifier, so
/// `Ctrl+Z` also fires for Cmd+Z.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parse a keybinding string like "Ctrl+Shift+Z" or "Escape".
    /// Modifiers can appear in any order and spaces around '+' are allowed.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        let s_normalized = s.replace(" + ", "+").replace("+ ", "+").replace(" +", "+");
        let parts: Vec<&str> = s_normalized.split('+').collect();

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        for part in parts {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" | "meta" | "cmd" | "super" => ctrl = true,
                "shift" => shift = true,
                "alt" | "option" => alt = true,
                _ => key_parts.push(part),
            }
        }

        if key_parts.is_empty() {
            return Err(format!("No key specified in: {}", s));
        }

        // "Ctrl++" splits into trailing empty parts; the key is '+' itself
        let key = key_parts.join("+");
        let key = if key.is_empty() {
            "+".to_string()
        } else {
            normalize_key(&key)
        };

        Ok(Self {
            key,
            ctrl,
            shift,
            alt,
        })
    }

    /// Check if this keybinding matches the current input state.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == ctrl
            && self.shift == shift
            && self.alt == alt
    }
}

// Single letters are stored upper-case so "Ctrl+z" and "Ctrl+Z" collide.
fn normalize_key(key: &str) -> String {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.to_ascii_uppercase().to_string(),
        _ => key.to_string(),
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings. Users specify them in config.toml as:
/// ```toml
/// [keybindings]
/// undo = ["Ctrl+Z"]
/// redo = ["Ctrl+Shift+Z", "Ctrl+Y"]
/// pen_tool = ["P"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_undo")]
    pub undo: Vec<String>,

    #[serde(default = "default_redo")]
    pub redo: Vec<String>,

    /// Unbound by default; clearing is normally a toolbar action.
    #[serde(default)]
    pub clear_canvas: Vec<String>,

    #[serde(default = "default_select_tool")]
    pub select_tool: Vec<String>,

    #[serde(default = "default_pen_tool")]
    pub pen_tool: Vec<String>,

    #[serde(default = "default_eraser_tool")]
    pub eraser_tool: Vec<String>,

    #[serde(default = "default_text_tool")]
    pub text_tool: Vec<String>,

    #[serde(default = "default_arrow_tool")]
    pub arrow_tool: Vec<String>,

    #[serde(default = "default_rectangle_tool")]
    pub rectangle_tool: Vec<String>,

    #[serde(default = "default_circle_tool")]
    pub circle_tool: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            undo: default_undo(),
            redo: default_redo(),
            clear_canvas: Vec::new(),
            select_tool: default_select_tool(),
            pen_tool: default_pen_tool(),
            eraser_tool: default_eraser_tool(),
            text_tool: default_text_tool(),
            arrow_tool: default_arrow_tool(),
            rectangle_tool: default_rectangle_tool(),
            circle_tool: default_circle_tool(),
        }
    }
}

impl KeybindingsConfig {
    /// Build a lookup map from keybindings to actions for efficient matching.
    /// Returns an error if any keybinding string is invalid or if duplicates are detected.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, String> {
        let mut map = HashMap::new();

        let groups: [(&[String], Action); 10] = [
            (&self.undo, Action::Undo),
            (&self.redo, Action::Redo),
            (&self.clear_canvas, Action::ClearCanvas),
            (&self.select_tool, Action::SelectTool),
            (&self.pen_tool, Action::PenTool),
            (&self.eraser_tool, Action::EraserTool),
            (&self.text_tool, Action::TextTool),
            (&self.arrow_tool, Action::ArrowTool),
            (&self.rectangle_tool, Action::RectangleTool),
            (&self.circle_tool, Action::CircleTool),
        ];

        for (bindings, action) in groups {
            for binding_str in bindings {
                let binding = KeyBinding::parse(binding_str)?;
                if let Some(existing_action) = map.insert(binding, action) {
                    return Err(format!(
                        "Duplicate keybinding '{}' assigned to both {:?} and {:?}",
                        binding_str, existing_action, action
                    ));
                }
            }
        }

        Ok(map)
    }
}

// =============================================================================
// Default keybinding functions
// =============================================================================

fn default_undo() -> Vec<String> {
    vec!["Ctrl+Z".to_string()]
}

fn default_redo() -> Vec<String> {
    vec!["Ctrl+Shift+Z".to_string(), "Ctrl+Y".to_string()]
}

fn default_select_tool() -> Vec<String> {
    vec!["V".to_string()]
}

fn default_pen_tool() -> Vec<String> {
    vec!["P".to_string()]
}

fn default_eraser_tool() -> Vec<String> {
    vec!["E".to_string()]
}

fn default_text_tool() -> Vec<String> {
    vec!["T".to_string()]
}

fn default_arrow_tool() -> Vec<String> {
    vec!["A".to_string()]
}

fn default_rectangle_tool() -> Vec<String> {
    vec!["R".to_string()]
}

fn default_circle_tool() -> Vec<String> {
    vec!["C".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        let binding = KeyBinding::parse("Escape").unwrap();
        assert_eq!(binding.key, "Escape");
        assert!(!binding.ctrl);
        assert!(!binding.shift);
        assert!(!binding.alt);
    }

    #[test]
    fn test_parse_ctrl_shift_key() {
        let binding = KeyBinding::parse("Ctrl+Shift+Z").unwrap();
        assert_eq!(binding.key, "Z");
        assert!(binding.ctrl);
        assert!(binding.shift);
        assert!(!binding.alt);
    }

    #[test]
    fn test_meta_is_primary_modifier() {
        let cmd = KeyBinding::parse("Cmd+Z").unwrap();
        let ctrl = KeyBinding::parse("Ctrl+Z").unwrap();
        assert_eq!(cmd, ctrl);
        assert_eq!(KeyBinding::parse("Meta+Y").unwrap(), KeyBinding::parse("Ctrl+Y").unwrap());
    }

    #[test]
    fn test_parse_case_insensitive() {
        let binding = KeyBinding::parse("ctrl+shift+z").unwrap();
        assert_eq!(binding.key, "Z");
        assert!(binding.ctrl);
        assert!(binding.shift);
    }

    #[test]
    fn test_parse_with_spaces() {
        let binding = KeyBinding::parse("Ctrl + Shift + Z").unwrap();
        assert_eq!(binding.key, "Z");
        assert!(binding.ctrl);
        assert!(binding.shift);
    }

    #[test]
    fn test_parse_plus_key() {
        let binding = KeyBinding::parse("Ctrl++").unwrap();
        assert_eq!(binding.key, "+");
        assert!(binding.ctrl);
    }

    #[test]
    fn test_parse_rejects_modifier_only() {
        assert!(KeyBinding::parse("Ctrl+Shift").is_err());
        assert!(KeyBinding::parse("   ").is_err());
    }

    #[test]
    fn test_matches() {
        let binding = KeyBinding::parse("Ctrl+Shift+Z").unwrap();
        assert!(binding.matches("Z", true, true, false));
        assert!(binding.matches("z", true, true, false));
        assert!(!binding.matches("Z", false, true, false)); // Missing ctrl
        assert!(!binding.matches("Z", true, false, false)); // Missing shift
        assert!(!binding.matches("Y", true, true, false)); // Wrong key
    }

    #[test]
    fn test_build_action_map() {
        let config = KeybindingsConfig::default();
        let map = config.build_action_map().unwrap();

        let ctrl_z = KeyBinding::parse("Ctrl+Z").unwrap();
        assert_eq!(map.get(&ctrl_z), Some(&Action::Undo));

        let ctrl_shift_z = KeyBinding::parse("Ctrl+Shift+Z").unwrap();
        assert_eq!(map.get(&ctrl_shift_z), Some(&Action::Redo));

        let ctrl_y = KeyBinding::parse("Ctrl+Y").unwrap();
        assert_eq!(map.get(&ctrl_y), Some(&Action::Redo));

        let p = KeyBinding::parse("P").unwrap();
        assert_eq!(map.get(&p), Some(&Action::PenTool));
    }

    #[test]
    fn test_duplicate_keybinding_detection() {
        let mut config = KeybindingsConfig::default();
        config.clear_canvas = vec!["Ctrl+Z".to_string()];

        let result = config.build_action_map();
        assert!(result.is_err());
        let err_msg = result.unwrap_err();
        assert!(err_msg.contains("Duplicate keybinding"));
        assert!(err_msg.contains("Ctrl+Z"));
    }

    #[test]
    fn test_duplicate_with_different_case_and_order() {
        let mut config = KeybindingsConfig::default();
        config.undo = vec!["Shift+Ctrl+q".to_string()];
        config.clear_canvas = vec!["Ctrl+Shift+Q".to_string()];

        let result = config.build_action_map();
        assert!(result.unwrap_err().contains("Duplicate keybinding"));
    }

    #[test]
    fn test_tool_actions_map_to_tools() {
        assert_eq!(Action::CircleTool.tool(), Some(Tool::Circle));
        assert_eq!(Action::SelectTool.tool(), Some(Tool::Select));
        assert_eq!(Action::Undo.tool(), None);
    }
}
