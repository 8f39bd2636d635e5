use crate::config::Action;
use crate::input::events::Key;
use log::debug;

use super::EditorState;

impl EditorState {
    /// Processes a key press event.
    ///
    /// Modifier keys update the modifier state; every other key is looked up
    /// in the keybinding map and the bound action, if any, is run.
    /// Returns the action that was triggered.
    pub fn on_key_press(&mut self, key: Key) -> Option<Action> {
        match key {
            Key::Shift => {
                self.modifiers.shift = true;
                return None;
            }
            Key::Ctrl => {
                self.modifiers.ctrl = true;
                return None;
            }
            Key::Meta => {
                self.modifiers.meta = true;
                return None;
            }
            Key::Alt => {
                self.modifiers.alt = true;
                return None;
            }
            _ => {}
        }

        let key_str = key.binding_name()?;
        let action = self.find_action(&key_str)?;
        self.handle_action(action);
        Some(action)
    }

    /// Processes a key release event.
    ///
    /// Only tracks modifier key releases to update the modifier state.
    pub fn on_key_release(&mut self, key: Key) {
        match key {
            Key::Shift => self.modifiers.shift = false,
            Key::Ctrl => self.modifiers.ctrl = false,
            Key::Meta => self.modifiers.meta = false,
            Key::Alt => self.modifiers.alt = false,
            _ => {}
        }
    }

    /// Runs an action, whether from a keybinding or a toolbar button.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Undo => {
                self.undo();
            }
            Action::Redo => {
                self.redo();
            }
            Action::ClearCanvas => self.clear(),
            Action::SelectTool
            | Action::PenTool
            | Action::EraserTool
            | Action::TextTool
            | Action::ArrowTool
            | Action::RectangleTool
            | Action::CircleTool => {
                if let Some(tool) = action.tool() {
                    self.set_tool(tool);
                }
            }
        }
    }

    /// Removes the topmost element. Returns `false` on an empty scene.
    pub fn undo(&mut self) -> bool {
        if !self.history.undo(&mut self.frame) {
            return false;
        }
        debug!("Undo: {} elements left", self.frame.len());
        self.prune_selection();
        self.needs_redraw = true;
        true
    }

    /// Re-adds the most recently removed element on top of the scene.
    /// Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        if !self.history.redo(&mut self.frame) {
            return false;
        }
        debug!("Redo: {} elements", self.frame.len());
        self.needs_redraw = true;
        true
    }

    /// Moves every element to the redo stack.
    pub fn clear(&mut self) {
        if self.frame.is_empty() {
            return;
        }
        debug!("Clearing {} elements", self.frame.len());
        self.history.clear(&mut self.frame);
        self.selection = None;
        self.needs_redraw = true;
    }
}
