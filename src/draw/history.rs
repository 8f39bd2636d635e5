//! Undo/redo over whole elements.
//!
//! The undo side of the history is the frame itself: undo always takes the
//! topmost element. Only removed elements are stored here.

use super::element::Element;
use super::frame::Frame;
use log::debug;

/// Redo storage for elements removed by undo or clear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    redo_stack: Vec<Element>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that a new element was opened; any pending redo is discarded.
    pub fn commit(&mut self) {
        if !self.redo_stack.is_empty() {
            debug!("Discarding {} redo entries", self.redo_stack.len());
            self.redo_stack.clear();
        }
    }

    /// Moves the topmost element of `frame` onto the redo stack.
    ///
    /// Returns `false` when the frame was empty.
    pub fn undo(&mut self, frame: &mut Frame) -> bool {
        match frame.pop() {
            Some(element) => {
                self.redo_stack.push(element);
                true
            }
            None => false,
        }
    }

    /// Appends the most recently undone element to the end of `frame`.
    ///
    /// The element goes on top even if it was originally lower in the stack.
    pub fn redo(&mut self, frame: &mut Frame) -> bool {
        match self.redo_stack.pop() {
            Some(element) => {
                frame.push(element);
                true
            }
            None => false,
        }
    }

    /// Empties `frame`, stacking its elements so that repeated redo restores
    /// them front-to-back.
    pub fn clear(&mut self, frame: &mut Frame) {
        let mut removed = frame.take_all();
        removed.reverse();
        self.redo_stack.extend(removed);
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Elements waiting to be redone; the last entry is redone first.
    pub fn redo_stack(&self) -> &[Element] {
        &self.redo_stack
    }

    /// Drops all redo entries (used when the scene is replaced wholesale).
    pub fn reset(&mut self) {
        self.redo_stack.clear();
    }
}
