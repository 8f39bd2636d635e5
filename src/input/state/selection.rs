use crate::draw::TransformOutcome;
use crate::draw::transform;
use crate::input::tool::Tool;
use log::{debug, warn};

use super::EditorState;

impl EditorState {
    /// Currently selected element id.
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn selected_element(&self) -> Option<&crate::draw::Element> {
        self.selection.as_deref().and_then(|id| self.frame.get(id))
    }

    /// Selects the element with `id`.
    ///
    /// Ignored (returns `false`) outside the select tool or for ids that are
    /// not in the scene.
    pub fn select(&mut self, id: &str) -> bool {
        if self.tool != Tool::Select {
            debug!("Ignoring selection of {id} with tool {}", self.tool);
            return false;
        }
        if !self.frame.contains(id) {
            warn!("Ignoring selection of unknown element {id}");
            return false;
        }
        if self.selection.as_deref() != Some(id) {
            self.selection = Some(id.to_string());
            self.needs_redraw = true;
        }
        true
    }

    /// Drops the selection without touching any element.
    pub fn clear_selection(&mut self) {
        if self.selection.take().is_some() {
            self.needs_redraw = true;
        }
    }

    /// Finishes a drag of element `id` at `(x, y)`.
    ///
    /// Only honoured with the select tool. Returns whether the element moved.
    pub fn move_element(&mut self, id: &str, x: f64, y: f64) -> bool {
        if self.tool != Tool::Select {
            return false;
        }
        if !x.is_finite() || !y.is_finite() {
            warn!("Ignoring drag of {id} to non-finite position ({x}, {y})");
            return false;
        }
        let Some(element) = self.frame.get_mut(id) else {
            warn!("Ignoring drag of unknown element {id}");
            return false;
        };
        transform::move_element(element, x, y);
        self.needs_redraw = true;
        true
    }

    /// Finishes a drag of the selected element.
    pub fn drag_selected(&mut self, x: f64, y: f64) -> bool {
        match self.selection.clone() {
            Some(id) => self.move_element(&id, x, y),
            None => false,
        }
    }

    /// Finishes a resize of element `id`.
    ///
    /// Returns `None` when the gesture was ignored (wrong tool, unknown id,
    /// non-finite input).
    pub fn transform_element(
        &mut self,
        id: &str,
        scale_x: f64,
        scale_y: f64,
        x: f64,
        y: f64,
    ) -> Option<TransformOutcome> {
        if self.tool != Tool::Select {
            return None;
        }
        if ![scale_x, scale_y, x, y].iter().all(|v| v.is_finite()) {
            warn!("Ignoring non-finite resize of {id}: scale ({scale_x}, {scale_y}) at ({x}, {y})");
            return None;
        }
        let Some(element) = self.frame.get_mut(id) else {
            warn!("Ignoring resize of unknown element {id}");
            return None;
        };
        let outcome = transform::transform_element(element, scale_x, scale_y, x, y);
        debug!("Resized {id} by ({scale_x}, {scale_y}): {outcome:?}");
        self.needs_redraw = true;
        Some(outcome)
    }

    /// Finishes a resize of the selected element.
    pub fn transform_selected(
        &mut self,
        scale_x: f64,
        scale_y: f64,
        x: f64,
        y: f64,
    ) -> Option<TransformOutcome> {
        let id = self.selection.clone()?;
        self.transform_element(&id, scale_x, scale_y, x, y)
    }

    /// Drops the selection if its element is no longer in the scene.
    pub(super) fn prune_selection(&mut self) {
        if let Some(id) = &self.selection {
            if !self.frame.contains(id) {
                self.selection = None;
            }
        }
    }
}
