use crate::draw::{Point, StrokeStyle, extend_element, open_element, text_element};
use crate::input::{events::PointerTarget, tool::Tool};
use log::{debug, warn};

use super::{DrawingState, EditorState};

/// Blocking source of text for the text tool.
///
/// Returning `None` (or an empty string) cancels placement.
pub trait TextPrompt {
    fn prompt(&mut self, at: Point) -> Option<String>;
}

impl<F> TextPrompt for F
where
    F: FnMut(Point) -> Option<String>,
{
    fn prompt(&mut self, at: Point) -> Option<String> {
        self(at)
    }
}

impl EditorState {
    /// Processes a pointer press.
    ///
    /// # Arguments
    /// * `pos` - Canvas position of the press
    /// * `target` - What the surface hit-tested under the pointer
    /// * `prompt` - Asked for a string when the text tool is active
    ///
    /// # Behavior
    /// - Press on empty canvas clears the selection (any tool)
    /// - Select: pressing an element selects it
    /// - Text: places a finished text element if the prompt yields text
    /// - Other tools: opens a new element and starts drawing
    pub fn pointer_down(&mut self, pos: Point, target: PointerTarget, prompt: &mut dyn TextPrompt) {
        if !pos.is_finite() {
            warn!("Ignoring pointer press at non-finite position {pos:?}");
            return;
        }
        if target == PointerTarget::Canvas {
            self.clear_selection();
        }

        match self.tool {
            Tool::Select => {
                if let PointerTarget::Element(id) = target {
                    self.select(&id);
                }
            }
            Tool::Text => {
                let Some(text) = prompt.prompt(pos).filter(|text| !text.is_empty()) else {
                    debug!("Text placement cancelled");
                    return;
                };
                let id = self.next_id(crate::draw::ElementTool::Text);
                let element = text_element(
                    id,
                    pos,
                    text,
                    self.current_color.clone(),
                    self.text_font_size,
                );
                debug!("Placed text element {}", element.id);
                self.frame.push(element);
                self.history.commit();
                self.needs_redraw = true;
            }
            tool => {
                let Some(element_tool) = tool.element_tool() else {
                    return;
                };
                let id = self.next_id(element_tool);
                let style = StrokeStyle {
                    color: self.current_color.clone(),
                    width: self.current_stroke_width,
                };
                let element = open_element(id.clone(), element_tool, pos, &style);

                self.selection = None;
                self.frame.push(element);
                self.history.commit();
                debug!("Opened element {id}");
                self.state = DrawingState::Drawing { element_id: id };
                self.needs_redraw = true;
            }
        }
    }

    /// Processes pointer motion.
    ///
    /// Always records the cursor position. While drawing, the open element is
    /// reshaped for `pos`; if it has left the scene meanwhile, drawing ends.
    /// Non-finite positions are dropped.
    pub fn pointer_moved(&mut self, pos: Point) {
        if !pos.is_finite() {
            warn!("Ignoring pointer motion to non-finite position {pos:?}");
            return;
        }
        self.cursor = Some(pos);
        if self.tool.uses_dot_cursor() {
            self.needs_redraw = true;
        }

        let DrawingState::Drawing { element_id } = &self.state else {
            return;
        };

        match self.frame.get_mut(element_id) {
            Some(element) => {
                extend_element(element, pos);
                self.needs_redraw = true;
            }
            None => {
                debug!("Open element {element_id} left the scene; ending stroke");
                self.state = DrawingState::Idle;
            }
        }
    }

    /// Processes a pointer release. The open element is left exactly as the
    /// last move shaped it.
    pub fn pointer_up(&mut self) {
        if let DrawingState::Drawing { element_id } = &self.state {
            debug!("Closed element {element_id}");
        }
        self.state = DrawingState::Idle;
    }

    /// Forgets the cursor position, e.g. when the pointer leaves the canvas.
    pub fn pointer_left(&mut self) {
        if self.cursor.take().is_some() {
            self.needs_redraw = true;
        }
    }
}
