//! Frame container for the elements of one drawing.

use super::element::Element;
use serde::{Deserialize, Serialize};

/// Ordered collection of all elements in a drawing.
///
/// Order is z-order: the first element is the bottom layer, the last is drawn
/// on top. The same order is used for iteration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Frame {
    pub elements: Vec<Element>,
}

impl Frame {
    /// Creates a new empty frame.
    pub const fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    pub fn from_elements(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Appends an element on top of all existing ones.
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Removes and returns the topmost element, if any.
    pub fn pop(&mut self) -> Option<Element> {
        self.elements.pop()
    }

    /// Removes every element, returning them in front-to-back order.
    pub fn take_all(&mut self) -> Vec<Element> {
        std::mem::take(&mut self.elements)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|element| element.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|element| element.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|element| element.id == id)
    }

    /// Replaces the element with the same id as `element`, keeping its z-order slot.
    ///
    /// Returns the previous value, or `None` (and drops `element`) if no element has that id.
    pub fn replace(&mut self, element: Element) -> Option<Element> {
        let slot = self.get_mut(&element.id)?;
        Some(std::mem::replace(slot, element))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }
}

impl<'a> IntoIterator for &'a Frame {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::ElementTool;

    #[test]
    fn replace_keeps_z_order_slot() {
        let mut frame = Frame::new();
        frame.push(Element::new("a", ElementTool::Rectangle));
        frame.push(Element::new("b", ElementTool::Circle));
        frame.push(Element::new("c", ElementTool::Pen));

        let mut moved = frame.get("b").unwrap().clone();
        moved.x = 42.0;
        let previous = frame.replace(moved).unwrap();

        assert_eq!(previous.x, 0.0);
        assert_eq!(frame.index_of("b"), Some(1));
        assert_eq!(frame.get("b").unwrap().x, 42.0);
    }

    #[test]
    fn replace_unknown_id_is_ignored() {
        let mut frame = Frame::new();
        frame.push(Element::new("a", ElementTool::Pen));
        assert!(frame.replace(Element::new("zzz", ElementTool::Pen)).is_none());
        assert_eq!(frame.len(), 1);
    }

    #[test]
    fn take_all_preserves_order() {
        let mut frame = Frame::new();
        frame.push(Element::new("a", ElementTool::Pen));
        frame.push(Element::new("b", ElementTool::Eraser));

        let ids: Vec<_> = frame.take_all().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, ["a", "b"]);
        assert!(frame.is_empty());
    }
}
