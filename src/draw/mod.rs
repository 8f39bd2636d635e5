//! Drawing model: elements, scenes and their history.
//!
//! This module defines the core drawing types used by the editor:
//! - [`Element`]: one stroke, shape, arrow or text block
//! - [`Frame`]: the ordered scene of elements
//! - [`History`]: redo storage for undo and clear
//! - builders and transforms that mutate elements in response to input

pub mod builder;
pub mod color;
pub mod element;
pub mod frame;
pub mod history;
pub mod transform;

pub use builder::{StrokeStyle, extend_element, open_element, text_element};
pub use color::{Color, Rgba};
pub use element::{Composite, Element, ElementKind, ElementTool, Geometry, Point, RenderStyle};
pub use frame::Frame;
pub use history::History;
pub use transform::{MIN_TRANSFORM_SIZE, TransformOutcome, move_element, transform_element};
