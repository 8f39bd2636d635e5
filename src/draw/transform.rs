//! Drag and resize of committed elements.

use super::element::{Element, ElementKind};

/// Smallest width, height, radius or font size a resize can produce.
pub const MIN_TRANSFORM_SIZE: f64 = 5.0;

/// What the rendering surface must do after a resize.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransformOutcome {
    /// The scale was folded into the geometry; reset the visual scale to (1, 1).
    Baked,
    /// The scale was stored on the element and keeps applying at render time.
    Scaled,
}

impl TransformOutcome {
    pub fn resets_visual_scale(self) -> bool {
        matches!(self, TransformOutcome::Baked)
    }
}

/// Moves an element to `(x, y)`. Nothing else changes.
pub fn move_element(element: &mut Element, x: f64, y: f64) {
    element.x = x;
    element.y = y;
}

/// Applies a finished resize gesture.
///
/// Shapes and text fold the scale into their dimensions, clamped to
/// [`MIN_TRANSFORM_SIZE`]. Lines keep the factors as `scaleX`/`scaleY`.
pub fn transform_element(
    element: &mut Element,
    scale_x: f64,
    scale_y: f64,
    x: f64,
    y: f64,
) -> TransformOutcome {
    element.x = x;
    element.y = y;

    match element.kind() {
        ElementKind::Line => {
            element.scale_x = Some(scale_x);
            element.scale_y = Some(scale_y);
            TransformOutcome::Scaled
        }
        ElementKind::Shape | ElementKind::Text => {
            let bake = |value: f64, factor: f64| (value * factor).max(MIN_TRANSFORM_SIZE);

            // Text carries a box only when one was stored.
            if element.kind() == ElementKind::Shape || element.width.is_some() {
                element.width = Some(bake(element.width.unwrap_or(0.0), scale_x));
            }
            if element.kind() == ElementKind::Shape || element.height.is_some() {
                element.height = Some(bake(element.height.unwrap_or(0.0), scale_y));
            }
            if let Some(radius) = element.radius {
                element.radius = Some(bake(radius, scale_x));
            }
            if element.kind() == ElementKind::Text {
                let font_size = element.font_size.unwrap_or(super::element::TEXT_FONT_SIZE);
                element.font_size = Some(bake(font_size, scale_y));
            }
            element.scale_x = None;
            element.scale_y = None;
            TransformOutcome::Baked
        }
    }
}
