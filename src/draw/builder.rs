//! Incremental construction of elements from pointer input.
//!
//! [`open_element`] seeds an element at the pointer-down position and
//! [`extend_element`] reshapes it for every subsequent pointer position. Each
//! call to `extend_element` derives the geometry from the seed and the latest
//! position only (freehand strokes excepted, which accumulate points), so a
//! duplicated or dropped move event never corrupts the final shape.

use super::color::Color;
use super::element::{ERASER_STROKE_WIDTH, Element, ElementTool, Point, TEXT_FONT_SIZE};

/// Caller-selected paint settings at the moment an element is opened.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
}

/// Creates a new element of `tool` seeded at `at`.
///
/// Text elements are created through [`text_element`] instead; passing
/// [`ElementTool::Text`] here yields an empty text element at `at`.
pub fn open_element(id: String, tool: ElementTool, at: Point, style: &StrokeStyle) -> Element {
    let mut element = Element::new(id, tool);
    match tool {
        ElementTool::Pen => {
            element.points = vec![at];
            element.stroke = Some(style.color.clone());
            element.stroke_width = Some(style.width);
        }
        ElementTool::Eraser => {
            element.points = vec![at];
            element.stroke = Some(Color::eraser());
            element.stroke_width = Some(ERASER_STROKE_WIDTH);
        }
        ElementTool::Arrow => {
            element.points = vec![at, at];
            element.stroke = Some(style.color.clone());
            element.stroke_width = Some(style.width);
        }
        ElementTool::Rectangle | ElementTool::Circle => {
            element.x = at.x;
            element.y = at.y;
            element.width = Some(0.0);
            element.height = Some(0.0);
            // Circles get a radius on the first move.
            // Seed pair kept for compatibility with older readers of the format.
            element.points = vec![at, at];
            element.stroke = Some(style.color.clone());
            element.stroke_width = Some(style.width);
        }
        ElementTool::Text => {
            element.x = at.x;
            element.y = at.y;
            element.font_size = Some(TEXT_FONT_SIZE);
            element.fill = Some(style.color.clone());
        }
    }
    element
}

/// Creates a finished text element.
pub fn text_element(id: String, at: Point, text: String, fill: Color, font_size: f64) -> Element {
    let mut element = Element::new(id, ElementTool::Text);
    element.x = at.x;
    element.y = at.y;
    element.text = Some(text);
    element.font_size = Some(font_size);
    element.fill = Some(fill);
    element
}

/// Updates an open element for the pointer now being at `to`.
pub fn extend_element(element: &mut Element, to: Point) {
    match element.tool {
        ElementTool::Pen | ElementTool::Eraser => element.points.push(to),
        ElementTool::Arrow => {
            let start = element.points.first().copied().unwrap_or(to);
            element.points = vec![start, to];
        }
        ElementTool::Rectangle | ElementTool::Circle => {
            let dx = to.x - element.x;
            let dy = to.y - element.y;
            element.width = Some(dx);
            element.height = Some(dy);
            if element.tool == ElementTool::Circle {
                element.radius = Some(element.origin().distance_to(to));
            }
        }
        ElementTool::Text => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> StrokeStyle {
        StrokeStyle {
            color: Color::new("#00ff00"),
            width: 7.0,
        }
    }

    #[test]
    fn pen_accumulates_points() {
        let mut element = open_element("pen-1".into(), ElementTool::Pen, Point::new(1.0, 1.0), &style());
        extend_element(&mut element, Point::new(2.0, 2.0));
        extend_element(&mut element, Point::new(3.0, 5.0));

        assert_eq!(
            element.points,
            vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0), Point::new(3.0, 5.0)]
        );
        assert_eq!(element.stroke_width, Some(7.0));
        assert_eq!(element.stroke, Some(Color::new("#00ff00")));
    }

    #[test]
    fn eraser_uses_fixed_paint() {
        let element = open_element("eraser-1".into(), ElementTool::Eraser, Point::default(), &style());
        assert_eq!(element.stroke, Some(Color::eraser()));
        assert_eq!(element.stroke_width, Some(ERASER_STROKE_WIDTH));
    }

    #[test]
    fn arrow_overwrites_end_point() {
        let mut element = open_element("arrow-1".into(), ElementTool::Arrow, Point::new(5.0, 5.0), &style());
        extend_element(&mut element, Point::new(10.0, 10.0));
        extend_element(&mut element, Point::new(20.0, 0.0));

        assert_eq!(element.points, vec![Point::new(5.0, 5.0), Point::new(20.0, 0.0)]);
        assert_eq!((element.x, element.y), (0.0, 0.0));
    }

    #[test]
    fn rectangle_size_is_signed_delta() {
        let mut element =
            open_element("rectangle-1".into(), ElementTool::Rectangle, Point::new(10.0, 10.0), &style());
        extend_element(&mut element, Point::new(50.0, 40.0));
        assert_eq!((element.width, element.height), (Some(40.0), Some(30.0)));

        extend_element(&mut element, Point::new(0.0, 5.0));
        assert_eq!((element.width, element.height), (Some(-10.0), Some(-5.0)));
        assert_eq!(element.radius, None);
    }

    #[test]
    fn circle_radius_is_distance_to_pointer() {
        let mut element = open_element("circle-1".into(), ElementTool::Circle, Point::new(0.0, 0.0), &style());
        assert_eq!(element.radius, None);
        extend_element(&mut element, Point::new(3.0, 4.0));
        assert_eq!(element.radius, Some(5.0));
        assert_eq!(element.width, Some(3.0));
    }

    #[test]
    fn repeated_move_is_idempotent_for_shapes() {
        let mut once = open_element("c".into(), ElementTool::Circle, Point::new(1.0, 1.0), &style());
        let mut twice = once.clone();
        extend_element(&mut once, Point::new(9.0, 7.0));
        extend_element(&mut twice, Point::new(9.0, 7.0));
        extend_element(&mut twice, Point::new(9.0, 7.0));
        assert_eq!(once, twice);
    }

    #[test]
    fn click_without_drag_leaves_degenerate_geometry() {
        let element = open_element("rectangle-1".into(), ElementTool::Rectangle, Point::new(4.0, 4.0), &style());
        assert_eq!((element.width, element.height), (Some(0.0), Some(0.0)));
    }

    #[test]
    fn text_element_defaults() {
        let element = text_element(
            "text-1".into(),
            Point::new(3.0, 4.0),
            "hi".into(),
            Color::dark_default(),
            TEXT_FONT_SIZE,
        );
        assert_eq!(element.font_size, Some(TEXT_FONT_SIZE));
        assert_eq!(element.fill, Some(Color::dark_default()));
        assert_eq!(element.text.as_deref(), Some("hi"));
    }
}
