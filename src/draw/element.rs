//! Element definitions for drawing notes.

use super::color::Color;
use serde::{Deserialize, Serialize};

/// Stroke width applied to pen strokes when none is stored.
pub const PEN_STROKE_WIDTH: f64 = 5.0;
/// Eraser strokes always render with this width.
pub const ERASER_STROKE_WIDTH: f64 = 20.0;
/// Stroke width applied to rectangles, circles and arrows when none is stored.
pub const SHAPE_STROKE_WIDTH: f64 = 4.0;
/// Font size given to new text elements.
pub const TEXT_FONT_SIZE: f64 = 20.0;

/// The tool an element was drawn with.
///
/// This is narrower than [`crate::input::Tool`]: `select` never produces elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementTool {
    Pen,
    Eraser,
    Rectangle,
    Circle,
    Arrow,
    Text,
}

impl ElementTool {
    /// Geometry bucket for this tool.
    pub fn kind(self) -> ElementKind {
        match self {
            ElementTool::Pen | ElementTool::Eraser | ElementTool::Arrow => ElementKind::Line,
            ElementTool::Rectangle | ElementTool::Circle => ElementKind::Shape,
            ElementTool::Text => ElementKind::Text,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ElementTool::Pen => "pen",
            ElementTool::Eraser => "eraser",
            ElementTool::Rectangle => "rectangle",
            ElementTool::Circle => "circle",
            ElementTool::Arrow => "arrow",
            ElementTool::Text => "text",
        }
    }
}

/// Geometry bucket derived from [`ElementTool`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Open polyline (pen, eraser, arrow)
    Line,
    /// Origin plus box (rectangle, circle)
    Shape,
    /// Positioned string
    Text,
}

impl ElementKind {
    /// Value written to the persisted `type` key.
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Line => "line",
            ElementKind::Shape => "shape",
            ElementKind::Text => "text",
        }
    }
}

/// Canvas-local coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance_to(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One drawable unit of a scene.
///
/// The struct mirrors the persisted JSON object field for field. Which fields
/// are meaningful depends on [`Element::kind`]; the others are carried along
/// untouched so that a load/save cycle never strips data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Unique within a scene. Empty only for legacy payloads before id backfill.
    #[serde(default)]
    pub id: String,
    pub tool: ElementTool,
    /// Persisted `type` tag, kept verbatim. Behaviour always uses
    /// [`Element::kind`] instead.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind_tag: Option<String>,
    /// Origin for shapes and text, translation offset for lines. Missing or
    /// `null` reads as 0.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub x: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub y: f64,
    /// Polyline vertices, persisted flat as `[x0, y0, x1, y1, ...]`.
    #[serde(default, with = "flat_points", skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// Persistent render-time scale, only ever set on line elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
    /// Keys this version does not know about.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Borrowed, kind-specific view of an element's geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Geometry<'a> {
    /// Freehand pen or eraser stroke, drawn translated by `offset`.
    Polyline { offset: Point, points: &'a [Point] },
    /// Arrow from `start` to `end`, drawn translated by `offset`.
    Arrow {
        offset: Point,
        start: Point,
        end: Point,
    },
    Rect {
        origin: Point,
        width: f64,
        height: f64,
    },
    Circle { center: Point, radius: f64 },
    Text {
        origin: Point,
        text: &'a str,
        font_size: f64,
    },
}

/// How a renderer composites an element onto the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Composite {
    SourceOver,
    /// Punches through previously drawn content (eraser).
    DestinationOut,
}

/// Effective paint settings after applying the per-tool fallbacks.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderStyle {
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub fill: Option<Color>,
    pub composite: Composite,
}

impl Element {
    /// Creates an element with only identity fields set.
    pub fn new(id: impl Into<String>, tool: ElementTool) -> Self {
        Self {
            id: id.into(),
            tool,
            kind_tag: Some(tool.kind().as_str().to_string()),
            x: 0.0,
            y: 0.0,
            points: Vec::new(),
            width: None,
            height: None,
            radius: None,
            text: None,
            font_size: None,
            fill: None,
            stroke: None,
            stroke_width: None,
            scale_x: None,
            scale_y: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.tool.kind()
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Render-time scale factors, `(1.0, 1.0)` when none are stored.
    pub fn scale(&self) -> (f64, f64) {
        (self.scale_x.unwrap_or(1.0), self.scale_y.unwrap_or(1.0))
    }

    pub fn geometry(&self) -> Geometry<'_> {
        match self.tool {
            ElementTool::Pen | ElementTool::Eraser => Geometry::Polyline {
                offset: self.origin(),
                points: &self.points,
            },
            ElementTool::Arrow => {
                let start = self.points.first().copied().unwrap_or_default();
                let end = self.points.last().copied().unwrap_or(start);
                Geometry::Arrow {
                    offset: self.origin(),
                    start,
                    end,
                }
            }
            ElementTool::Rectangle => Geometry::Rect {
                origin: self.origin(),
                width: self.width.unwrap_or(0.0),
                height: self.height.unwrap_or(0.0),
            },
            ElementTool::Circle => Geometry::Circle {
                center: self.origin(),
                radius: self.radius.unwrap_or(0.0),
            },
            ElementTool::Text => Geometry::Text {
                origin: self.origin(),
                text: self.text.as_deref().unwrap_or(""),
                font_size: self.font_size.unwrap_or(TEXT_FONT_SIZE),
            },
        }
    }

    /// Resolves the colours and widths a renderer should use.
    pub fn render_style(&self) -> RenderStyle {
        let stroke_or_default = || self.stroke.clone().unwrap_or_default();
        match self.tool {
            ElementTool::Pen => RenderStyle {
                stroke: Some(stroke_or_default()),
                stroke_width: self.stroke_width.unwrap_or(PEN_STROKE_WIDTH),
                fill: None,
                composite: Composite::SourceOver,
            },
            // The eraser ignores the stored palette colour and width.
            ElementTool::Eraser => RenderStyle {
                stroke: Some(Color::eraser()),
                stroke_width: ERASER_STROKE_WIDTH,
                fill: None,
                composite: Composite::DestinationOut,
            },
            ElementTool::Rectangle | ElementTool::Circle => RenderStyle {
                stroke: Some(stroke_or_default()),
                stroke_width: self.stroke_width.unwrap_or(SHAPE_STROKE_WIDTH),
                fill: None,
                composite: Composite::SourceOver,
            },
            ElementTool::Arrow => RenderStyle {
                stroke: Some(stroke_or_default()),
                stroke_width: self.stroke_width.unwrap_or(SHAPE_STROKE_WIDTH),
                fill: Some(stroke_or_default()),
                composite: Composite::SourceOver,
            },
            ElementTool::Text => RenderStyle {
                stroke: None,
                stroke_width: 0.0,
                fill: Some(self.fill.clone().unwrap_or_default()),
                composite: Composite::SourceOver,
            },
        }
    }

    /// Returns `true` when every numeric field holds a finite value.
    pub fn is_finite(&self) -> bool {
        let optional = [
            self.width,
            self.height,
            self.radius,
            self.font_size,
            self.stroke_width,
            self.scale_x,
            self.scale_y,
        ];
        self.origin().is_finite()
            && self.points.iter().all(|p| p.is_finite())
            && optional.iter().flatten().all(|v| v.is_finite())
    }
}

fn null_as_zero<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

/// Serde adapter between `Vec<Point>` and a flat coordinate array.
mod flat_points {
    use super::Point;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(points: &[Point], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(points.len() * 2))?;
        for point in points {
            seq.serialize_element(&point.x)?;
            seq.serialize_element(&point.y)?;
        }
        seq.end()
    }

    /// A trailing unpaired coordinate is dropped, as is any pair holding a
    /// `null`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Point>, D::Error> {
        let flat = Vec::<Option<f64>>::deserialize(deserializer)?;
        Ok(flat
            .chunks_exact(2)
            .filter_map(|pair| match (pair[0], pair[1]) {
                (Some(x), Some(y)) => Some(Point::new(x, y)),
                _ => None,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_buckets_follow_tool() {
        assert_eq!(ElementTool::Pen.kind(), ElementKind::Line);
        assert_eq!(ElementTool::Eraser.kind(), ElementKind::Line);
        assert_eq!(ElementTool::Arrow.kind(), ElementKind::Line);
        assert_eq!(ElementTool::Rectangle.kind(), ElementKind::Shape);
        assert_eq!(ElementTool::Circle.kind(), ElementKind::Shape);
        assert_eq!(ElementTool::Text.kind(), ElementKind::Text);
    }

    #[test]
    fn points_persist_as_flat_array() {
        let mut element = Element::new("pen-1", ElementTool::Pen);
        element.points = vec![Point::new(1.0, 2.0), Point::new(3.0, 4.5)];

        let value = serde_json::to_value(&element).unwrap();
        assert_eq!(value["points"], json!([1.0, 2.0, 3.0, 4.5]));
        assert_eq!(value["type"], json!("line"));
        assert!(value.get("width").is_none());
    }

    #[test]
    fn deserializes_camel_case_fields_and_keeps_unknown_keys() {
        let value = json!({
            "id": "el-1",
            "tool": "text",
            "type": "text",
            "x": 4,
            "y": 8,
            "text": "hello",
            "fontSize": 20,
            "fill": "#4f46e5",
            "rotation": 45
        });

        let element: Element = serde_json::from_value(value).unwrap();
        assert_eq!(element.font_size, Some(20.0));
        assert_eq!(element.text.as_deref(), Some("hello"));
        assert_eq!(element.extra.get("rotation"), Some(&json!(45)));

        let back = serde_json::to_value(&element).unwrap();
        assert_eq!(back["rotation"], json!(45));
        assert_eq!(back["fontSize"], json!(20.0));
    }

    #[test]
    fn odd_coordinate_is_dropped() {
        let element: Element =
            serde_json::from_value(json!({"tool": "pen", "points": [1, 2, 3]})).unwrap();
        assert_eq!(element.points, vec![Point::new(1.0, 2.0)]);
        assert!(element.id.is_empty());
        assert_eq!(element.kind_tag, None);
    }

    #[test]
    fn null_coordinates_are_tolerated() {
        let element: Element = serde_json::from_value(json!({
            "tool": "pen",
            "type": "stroke",
            "x": null,
            "y": 3,
            "points": [0, 0, null, 1, 2, 2]
        }))
        .unwrap();
        assert_eq!((element.x, element.y), (0.0, 3.0));
        assert_eq!(element.points, vec![Point::new(0.0, 0.0), Point::new(2.0, 2.0)]);
        assert_eq!(element.kind_tag.as_deref(), Some("stroke"));
        assert!(element.is_finite());
    }

    #[test]
    fn unknown_tool_is_rejected() {
        let result: Result<Element, _> = serde_json::from_value(json!({"tool": "spray"}));
        assert!(result.is_err());
    }

    #[test]
    fn eraser_style_ignores_stored_colour() {
        let mut element = Element::new("eraser-1", ElementTool::Eraser);
        element.stroke = Some(Color::new("#123456"));
        element.stroke_width = Some(3.0);

        let style = element.render_style();
        assert_eq!(style.stroke, Some(Color::eraser()));
        assert_eq!(style.stroke_width, ERASER_STROKE_WIDTH);
        assert_eq!(style.composite, Composite::DestinationOut);
    }

    #[test]
    fn style_fallbacks_per_tool() {
        let pen = Element::new("a", ElementTool::Pen).render_style();
        assert_eq!(pen.stroke_width, PEN_STROKE_WIDTH);
        assert_eq!(pen.stroke, Some(Color::light_default()));

        let rect = Element::new("b", ElementTool::Rectangle).render_style();
        assert_eq!(rect.stroke_width, SHAPE_STROKE_WIDTH);

        let arrow = Element::new("c", ElementTool::Arrow).render_style();
        assert_eq!(arrow.fill, arrow.stroke);

        let text = Element::new("d", ElementTool::Text).render_style();
        assert_eq!(text.stroke, None);
        assert_eq!(text.fill, Some(Color::light_default()));
    }

    #[test]
    fn arrow_geometry_uses_first_and_last_point() {
        let mut element = Element::new("arrow-1", ElementTool::Arrow);
        element.points = vec![Point::new(0.0, 0.0), Point::new(10.0, 5.0)];
        assert_eq!(
            element.geometry(),
            Geometry::Arrow {
                offset: Point::default(),
                start: Point::new(0.0, 0.0),
                end: Point::new(10.0, 5.0),
            }
        );
    }

    #[test]
    fn finiteness_check_covers_points_and_optionals() {
        let mut element = Element::new("pen-1", ElementTool::Pen);
        element.points = vec![Point::new(0.0, 0.0)];
        assert!(element.is_finite());

        element.points.push(Point::new(f64::NAN, 1.0));
        assert!(!element.is_finite());

        element.points.pop();
        element.scale_x = Some(f64::INFINITY);
        assert!(!element.is_finite());
    }
}
