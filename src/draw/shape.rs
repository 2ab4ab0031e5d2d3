//! Drawable object definitions for screen annotations.
//!
//! Every object is a plain value: commands and snapshots copy them, nothing
//! aliases a scene entry.

use super::color::Color;
use super::font::{TextMetrics, text_bounds};
use crate::util::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Radius of the numbered counter badge.
pub const COUNTER_RADIUS: f64 = 15.0;

/// The eight kinds of scene objects, each stored in its own collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Pen,
    Highlighter,
    Arrow,
    Line,
    Rectangle,
    Circle,
    Text,
    Counter,
}

impl ObjectKind {
    /// All kinds in collection order.
    pub const ALL: [ObjectKind; 8] = [
        ObjectKind::Pen,
        ObjectKind::Highlighter,
        ObjectKind::Arrow,
        ObjectKind::Line,
        ObjectKind::Rectangle,
        ObjectKind::Circle,
        ObjectKind::Text,
        ObjectKind::Counter,
    ];
}

/// A stroke sample with the clock reading at which it was captured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedPoint {
    pub point: Point,
    /// Monotonic clock reading in seconds
    pub timestamp: f64,
}

impl TimedPoint {
    pub fn new(point: Point, timestamp: f64) -> Self {
        Self { point, timestamp }
    }
}

/// Freehand pen or highlighter stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Samples in non-decreasing timestamp order
    pub points: Vec<TimedPoint>,
    pub color: Color,
    pub line_width: f64,
    /// Scene-wide draw order (0 = not yet appended)
    #[serde(default)]
    pub order: u64,
}

impl Stroke {
    pub fn new(color: Color, line_width: f64) -> Self {
        Self {
            points: Vec::new(),
            color,
            line_width,
            order: 0,
        }
    }

    pub fn bounding_box(&self) -> Option<Rect> {
        let first = self.points.first()?.point;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for sample in &self.points[1..] {
            min_x = min_x.min(sample.point.x);
            max_x = max_x.max(sample.point.x);
            min_y = min_y.min(sample.point.y);
            max_y = max_y.max(sample.point.y);
        }
        Some(Rect::from_min_max(min_x, min_y, max_x, max_y))
    }
}

/// Uniform record for arrows, lines, rectangles and circles.
///
/// Rectangles and circles occupy the box spanned by `start` and `end`; a
/// circle is the ellipse inscribed in that box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    pub start: Point,
    pub end: Point,
    pub color: Color,
    pub line_width: f64,
    /// `None` while the shape is still being dragged
    pub creation_time: Option<f64>,
    #[serde(default)]
    pub order: u64,
}

impl ShapeRecord {
    pub fn new(start: Point, end: Point, color: Color, line_width: f64) -> Self {
        Self {
            start,
            end,
            color,
            line_width,
            creation_time: None,
            order: 0,
        }
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    /// True when both defining points coincide.
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}

/// Placed text. Text never fades and has no creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnnotation {
    pub text: String,
    /// Top-left corner of the first line
    pub position: Point,
    pub color: Color,
    pub font_size: f64,
    #[serde(default)]
    pub order: u64,
}

/// Numbered marker badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterAnnotation {
    pub number: u32,
    /// Badge center
    pub position: Point,
    pub color: Color,
    pub creation_time: Option<f64>,
    #[serde(default)]
    pub order: u64,
}

impl CounterAnnotation {
    pub fn bounding_box(&self) -> Rect {
        Rect::around(self.position, COUNTER_RADIUS)
    }
}

/// Any finalized scene object, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneObject {
    Pen(Stroke),
    Highlighter(Stroke),
    Arrow(ShapeRecord),
    Line(ShapeRecord),
    Rectangle(ShapeRecord),
    Circle(ShapeRecord),
    Text(TextAnnotation),
    Counter(CounterAnnotation),
}

impl SceneObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            SceneObject::Pen(_) => ObjectKind::Pen,
            SceneObject::Highlighter(_) => ObjectKind::Highlighter,
            SceneObject::Arrow(_) => ObjectKind::Arrow,
            SceneObject::Line(_) => ObjectKind::Line,
            SceneObject::Rectangle(_) => ObjectKind::Rectangle,
            SceneObject::Circle(_) => ObjectKind::Circle,
            SceneObject::Text(_) => ObjectKind::Text,
            SceneObject::Counter(_) => ObjectKind::Counter,
        }
    }

    pub fn order(&self) -> u64 {
        match self {
            SceneObject::Pen(s) | SceneObject::Highlighter(s) => s.order,
            SceneObject::Arrow(s)
            | SceneObject::Line(s)
            | SceneObject::Rectangle(s)
            | SceneObject::Circle(s) => s.order,
            SceneObject::Text(t) => t.order,
            SceneObject::Counter(c) => c.order,
        }
    }

    pub(crate) fn set_order(&mut self, order: u64) {
        match self {
            SceneObject::Pen(s) | SceneObject::Highlighter(s) => s.order = order,
            SceneObject::Arrow(s)
            | SceneObject::Line(s)
            | SceneObject::Rectangle(s)
            | SceneObject::Circle(s) => s.order = order,
            SceneObject::Text(t) => t.order = order,
            SceneObject::Counter(c) => c.order = order,
        }
    }

    /// Borrowed view of this object's payload.
    pub fn view(&self) -> ObjectView<'_> {
        match self {
            SceneObject::Pen(s) | SceneObject::Highlighter(s) => ObjectView::Stroke(s),
            SceneObject::Arrow(s)
            | SceneObject::Line(s)
            | SceneObject::Rectangle(s)
            | SceneObject::Circle(s) => ObjectView::Shape(s),
            SceneObject::Text(t) => ObjectView::Text(t),
            SceneObject::Counter(c) => ObjectView::Counter(c),
        }
    }

    /// Axis-aligned bounds of the defining geometry (stroke width excluded).
    ///
    /// Returns `None` only for a stroke with no remaining points.
    pub fn bounding_box(&self, metrics: &dyn TextMetrics) -> Option<Rect> {
        self.view().bounding_box(metrics)
    }

    /// Shifts every defining point by the given delta.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            SceneObject::Pen(s) | SceneObject::Highlighter(s) => {
                for sample in &mut s.points {
                    sample.point = sample.point.offset(dx, dy);
                }
            }
            SceneObject::Arrow(s)
            | SceneObject::Line(s)
            | SceneObject::Rectangle(s)
            | SceneObject::Circle(s) => {
                s.start = s.start.offset(dx, dy);
                s.end = s.end.offset(dx, dy);
            }
            SceneObject::Text(t) => t.position = t.position.offset(dx, dy),
            SceneObject::Counter(c) => c.position = c.position.offset(dx, dy),
        }
    }
}

/// Borrowed access to an object inside a scene collection.
///
/// The kind is carried separately by the [`ObjectRef`](super::ObjectRef) that
/// produced the view; arrows, lines, rectangles and circles share `Shape`.
#[derive(Debug, Clone, Copy)]
pub enum ObjectView<'a> {
    Stroke(&'a Stroke),
    Shape(&'a ShapeRecord),
    Text(&'a TextAnnotation),
    Counter(&'a CounterAnnotation),
}

impl ObjectView<'_> {
    pub fn order(&self) -> u64 {
        match self {
            ObjectView::Stroke(s) => s.order,
            ObjectView::Shape(s) => s.order,
            ObjectView::Text(t) => t.order,
            ObjectView::Counter(c) => c.order,
        }
    }

    /// Stroke width used for damage padding; zero for text and counters.
    pub fn line_width(&self) -> f64 {
        match self {
            ObjectView::Stroke(s) => s.line_width,
            ObjectView::Shape(s) => s.line_width,
            ObjectView::Text(_) | ObjectView::Counter(_) => 0.0,
        }
    }

    pub fn bounding_box(&self, metrics: &dyn TextMetrics) -> Option<Rect> {
        match self {
            ObjectView::Stroke(s) => s.bounding_box(),
            ObjectView::Shape(s) => Some(s.bounding_box()),
            ObjectView::Text(t) => Some(text_bounds(metrics, &t.text, t.position, t.font_size)),
            ObjectView::Counter(c) => Some(c.bounding_box()),
        }
    }
}
