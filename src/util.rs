//! Geometry helpers, angle snapping, and the fade alpha schedule.
//!
//! This module provides:
//! - [`Point`] and [`Rect`] value types in the flat scene coordinate space (y-down)
//! - Point-to-segment distance used by hit-testing
//! - 45° angle snapping for the constrain modifier
//! - Age-based alpha calculation for fade mode
//! - Color name mapping for configuration files

use crate::draw::{Color, color::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_4;

// ============================================================================
// Points
// ============================================================================

/// A real-valued point in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Returns this point shifted by the given delta.
    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// Distance from `point` to the segment `start`→`end`.
///
/// Degenerate segments (both ends equal) fall back to point distance.
pub fn distance_to_segment(point: Point, start: Point, end: Point) -> f64 {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let length_sq = dx * dx + dy * dy;

    if length_sq < 1e-12 {
        return point.distance_to(start);
    }

    let t = ((point.x - start.x) * dx + (point.y - start.y) * dy) / length_sq;
    let t = t.clamp(0.0, 1.0);
    point.distance_to(Point::new(start.x + t * dx, start.y + t * dy))
}

/// Snaps `current` to the nearest 45° increment around `anchor`, preserving
/// the drag distance.
///
/// A zero-distance drag snaps to the anchor itself.
pub fn snap_to_45_degrees(anchor: Point, current: Point) -> Point {
    let dx = current.x - anchor.x;
    let dy = current.y - anchor.y;
    let distance = dx.hypot(dy);
    if distance == 0.0 {
        return anchor;
    }

    let raw_angle = dy.atan2(dx);
    let snapped = (raw_angle / FRAC_PI_4).round() * FRAC_PI_4;
    Point::new(
        anchor.x + distance * snapped.cos(),
        anchor.y + distance * snapped.sin(),
    )
}

// ============================================================================
// Rectangles
// ============================================================================

/// Axis-aligned rectangle used for bounding boxes, region queries and dirty tracking.
///
/// Zero-sized rectangles are valid (a horizontal line has zero height) and
/// take part in intersection tests; [`Rect::is_empty`] reports them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new rectangle; negative sizes are normalised.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::from_min_max(x, y, x + width, y + height)
    }

    /// Builds a rectangle from min/max bounds in any order.
    pub fn from_min_max(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x: x1.min(x2),
            y: y1.min(y2),
            width: (x2 - x1).abs(),
            height: (y2 - y1).abs(),
        }
    }

    /// Rectangle spanned by two corner points.
    pub fn from_points(a: Point, b: Point) -> Self {
        Self::from_min_max(a.x, a.y, b.x, b.y)
    }

    /// Square of side `2 * radius` centered at `center`.
    pub fn around(center: Point, radius: f64) -> Self {
        Self::from_min_max(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        )
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Returns true if the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Returns a rectangle that covers both input rectangles.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::from_min_max(
            self.x.min(other.x),
            self.y.min(other.y),
            self.max_x().max(other.max_x()),
            self.max_y().max(other.max_y()),
        )
    }

    /// Expands the rectangle evenly in all directions by `amount`.
    pub fn inflate(&self, amount: f64) -> Rect {
        Rect {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + amount * 2.0,
            height: self.height + amount * 2.0,
        }
    }

    /// Inclusive point containment.
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.max_x() && point.y >= self.y && point.y <= self.max_y()
    }

    /// Inclusive overlap test; touching edges count as intersecting.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.max_x()
            && other.x <= self.max_x()
            && self.y <= other.max_y()
            && other.y <= self.max_y()
    }

    /// Returns true if `other` lies entirely within this rectangle.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.max_x() <= self.max_x()
            && other.max_y() <= self.max_y()
    }
}

// ============================================================================
// Fade Schedule
// ============================================================================

/// Opacity of an object of the given age under a fade duration.
///
/// Full opacity for the first half of the duration, then a linear ramp down
/// to zero. Returns `None` once `age >= duration` (the object has expired).
pub fn fade_alpha(age: f64, duration: f64) -> Option<f64> {
    if age >= duration {
        return None;
    }
    let half = duration / 2.0;
    if age <= half {
        Some(1.0)
    } else {
        Some(((duration - age) / half).clamp(0.0, 1.0))
    }
}

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system to parse color names from the config file.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "orange", "pink", "white", "black"
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_distance_projects_onto_segment() {
        let d = distance_to_segment(
            Point::new(5.0, 3.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        );
        assert!((d - 3.0).abs() < 1e-9);
    }

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let d = distance_to_segment(
            Point::new(13.0, 4.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        );
        assert!((d - 5.0).abs() < 1e-9);
    }

    #[test]
    fn segment_distance_handles_degenerate_segment() {
        let p = Point::new(3.0, 4.0);
        let d = distance_to_segment(p, Point::new(0.0, 0.0), Point::new(0.0, 0.0));
        assert!((d - 5.0).abs() < 1e-9);
    }

    #[test]
    fn snap_to_horizontal_keeps_distance() {
        let anchor = Point::new(100.0, 100.0);
        let snapped = snap_to_45_degrees(anchor, Point::new(150.0, 110.0));
        assert_eq!(snapped.y, 100.0);
        assert!(snapped.x > 100.0);
        let expected = (50.0_f64).hypot(10.0);
        assert!((snapped.distance_to(anchor) - expected).abs() < 1e-9);
    }

    #[test]
    fn snap_to_diagonal() {
        let anchor = Point::new(0.0, 0.0);
        let snapped = snap_to_45_degrees(anchor, Point::new(40.0, 50.0));
        assert!((snapped.x - snapped.y).abs() < 1e-9);
    }

    #[test]
    fn snap_zero_distance_returns_anchor() {
        let anchor = Point::new(7.0, 8.0);
        assert_eq!(snap_to_45_degrees(anchor, anchor), anchor);
    }

    #[test]
    fn rect_union_and_inflate() {
        let a = Rect::from_min_max(0.0, 0.0, 10.0, 10.0);
        let b = Rect::from_min_max(20.0, 5.0, 30.0, 40.0);
        let u = a.union(&b).inflate(5.0);
        assert_eq!(u, Rect::new(-5.0, -5.0, 40.0, 50.0));
    }

    #[test]
    fn rect_intersection_is_inclusive() {
        let line_box = Rect::from_min_max(0.0, 50.0, 100.0, 50.0);
        let query = Rect::from_min_max(10.0, 40.0, 20.0, 60.0);
        assert!(line_box.intersects(&query));
        assert!(!line_box.intersects(&Rect::from_min_max(10.0, 60.0, 20.0, 70.0)));
        assert!(query.contains_rect(&Rect::from_min_max(12.0, 45.0, 18.0, 55.0)));
    }

    #[test]
    fn fade_alpha_schedule() {
        assert_eq!(fade_alpha(0.3, 1.25), Some(1.0));
        assert_eq!(fade_alpha(0.625, 1.25), Some(1.0));
        let mid = fade_alpha(1.0, 1.25).unwrap();
        assert!(mid > 0.0 && mid < 1.0);
        assert_eq!(fade_alpha(1.25, 1.25), None);
        assert_eq!(fade_alpha(3.0, 1.25), None);
    }

    #[test]
    fn name_color_mapping() {
        assert_eq!(name_to_color("white").unwrap(), WHITE);
        assert_eq!(name_to_color("RED").unwrap(), RED);
        assert!(name_to_color("chartreuse").is_none());
    }
}
