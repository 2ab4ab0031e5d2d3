//! Text measurement for annotation bounding boxes.

use crate::util::{Point, Rect};

/// Fixed padding added around measured text on every side.
pub const TEXT_PADDING: f64 = 4.0;

/// Supplies rendered text extents.
///
/// The engine never rasterizes text itself; hosts with access to real font
/// metrics can plug their own implementation so hit-testing matches what is
/// painted on screen.
pub trait TextMetrics {
    /// Returns `(width, height)` of `text` laid out at `font_size`.
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64);
}

/// Font-agnostic estimate based on em fractions.
///
/// Each character advances `advance_em * font_size`; each line is
/// `line_height_em * font_size` tall. Newlines start a new line.
#[derive(Debug, Clone, Copy)]
pub struct ApproximateMetrics {
    pub advance_em: f64,
    pub line_height_em: f64,
}

impl Default for ApproximateMetrics {
    fn default() -> Self {
        Self {
            advance_em: 0.6,
            line_height_em: 1.2,
        }
    }
}

impl TextMetrics for ApproximateMetrics {
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64) {
        let mut lines = 0usize;
        let mut widest = 0usize;
        for line in text.split('\n') {
            lines += 1;
            widest = widest.max(line.chars().count());
        }
        (
            widest as f64 * self.advance_em * font_size,
            lines as f64 * self.line_height_em * font_size,
        )
    }
}

/// Bounding box of a text annotation whose top-left corner sits at `position`.
pub fn text_bounds(
    metrics: &dyn TextMetrics,
    text: &str,
    position: Point,
    font_size: f64,
) -> Rect {
    let (width, height) = metrics.measure(text, font_size);
    Rect::new(position.x, position.y, width, height).inflate(TEXT_PADDING)
}
