//! Dirty region tracking for incremental rendering.
//!
//! Collects axis-aligned rectangles that need repainting between frames.

use crate::util::Rect;

/// Extra margin around object bounds so stroke width and anti-aliasing are covered.
const DAMAGE_MARGIN: f64 = 2.0;

/// Tracks dirty rectangles accumulated between renders.
#[derive(Debug, Default, Clone)]
pub struct DirtyTracker {
    regions: Vec<Rect>,
    force_full: bool,
}

impl DirtyTracker {
    /// Creates a new, empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the entire surface as dirty. Clears any accumulated rectangles.
    pub fn mark_full(&mut self) {
        self.force_full = true;
        self.regions.clear();
    }

    /// Adds a dirty rectangle if the tracker is not already full.
    pub fn mark_rect(&mut self, rect: Rect) {
        if self.force_full {
            return;
        }
        self.regions.push(rect);
    }

    /// Adds the bounds of a changed object, padded by its stroke width.
    ///
    /// Unknown bounds (an emptied stroke) fall back to full damage.
    pub fn mark_bounds(&mut self, bounds: Option<Rect>, line_width: f64) {
        match bounds {
            Some(rect) => self.mark_rect(rect.inflate(line_width / 2.0 + DAMAGE_MARGIN)),
            None => self.mark_full(),
        }
    }

    /// Returns true if anything is waiting to be repainted.
    pub fn is_dirty(&self) -> bool {
        self.force_full || !self.regions.is_empty()
    }

    /// Drains the dirty regions gathered so far.
    ///
    /// When the full surface is marked, returns a single rectangle covering the
    /// entire surface; otherwise returns accumulated rectangles.
    pub fn take_regions(&mut self, width: f64, height: f64) -> Vec<Rect> {
        if self.force_full {
            self.force_full = false;
            self.regions.clear();
            if width > 0.0 && height > 0.0 {
                return vec![Rect::new(0.0, 0.0, width, height)];
            }
            Vec::new()
        } else {
            self.regions.drain(..).collect()
        }
    }
}
