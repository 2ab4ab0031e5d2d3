//! Scene model: drawable objects and the collections that own them.
//!
//! This module defines the core drawing types used for screen annotation:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`SceneObject`]: the eight annotation kinds (strokes, shapes, text, counters)
//! - [`Scene`]: per-kind collections, in-progress slots, selection and fade policy
//! - [`Frame`]: per-tick render output with resolved opacity
//!
//! Painting itself is left to the host.

pub mod color;
pub mod dirty;
pub mod font;
pub mod frame;
pub mod scene;
pub mod shape;

// Re-export commonly used types at module level
pub use color::Color;
pub use dirty::DirtyTracker;
pub use font::{ApproximateMetrics, TextMetrics};
pub use frame::{Frame, RenderItem};
pub use scene::{Collections, InProgress, ObjectRef, Scene};
pub use shape::{
    COUNTER_RADIUS, CounterAnnotation, ObjectKind, ObjectView, SceneObject, ShapeRecord, Stroke,
    TextAnnotation, TimedPoint,
};

// Re-export color constants for public API (unused internally but part of public interface)
#[allow(unused_imports)]
pub use color::{BLACK, BLUE, GREEN, HIGHLIGHTER_YELLOW, ORANGE, PINK, RED, WHITE, YELLOW};
