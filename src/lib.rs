//! Scene engine for screen annotation overlays.
//!
//! Owns the drawable objects (freehand strokes, highlighter strokes, arrows,
//! lines, rectangles, circles, text and numbered counters), the undo/redo
//! history, hit-testing and selection, and the optional auto-fade lifecycle.
//! Hosts feed pointer and key events into [`InputState`] and paint the
//! [`Frame`](draw::Frame) it returns every tick; capture and painting stay
//! with the host.

pub mod clock;
pub mod config;
pub mod draw;
pub mod error;
pub mod fade;
pub mod history;
pub mod input;
pub mod replay;
pub mod selection;
pub mod util;

pub use config::Config;
pub use error::SceneError;
pub use input::InputState;
