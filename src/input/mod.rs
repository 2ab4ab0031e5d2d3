//! Input handling and tool state machine.
//!
//! This module translates host pointer and keyboard events into scene edits.
//! It maintains the current tool, per-tool styles, and the gesture state
//! machine for the different modes (idle, drawing, selecting, moving, text input).

pub mod events;
pub mod modifiers;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use events::Key;
pub use modifiers::Modifiers;
pub use state::{DrawingState, InputState, TextEditSession, ToolStyle};
pub use tool::Tool;
