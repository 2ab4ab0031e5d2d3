mod actions;
mod core;
mod mouse;
mod render;
mod text;
#[cfg(test)]
mod tests;

pub use core::{DrawingState, InputState, ToolStyle};
pub use text::TextEditSession;
