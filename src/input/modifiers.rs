//! Keyboard modifier state tracking.

use serde::{Deserialize, Serialize};

/// Keyboard modifier state.
///
/// Pointer events carry a snapshot of this; key events update the copy held
/// by the controller. Missing fields deserialize as released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Shift key pressed (constrain to 45°)
    pub shift: bool,
    /// Ctrl key pressed (secondary actions)
    pub ctrl: bool,
    /// Alt key pressed (draw rectangles and circles from their center)
    pub alt: bool,
}

impl Modifiers {
    /// Creates a new Modifiers instance with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::default()
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Self::default()
        }
    }
}
