//! Generic input event types.

use serde::{Deserialize, Serialize};

/// Generic key representation.
///
/// Hosts map their native key codes to these values; the controller only
/// ever sees this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Escape key
    Escape,
    /// Return/Enter key
    Return,
    /// Backspace key
    Backspace,
    /// Forward delete key
    Delete,
    /// Space bar
    Space,
    /// Shift modifier
    Shift,
    /// Ctrl modifier
    Ctrl,
    /// Alt modifier
    Alt,
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Name used by keybinding strings, or `None` for modifiers and unknown keys.
    pub fn binding_name(&self) -> Option<String> {
        match self {
            Key::Char(c) => Some(c.to_string()),
            Key::Escape => Some("Escape".to_string()),
            Key::Return => Some("Return".to_string()),
            Key::Backspace => Some("Backspace".to_string()),
            Key::Delete => Some("Delete".to_string()),
            Key::Space => Some("Space".to_string()),
            Key::Shift | Key::Ctrl | Key::Alt | Key::Unknown => None,
        }
    }
}
