//! Keybinding configuration types and parsing.
//!
//! This module defines the configurable keybinding system that allows users
//! to customize keyboard shortcuts for all actions in the application.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All possible actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Cancellation
    Cancel,

    // History and scene edits
    Undo,
    Redo,
    DeleteLast,
    ClearAll,
    SelectAll,

    // Modes
    ToggleFade,

    // Thickness controls
    IncreaseThickness,
    DecreaseThickness,
    IncreaseFontSize,
    DecreaseFontSize,

    // Tool selection
    SetToolPen,
    SetToolHighlighter,
    SetToolArrow,
    SetToolLine,
    SetToolRectangle,
    SetToolCircle,
    SetToolText,
    SetToolCounter,
    SetToolSelect,

    // Color selections
    SetColorRed,
    SetColorGreen,
    SetColorBlue,
    SetColorYellow,
    SetColorOrange,
    SetColorPink,
    SetColorWhite,
    SetColorBlack,
}

/// A single keybinding: a key character with optional modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parse a keybinding string like "Ctrl+Shift+W" or "Escape".
    /// Modifiers can appear in any order: "Shift+Ctrl+W", "Alt+Shift+Ctrl+W", etc.
    /// Supports spaces around '+' (e.g., "Ctrl + Shift + W")
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        // Normalize by removing spaces around '+'
        let s_normalized = s.replace(" + ", "+").replace("+ ", "+").replace(" +", "+");

        // Split on '+' to get all parts
        let parts: Vec<&str> = s_normalized.split('+').collect();

        if parts.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        // Process each part, checking if it's a modifier or the actual key
        for part in parts {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => ctrl = true,
                "shift" => shift = true,
                "alt" => alt = true,
                _ => {
                    // Not a modifier, so it's part of the key
                    key_parts.push(part);
                }
            }
        }

        // Reconstruct the key from remaining parts (handles cases like "+" being the key)
        if key_parts.is_empty() {
            return Err(format!("No key specified in: {}", s));
        }

        // Join with '+' to handle the case where the key itself is '+'
        // (e.g., "Ctrl+Shift++" becomes ["Ctrl", "Shift", "", ""] with last two being the '+' key)
        let key = key_parts.join("+");

        if key.is_empty() {
            // This happens for "Ctrl+Shift++" where we have empty strings after the modifiers
            // The key is actually '+'
            Ok(Self {
                key: "+".to_string(),
                ctrl,
                shift,
                alt,
            })
        } else {
            Ok(Self {
                key,
                ctrl,
                shift,
                alt,
            })
        }
    }

    /// Check if this keybinding matches the current input state.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == ctrl
            && self.shift == shift
            && self.alt == alt
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings. Users specify them in config.toml as:
/// ```toml
/// [keybindings]
/// undo = ["Ctrl+Z"]
/// redo = ["Ctrl+Shift+Z", "Ctrl+Y"]
/// clear_all = ["Ctrl+Delete"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_cancel")]
    pub cancel: Vec<String>,

    #[serde(default = "default_undo")]
    pub undo: Vec<String>,

    #[serde(default = "default_redo")]
    pub redo: Vec<String>,

    #[serde(default = "default_delete_last")]
    pub delete_last: Vec<String>,

    #[serde(default = "default_clear_all")]
    pub clear_all: Vec<String>,

    #[serde(default = "default_select_all")]
    pub select_all: Vec<String>,

    #[serde(default = "default_toggle_fade")]
    pub toggle_fade: Vec<String>,

    #[serde(default = "default_increase_thickness")]
    pub increase_thickness: Vec<String>,

    #[serde(default = "default_decrease_thickness")]
    pub decrease_thickness: Vec<String>,

    #[serde(default = "default_increase_font_size")]
    pub increase_font_size: Vec<String>,

    #[serde(default = "default_decrease_font_size")]
    pub decrease_font_size: Vec<String>,

    #[serde(default = "default_tool_pen")]
    pub tool_pen: Vec<String>,

    #[serde(default = "default_tool_highlighter")]
    pub tool_highlighter: Vec<String>,

    #[serde(default = "default_tool_arrow")]
    pub tool_arrow: Vec<String>,

    #[serde(default = "default_tool_line")]
    pub tool_line: Vec<String>,

    #[serde(default = "default_tool_rectangle")]
    pub tool_rectangle: Vec<String>,

    #[serde(default = "default_tool_circle")]
    pub tool_circle: Vec<String>,

    #[serde(default = "default_tool_text")]
    pub tool_text: Vec<String>,

    #[serde(default = "default_tool_counter")]
    pub tool_counter: Vec<String>,

    #[serde(default = "default_tool_select")]
    pub tool_select: Vec<String>,

    #[serde(default = "default_set_color_red")]
    pub set_color_red: Vec<String>,

    #[serde(default = "default_set_color_green")]
    pub set_color_green: Vec<String>,

    #[serde(default = "default_set_color_blue")]
    pub set_color_blue: Vec<String>,

    #[serde(default = "default_set_color_yellow")]
    pub set_color_yellow: Vec<String>,

    #[serde(default = "default_set_color_orange")]
    pub set_color_orange: Vec<String>,

    #[serde(default = "default_set_color_pink")]
    pub set_color_pink: Vec<String>,

    #[serde(default = "default_set_color_white")]
    pub set_color_white: Vec<String>,

    #[serde(default = "default_set_color_black")]
    pub set_color_black: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            cancel: default_cancel(),
            undo: default_undo(),
            redo: default_redo(),
            delete_last: default_delete_last(),
            clear_all: default_clear_all(),
            select_all: default_select_all(),
            toggle_fade: default_toggle_fade(),
            increase_thickness: default_increase_thickness(),
            decrease_thickness: default_decrease_thickness(),
            increase_font_size: default_increase_font_size(),
            decrease_font_size: default_decrease_font_size(),
            tool_pen: default_tool_pen(),
            tool_highlighter: default_tool_highlighter(),
            tool_arrow: default_tool_arrow(),
            tool_line: default_tool_line(),
            tool_rectangle: default_tool_rectangle(),
            tool_circle: default_tool_circle(),
            tool_text: default_tool_text(),
            tool_counter: default_tool_counter(),
            tool_select: default_tool_select(),
            set_color_red: default_set_color_red(),
            set_color_green: default_set_color_green(),
            set_color_blue: default_set_color_blue(),
            set_color_yellow: default_set_color_yellow(),
            set_color_orange: default_set_color_orange(),
            set_color_pink: default_set_color_pink(),
            set_color_white: default_set_color_white(),
            set_color_black: default_set_color_black(),
        }
    }
}

impl KeybindingsConfig {
    /// Build a lookup map from keybindings to actions for efficient matching.
    /// Returns an error if any keybinding string is invalid or if duplicates are detected.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, String> {
        let mut map = HashMap::new();

        // Helper closure to insert and check for duplicates
        let mut insert_binding = |binding_str: &str, action: Action| -> Result<(), String> {
            let binding = KeyBinding::parse(binding_str)?;
            if let Some(existing_action) = map.insert(binding.clone(), action) {
                return Err(format!(
                    "Duplicate keybinding '{}' assigned to both {:?} and {:?}",
                    binding_str, existing_action, action
                ));
            }
            Ok(())
        };

        let groups: [(&[String], Action); 28] = [
            (&self.cancel, Action::Cancel),
            (&self.undo, Action::Undo),
            (&self.redo, Action::Redo),
            (&self.delete_last, Action::DeleteLast),
            (&self.clear_all, Action::ClearAll),
            (&self.select_all, Action::SelectAll),
            (&self.toggle_fade, Action::ToggleFade),
            (&self.increase_thickness, Action::IncreaseThickness),
            (&self.decrease_thickness, Action::DecreaseThickness),
            (&self.increase_font_size, Action::IncreaseFontSize),
            (&self.decrease_font_size, Action::DecreaseFontSize),
            (&self.tool_pen, Action::SetToolPen),
            (&self.tool_highlighter, Action::SetToolHighlighter),
            (&self.tool_arrow, Action::SetToolArrow),
            (&self.tool_line, Action::SetToolLine),
            (&self.tool_rectangle, Action::SetToolRectangle),
            (&self.tool_circle, Action::SetToolCircle),
            (&self.tool_text, Action::SetToolText),
            (&self.tool_counter, Action::SetToolCounter),
            (&self.tool_select, Action::SetToolSelect),
            (&self.set_color_red, Action::SetColorRed),
            (&self.set_color_green, Action::SetColorGreen),
            (&self.set_color_blue, Action::SetColorBlue),
            (&self.set_color_yellow, Action::SetColorYellow),
            (&self.set_color_orange, Action::SetColorOrange),
            (&self.set_color_pink, Action::SetColorPink),
            (&self.set_color_white, Action::SetColorWhite),
            (&self.set_color_black, Action::SetColorBlack),
        ];

        for (bindings, action) in groups {
            for binding_str in bindings {
                insert_binding(binding_str, action)?;
            }
        }

        Ok(map)
    }
}

// =============================================================================
// Default keybinding functions
// =============================================================================

fn default_cancel() -> Vec<String> {
    vec!["Escape".to_string()]
}

fn default_undo() -> Vec<String> {
    vec!["Ctrl+Z".to_string()]
}

fn default_redo() -> Vec<String> {
    vec!["Ctrl+Shift+Z".to_string(), "Ctrl+Y".to_string()]
}

fn default_delete_last() -> Vec<String> {
    vec!["Backspace".to_string(), "Delete".to_string()]
}

fn default_clear_all() -> Vec<String> {
    vec!["Ctrl+Backspace".to_string(), "Ctrl+Delete".to_string(), "E".to_string()]
}

fn default_select_all() -> Vec<String> {
    vec!["Ctrl+A".to_string()]
}

fn default_toggle_fade() -> Vec<String> {
    vec!["F".to_string()]
}

fn default_increase_thickness() -> Vec<String> {
    vec!["+".to_string(), "=".to_string()]
}

fn default_decrease_thickness() -> Vec<String> {
    vec!["-".to_string(), "_".to_string()]
}

fn default_increase_font_size() -> Vec<String> {
    vec!["Ctrl+Shift++".to_string(), "Ctrl+Shift+=".to_string()]
}

fn default_decrease_font_size() -> Vec<String> {
    vec!["Ctrl+Shift+-".to_string(), "Ctrl+Shift+_".to_string()]
}

fn default_tool_pen() -> Vec<String> {
    vec!["1".to_string()]
}

fn default_tool_highlighter() -> Vec<String> {
    vec!["2".to_string()]
}

fn default_tool_arrow() -> Vec<String> {
    vec!["3".to_string()]
}

fn default_tool_line() -> Vec<String> {
    vec!["4".to_string()]
}

fn default_tool_rectangle() -> Vec<String> {
    vec!["5".to_string()]
}

fn default_tool_circle() -> Vec<String> {
    vec!["6".to_string()]
}

fn default_tool_text() -> Vec<String> {
    vec!["7".to_string(), "T".to_string()]
}

fn default_tool_counter() -> Vec<String> {
    vec!["8".to_string()]
}

fn default_tool_select() -> Vec<String> {
    vec!["9".to_string(), "S".to_string()]
}

fn default_set_color_red() -> Vec<String> {
    vec!["R".to_string()]
}

fn default_set_color_green() -> Vec<String> {
    vec!["G".to_string()]
}

fn default_set_color_blue() -> Vec<String> {
    vec!["B".to_string()]
}

fn default_set_color_yellow() -> Vec<String> {
    vec!["Y".to_string()]
}

fn default_set_color_orange() -> Vec<String> {
    vec!["O".to_string()]
}

fn default_set_color_pink() -> Vec<String> {
    vec!["P".to_string()]
}

fn default_set_color_white() -> Vec<String> {
    vec!["W".to_string()]
}

fn default_set_color_black() -> Vec<String> {
    vec!["K".to_string()]
}
