//! Drawing tool selection.

use crate::draw::ObjectKind;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing tool selection.
///
/// The active tool determines what a pointer gesture creates. Every tool
/// except [`Tool::Select`] produces objects of exactly one kind.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// Freehand drawing - follows the pointer path
    Pen,
    /// Wide translucent freehand stroke
    Highlighter,
    /// Straight line with a directional head
    Arrow,
    /// Straight line between start and end points
    Line,
    /// Rectangle outline - from corner to corner
    Rectangle,
    /// Ellipse outline inscribed in the dragged box
    Circle,
    /// Click to place or edit text
    Text,
    /// Click to drop the next numbered badge
    Counter,
    /// Pick, move and delete existing objects
    Select,
}

impl Tool {
    pub const ALL: [Tool; 9] = [
        Tool::Pen,
        Tool::Highlighter,
        Tool::Arrow,
        Tool::Line,
        Tool::Rectangle,
        Tool::Circle,
        Tool::Text,
        Tool::Counter,
        Tool::Select,
    ];

    /// Kind of object this tool creates, `None` for the selection tool.
    pub fn object_kind(self) -> Option<ObjectKind> {
        match self {
            Tool::Pen => Some(ObjectKind::Pen),
            Tool::Highlighter => Some(ObjectKind::Highlighter),
            Tool::Arrow => Some(ObjectKind::Arrow),
            Tool::Line => Some(ObjectKind::Line),
            Tool::Rectangle => Some(ObjectKind::Rectangle),
            Tool::Circle => Some(ObjectKind::Circle),
            Tool::Text => Some(ObjectKind::Text),
            Tool::Counter => Some(ObjectKind::Counter),
            Tool::Select => None,
        }
    }
}
