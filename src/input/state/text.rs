use crate::draw::{Color, ObjectKind, SceneObject, TextAnnotation};
use crate::history::Command;
use crate::util::Point;

use super::InputState;
use super::core::report;

/// In-place text editing sub-state.
///
/// Holds the draft separately from the scene; the scene only changes when
/// the session commits.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEditSession {
    /// Top-left corner of the draft
    pub position: Point,
    pub buffer: String,
    /// Index of the text being edited, `None` for a new annotation
    pub editing: Option<usize>,
    pub color: Color,
    pub font_size: f64,
}

impl TextEditSession {
    pub fn new(position: Point, color: Color, font_size: f64) -> Self {
        Self {
            position,
            buffer: String::new(),
            editing: None,
            color,
            font_size,
        }
    }

    /// Session pre-filled with an existing annotation.
    pub fn editing(index: usize, text: &TextAnnotation) -> Self {
        Self {
            position: text.position,
            buffer: text.text.clone(),
            editing: Some(index),
            color: text.color,
            font_size: text.font_size,
        }
    }

    /// Draft as a text object, or `None` while the buffer is empty.
    pub fn draft(&self) -> Option<SceneObject> {
        if self.buffer.is_empty() {
            return None;
        }
        Some(SceneObject::Text(TextAnnotation {
            text: self.buffer.clone(),
            position: self.position,
            color: self.color,
            font_size: self.font_size,
            order: 0,
        }))
    }
}

impl InputState {
    /// Finalizes a text session into the scene.
    ///
    /// New text is added when non-empty. An edited annotation is replaced
    /// when changed and removed when emptied. Each outcome is one undo entry.
    pub(crate) fn commit_text(&mut self, session: TextEditSession) {
        let Some(index) = session.editing else {
            if let Some(draft) = session.draft() {
                self.history.perform(&mut self.scene, Command::Insert(draft));
            } else {
                log::debug!("Discarded empty text session");
            }
            return;
        };

        let Some(original) = self.scene.collections().texts.get(index).cloned() else {
            report(&crate::error::SceneError::IndexOutOfRange {
                kind: ObjectKind::Text,
                index,
                len: self.scene.len(ObjectKind::Text),
            });
            return;
        };

        if session.buffer.is_empty() {
            self.history.perform(
                &mut self.scene,
                Command::Remove {
                    kind: ObjectKind::Text,
                    order: original.order,
                },
            );
            return;
        }

        let updated = TextAnnotation {
            text: session.buffer,
            color: session.color,
            font_size: session.font_size,
            ..original.clone()
        };
        if updated != original {
            self.history
                .perform(&mut self.scene, Command::ReplaceText { index, text: updated });
        }
        self.scene.mark_dirty();
    }

    /// Commits the active text session, if any.
    pub fn commit_text_session(&mut self) {
        if let super::DrawingState::TextInput(session) =
            std::mem::replace(&mut self.state, super::DrawingState::Idle)
        {
            self.commit_text(session);
            self.needs_redraw = true;
        }
    }

    /// Drops the active text session without touching the scene.
    pub fn cancel_text_session(&mut self) {
        if matches!(self.state, super::DrawingState::TextInput(_)) {
            self.state = super::DrawingState::Idle;
            // Edited text was hidden while the session ran.
            self.scene.mark_dirty();
            self.needs_redraw = true;
            log::debug!("Text session cancelled");
        }
    }
}
