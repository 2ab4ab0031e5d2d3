use crate::config::Action;
use crate::draw::color;
use crate::history::Command;
use crate::input::{events::Key, tool::Tool};
use crate::selection;

use super::{DrawingState, InputState};

impl InputState {
    /// Processes a key press event.
    ///
    /// Handles all keyboard input including:
    /// - Modifier key tracking
    /// - Text input (when in TextInput state)
    /// - Configurable actions (undo, redo, delete, tools, colors, fade)
    pub fn on_key_press(&mut self, key: Key) {
        // Handle modifier keys first
        match key {
            Key::Shift => {
                self.modifiers.shift = true;
                return;
            }
            Key::Ctrl => {
                self.modifiers.ctrl = true;
                return;
            }
            Key::Alt => {
                self.modifiers.alt = true;
                return;
            }
            _ => {}
        }

        // In text input mode, only check actions if modifiers are pressed or it's a special key
        // This allows plain letters to be typed without triggering color/tool actions
        if matches!(self.state, DrawingState::TextInput(_)) {
            let should_check_actions = match key {
                Key::Escape => true,
                _ => self.modifiers.ctrl || self.modifiers.alt,
            };

            if should_check_actions {
                if let Some(action) = key.binding_name().and_then(|name| self.find_action(&name))
                {
                    self.on_key_command(action);
                    return;
                }
            }

            // Plain Return finalizes; Shift+Return inserts a newline below
            if key == Key::Return && !self.modifiers.shift {
                self.commit_text_session();
                return;
            }

            self.edit_text_buffer(key);
            return;
        }

        let Some(key_str) = key.binding_name() else {
            return;
        };

        // Look up action based on keybinding
        if let Some(action) = self.find_action(&key_str) {
            self.on_key_command(action);
        }
    }

    /// Processes a key release event.
    ///
    /// Only modifier releases change state.
    pub fn on_key_release(&mut self, key: Key) {
        match key {
            Key::Shift => self.modifiers.shift = false,
            Key::Ctrl => self.modifiers.ctrl = false,
            Key::Alt => self.modifiers.alt = false,
            _ => {}
        }
    }

    /// Appends typed text to the active text session.
    ///
    /// Returns false when no session is open.
    pub fn type_text(&mut self, text: &str) -> bool {
        let DrawingState::TextInput(session) = &mut self.state else {
            return false;
        };
        session.buffer.push_str(text);
        self.needs_redraw = true;
        true
    }

    fn edit_text_buffer(&mut self, key: Key) {
        let DrawingState::TextInput(session) = &mut self.state else {
            return;
        };
        match key {
            Key::Char(c) => session.buffer.push(c),
            Key::Space => session.buffer.push(' '),
            Key::Backspace => {
                session.buffer.pop();
            }
            Key::Return => session.buffer.push('\n'),
            _ => return,
        }
        self.needs_redraw = true;
    }

    /// Runs a keyboard command.
    ///
    /// Every command that touches the scene first settles the gesture in
    /// progress, so a pending text draft is committed before it.
    pub fn on_key_command(&mut self, action: Action) {
        log::debug!("Action: {action:?}");
        match action {
            Action::Cancel => self.cancel(),
            Action::Undo => {
                self.settle_gesture();
                if self.history.undo(&mut self.scene) {
                    self.needs_redraw = true;
                }
            }
            Action::Redo => {
                self.settle_gesture();
                if self.history.redo(&mut self.scene) {
                    self.needs_redraw = true;
                }
            }
            Action::DeleteLast => {
                self.settle_gesture();
                if self.tool == Tool::Select && !self.scene.selection().is_empty() {
                    selection::delete_selected(&mut self.scene, &mut self.history);
                } else {
                    self.delete_last();
                }
            }
            Action::ClearAll => {
                self.settle_gesture();
                if !self.history.perform(&mut self.scene, Command::ClearAll) {
                    log::debug!("Nothing to clear");
                }
            }
            Action::SelectAll => {
                if self.tool == Tool::Select {
                    self.settle_gesture();
                    selection::select_all(&mut self.scene);
                } else {
                    log::debug!("Select-all ignored outside the selection tool");
                }
            }
            Action::ToggleFade => {
                self.settle_gesture();
                self.set_fade_mode(!self.scene.fade.enabled);
            }
            Action::IncreaseThickness => self.set_line_width(self.current_thickness() + 1.0),
            Action::DecreaseThickness => self.set_line_width(self.current_thickness() - 1.0),
            Action::IncreaseFontSize => self.adjust_font_size(2.0),
            Action::DecreaseFontSize => self.adjust_font_size(-2.0),
            Action::SetToolPen => self.set_tool(Tool::Pen),
            Action::SetToolHighlighter => self.set_tool(Tool::Highlighter),
            Action::SetToolArrow => self.set_tool(Tool::Arrow),
            Action::SetToolLine => self.set_tool(Tool::Line),
            Action::SetToolRectangle => self.set_tool(Tool::Rectangle),
            Action::SetToolCircle => self.set_tool(Tool::Circle),
            Action::SetToolText => self.set_tool(Tool::Text),
            Action::SetToolCounter => self.set_tool(Tool::Counter),
            Action::SetToolSelect => self.set_tool(Tool::Select),
            Action::SetColorRed => self.set_color(color::RED),
            Action::SetColorGreen => self.set_color(color::GREEN),
            Action::SetColorBlue => self.set_color(color::BLUE),
            Action::SetColorYellow => self.set_color(color::YELLOW),
            Action::SetColorOrange => self.set_color(color::ORANGE),
            Action::SetColorPink => self.set_color(color::PINK),
            Action::SetColorWhite => self.set_color(color::WHITE),
            Action::SetColorBlack => self.set_color(color::BLACK),
        }
        self.needs_redraw = true;
        self.sync_fade_timer();
    }

    /// Escape: abandon the current gesture, or drop the selection when idle.
    fn cancel(&mut self) {
        match self.state {
            DrawingState::TextInput(_) => self.cancel_text_session(),
            DrawingState::Drawing { .. } | DrawingState::Selecting { .. } => {
                self.scene.in_progress.clear();
                self.state = DrawingState::Idle;
                self.scene.mark_dirty();
            }
            // Drags already moved the objects; keep them where they are.
            DrawingState::MovingSelection { .. } | DrawingState::DraggingText { .. } => {
                self.settle_gesture();
            }
            DrawingState::Idle => self.scene.clear_selection(),
        }
    }
}
