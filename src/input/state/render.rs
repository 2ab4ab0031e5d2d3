use crate::draw::Frame;
use crate::fade;
use crate::selection;
use crate::util::Rect;

use super::{DrawingState, InputState};

impl InputState {
    /// Builds the frame to paint at `now`, pruning expired objects first.
    ///
    /// Output order is finalized objects by draw order, in-progress shapes,
    /// then the text draft. Text being edited in place is replaced by its
    /// draft. Pruning is not undo-logged.
    pub fn render_frame(&mut self, now: f64) -> Frame {
        if fade::prune_expired(&mut self.scene, now) > 0 {
            self.needs_redraw = true;
        }

        let mut frame = Frame::from_scene(&self.scene, now, self.editing_text_ref());

        match &self.state {
            DrawingState::TextInput(session) => {
                if let Some(draft) = session.draft() {
                    frame.push_in_progress(draft);
                }
            }
            DrawingState::Selecting {
                origin, current, ..
            } => {
                frame.marquee = Some(Rect::from_points(*origin, *current));
            }
            _ => {}
        }

        if !self.scene.selection().is_empty() {
            frame.selection_bounds = Some(selection::selection_bounding_box(&self.scene));
        }

        self.sync_fade_timer();
        self.needs_redraw = false;
        frame
    }

    /// Renders at the controller's own clock reading.
    pub fn render_now(&mut self) -> Frame {
        let now = self.now();
        self.render_frame(now)
    }
}
