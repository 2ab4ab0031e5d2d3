use crate::draw::{CounterAnnotation, SceneObject, ShapeRecord, Stroke, TimedPoint};
use crate::history::Command;
use crate::input::{modifiers::Modifiers, tool::Tool};
use crate::selection;
use crate::util::{self, Point, Rect};

use super::text::TextEditSession;
use super::{DrawingState, InputState};

impl InputState {
    /// Processes a pointer press.
    ///
    /// # Arguments
    /// * `point` - Pointer position in scene coordinates
    /// * `modifiers` - Modifier state at the time of the press
    /// * `click_count` - 1 for a single click, 2 for a double click
    ///
    /// # Behavior
    /// - Drawing tools: start a new object in the in-progress slot
    /// - Counter: drops the next numbered badge immediately
    /// - Text: drags a hit text, edits it on double click, or opens a new draft
    /// - Select: drags the selection on a hit, starts a rubber band on a miss
    pub fn on_pointer_down(&mut self, point: Point, modifiers: Modifiers, click_count: u32) {
        self.modifiers = modifiers;
        if !matches!(self.state, DrawingState::Idle) {
            self.settle_gesture();
        }

        match self.tool {
            Tool::Counter => self.place_counter(point),
            Tool::Text => self.text_pointer_down(point, click_count),
            Tool::Select => self.select_pointer_down(point),
            tool => self.begin_drawing(tool, point),
        }
        self.needs_redraw = true;
    }

    /// Processes pointer motion.
    ///
    /// Modifiers are sampled on every move, so constrain and center mode
    /// follow the keys as they are pressed and released mid-drag.
    pub fn on_pointer_move(&mut self, point: Point, modifiers: Modifiers) {
        self.modifiers = modifiers;
        match self.state.clone() {
            DrawingState::Drawing {
                tool,
                anchor,
                center_mode,
            } => self.update_drawing(tool, anchor, center_mode, point),
            DrawingState::Selecting { origin, extend, .. } => {
                self.state = DrawingState::Selecting {
                    origin,
                    current: point,
                    extend,
                };
                self.needs_redraw = true;
            }
            DrawingState::MovingSelection { last, dx, dy } => {
                let (step_x, step_y) = (point.x - last.x, point.y - last.y);
                selection::move_selected(&mut self.scene, step_x, step_y);
                self.state = DrawingState::MovingSelection {
                    last: point,
                    dx: dx + step_x,
                    dy: dy + step_y,
                };
                self.needs_redraw = true;
            }
            DrawingState::DraggingText { index, grab, .. } => {
                let target = point.offset(grab.0, grab.1);
                if let Err(err) = self.scene.set_text_position(index, target) {
                    super::core::report(&err);
                    self.state = DrawingState::Idle;
                }
                self.needs_redraw = true;
            }
            DrawingState::Idle | DrawingState::TextInput(_) => {}
        }
    }

    /// Processes a pointer release.
    ///
    /// Finalizes the gesture: a drawn object gets its creation time and is
    /// added through the command log, a rubber band becomes the selection,
    /// and a drag is recorded as one undoable move.
    pub fn on_pointer_up(&mut self, point: Point, modifiers: Modifiers) {
        self.on_pointer_move(point, modifiers);

        match std::mem::replace(&mut self.state, DrawingState::Idle) {
            DrawingState::Drawing { tool, .. } => self.finish_drawing(tool),
            DrawingState::Selecting {
                origin,
                current,
                extend,
            } => {
                let region = Rect::from_points(origin, current);
                let hits = selection::find_objects_in_rect(&self.scene, region, self.region_policy);
                log::debug!("Rubber band selected {} objects", hits.len());
                if extend {
                    let mut merged = self.scene.selection().clone();
                    merged.extend(hits);
                    self.scene.set_selection(merged);
                } else {
                    self.scene.set_selection(hits);
                }
                self.scene.mark_dirty();
            }
            state @ (DrawingState::MovingSelection { .. } | DrawingState::DraggingText { .. }) => {
                self.finish_move(state);
            }
            state @ DrawingState::TextInput(_) => self.state = state,
            DrawingState::Idle => {}
        }
        self.needs_redraw = true;
        self.sync_fade_timer();
    }

    fn begin_drawing(&mut self, tool: Tool, point: Point) {
        let Some(kind) = tool.object_kind() else {
            return;
        };
        let style = self.style(tool);
        let now = self.now();

        if let Some(slot) = self.scene.in_progress.stroke_mut(kind) {
            let mut stroke = Stroke::new(style.color, style.thickness);
            stroke.points.push(TimedPoint::new(point, now));
            *slot = Some(stroke);
        } else if let Some(slot) = self.scene.in_progress.shape_mut(kind) {
            *slot = Some(ShapeRecord::new(point, point, style.color, style.thickness));
        }

        let center_mode =
            self.modifiers.alt && matches!(tool, Tool::Rectangle | Tool::Circle);
        log::debug!("Started {tool:?} at ({:.1}, {:.1})", point.x, point.y);
        self.state = DrawingState::Drawing {
            tool,
            anchor: point,
            center_mode,
        };
    }

    fn update_drawing(&mut self, tool: Tool, anchor: Point, center_mode: bool, point: Point) {
        let Some(kind) = tool.object_kind() else {
            return;
        };
        let constrain = self.modifiers.shift;
        let now = self.now();

        if let Some(Some(stroke)) = self.scene.in_progress.stroke_mut(kind) {
            if constrain {
                // Straight two-point segment from the first sample.
                let start = stroke.points.first().map_or(anchor, |p| p.point);
                stroke.points.truncate(1);
                let end = util::snap_to_45_degrees(start, point);
                stroke.points.push(TimedPoint::new(end, now));
            } else {
                stroke.points.push(TimedPoint::new(point, now));
            }
            self.needs_redraw = true;
            return;
        }

        let Some(Some(shape)) = self.scene.in_progress.shape_mut(kind) else {
            return;
        };
        match tool {
            Tool::Arrow | Tool::Line => {
                shape.end = if constrain {
                    util::snap_to_45_degrees(anchor, point)
                } else {
                    point
                };
            }
            Tool::Rectangle | Tool::Circle => {
                let alt = self.modifiers.alt;
                let mut anchor = anchor;
                if alt != center_mode {
                    anchor = if alt {
                        shape.bounding_box().center()
                    } else {
                        shape.start
                    };
                    self.state = DrawingState::Drawing {
                        tool,
                        anchor,
                        center_mode: alt,
                    };
                }
                shape.start = if alt {
                    Point::new(2.0 * anchor.x - point.x, 2.0 * anchor.y - point.y)
                } else {
                    anchor
                };
                shape.end = point;
            }
            _ => {}
        }
        self.needs_redraw = true;
    }

    fn finish_drawing(&mut self, tool: Tool) {
        let Some(kind) = tool.object_kind() else {
            return;
        };
        let Some(mut object) = self.scene.in_progress.take(kind) else {
            return;
        };
        self.scene.mark_dirty();

        match &mut object {
            SceneObject::Pen(stroke) | SceneObject::Highlighter(stroke) => {
                if stroke.points.is_empty() {
                    return;
                }
            }
            SceneObject::Arrow(shape)
            | SceneObject::Line(shape)
            | SceneObject::Rectangle(shape)
            | SceneObject::Circle(shape) => {
                if shape.is_degenerate() {
                    log::debug!("Discarded zero-size {kind:?}");
                    return;
                }
                shape.creation_time = Some(self.now());
            }
            SceneObject::Text(_) | SceneObject::Counter(_) => {}
        }
        self.history.perform(&mut self.scene, Command::Insert(object));
    }

    fn place_counter(&mut self, point: Point) {
        let counter = CounterAnnotation {
            number: self.scene.next_counter_number(),
            position: point,
            color: self.style(Tool::Counter).color,
            creation_time: Some(self.now()),
            order: 0,
        };
        log::debug!("Placing counter {}", counter.number);
        self.history
            .perform(&mut self.scene, Command::Insert(SceneObject::Counter(counter)));
        self.sync_fade_timer();
    }

    fn text_pointer_down(&mut self, point: Point, click_count: u32) {
        match selection::find_text_at(&self.scene, point) {
            Some(index) => {
                let Some(text) = self.scene.collections().texts.get(index) else {
                    return;
                };
                if click_count >= 2 {
                    log::debug!("Editing text {index}");
                    self.state = DrawingState::TextInput(TextEditSession::editing(index, text));
                    self.scene.mark_dirty();
                } else {
                    self.state = DrawingState::DraggingText {
                        index,
                        grab: (text.position.x - point.x, text.position.y - point.y),
                        original: text.position,
                    };
                }
            }
            None => {
                let color = self.style(Tool::Text).color;
                self.state = DrawingState::TextInput(TextEditSession::new(
                    point,
                    color,
                    self.current_font_size,
                ));
            }
        }
    }

    fn select_pointer_down(&mut self, point: Point) {
        match selection::find_object_at(&self.scene, point, self.hit_tolerance) {
            Some(hit) => {
                if !self.scene.selection().contains(&hit) {
                    if self.modifiers.shift {
                        let mut extended = self.scene.selection().clone();
                        extended.insert(hit);
                        self.scene.set_selection(extended);
                    } else {
                        self.scene.set_selection([hit]);
                    }
                }
                self.state = DrawingState::MovingSelection {
                    last: point,
                    dx: 0.0,
                    dy: 0.0,
                };
            }
            None => {
                let extend = self.modifiers.shift;
                if !extend {
                    self.scene.clear_selection();
                }
                self.state = DrawingState::Selecting {
                    origin: point,
                    current: point,
                    extend,
                };
            }
        }
    }

    /// Logs a drag that was applied to the scene live.
    pub(super) fn finish_move(&mut self, state: DrawingState) {
        match state {
            DrawingState::MovingSelection { dx, dy, .. } if dx != 0.0 || dy != 0.0 => {
                let targets = selection::selected_targets(&self.scene);
                if targets.is_empty() {
                    return;
                }
                self.history.record(Command::Translate {
                    targets,
                    dx: -dx,
                    dy: -dy,
                });
            }
            DrawingState::DraggingText {
                index, original, ..
            } => {
                let Some(current) = self
                    .scene
                    .collections()
                    .texts
                    .get(index)
                    .map(|text| text.position)
                else {
                    return;
                };
                if current != original {
                    self.history.record(Command::MoveText {
                        index,
                        from: current,
                        to: original,
                    });
                }
            }
            _ => {}
        }
    }
}
