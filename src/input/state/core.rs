//! Drawing state machine and input state management.

use super::text::TextEditSession;
use crate::clock::{Clock, MonotonicClock};
use crate::config::{Action, Config, KeyBinding, KeybindingsConfig, RegionPolicy};
use crate::draw::{Color, ObjectKind, ObjectRef, Scene};
use crate::error::{SceneError, contract_violation};
use crate::fade::{self, FadePolicy, FadeTimer, TimerTransition};
use crate::history::CommandLog;
use crate::input::{modifiers::Modifiers, tool::Tool};
use crate::selection::DEFAULT_HIT_TOLERANCE;
use crate::util::Point;
use std::collections::HashMap;
use std::time::Duration;

/// Current gesture state machine.
///
/// Tracks whether the user is idle, dragging out a new object, selecting,
/// moving objects, or typing text. State transitions occur on pointer and
/// keyboard events.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingState {
    /// Not in a gesture - waiting for user input
    Idle,
    /// Dragging out a new stroke or shape (partial object lives in the scene's in-progress slot)
    Drawing {
        /// Which tool is being used for this object
        tool: Tool,
        /// Fixed point the shape grows from (center in center mode)
        anchor: Point,
        /// Whether the shape is drawn symmetrically around `anchor`
        center_mode: bool,
    },
    /// Rubber-band selection from `origin` to `current`
    Selecting {
        origin: Point,
        current: Point,
        /// Shift was held at press: hits join the existing selection
        extend: bool,
    },
    /// Dragging the current selection
    MovingSelection {
        last: Point,
        /// Accumulated delta since pointer-down
        dx: f64,
        dy: f64,
    },
    /// Dragging one text annotation with the text tool
    DraggingText {
        index: usize,
        /// Offset from the pointer to the text's top-left corner
        grab: (f64, f64),
        original: Point,
    },
    /// Text input mode - user is typing a new or existing annotation
    TextInput(TextEditSession),
}

/// Color and width remembered per tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolStyle {
    pub color: Color,
    pub thickness: f64,
}

/// Interaction controller owning the scene, its history and tool settings.
///
/// The host feeds pointer and key events in and pulls a [`Frame`](crate::draw::Frame)
/// out on every tick. Nothing here returns an error to the host: failed scene
/// operations are logged and ignored.
pub struct InputState {
    /// All finalized and in-progress objects
    pub scene: Scene,
    /// Undo/redo history
    pub history: CommandLog,
    /// Current gesture state machine
    pub state: DrawingState,
    /// Current modifier key state
    pub modifiers: Modifiers,
    /// Current font size for new text
    pub current_font_size: f64,
    /// Extra slack for proximity hit-testing
    pub hit_tolerance: f64,
    /// How rubber-band selection matches objects
    pub region_policy: RegionPolicy,
    /// Whether the display needs to be redrawn
    pub needs_redraw: bool,
    pub(crate) tool: Tool,
    styles: HashMap<Tool, ToolStyle>,
    /// Keybinding action map for efficient lookup
    action_map: HashMap<KeyBinding, Action>,
    clock: Box<dyn Clock>,
    fade_timer: FadeTimer,
    /// Timer change not yet collected by the host
    pending_timer_transition: Option<TimerTransition>,
}

impl InputState {
    /// Creates an InputState with explicit settings.
    ///
    /// Tools missing from `styles` start with red at width 3.
    pub fn with_defaults(
        tool: Tool,
        styles: HashMap<Tool, ToolStyle>,
        font_size: f64,
        action_map: HashMap<KeyBinding, Action>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            scene: Scene::new(),
            history: CommandLog::new(),
            state: DrawingState::Idle,
            modifiers: Modifiers::new(),
            current_font_size: font_size,
            hit_tolerance: DEFAULT_HIT_TOLERANCE,
            region_policy: RegionPolicy::default(),
            needs_redraw: true,
            tool,
            styles,
            action_map,
            clock,
            fade_timer: FadeTimer::default(),
            pending_timer_transition: None,
        }
    }

    /// Builds the controller from a loaded configuration.
    ///
    /// Invalid keybindings are logged and replaced by the defaults.
    pub fn from_config(config: &Config, clock: Box<dyn Clock>) -> Self {
        let action_map = config.keybindings.build_action_map().unwrap_or_else(|err| {
            log::error!("Invalid keybindings: {err}; falling back to defaults");
            KeybindingsConfig::default()
                .build_action_map()
                .unwrap_or_default()
        });

        let styles = Tool::ALL
            .into_iter()
            .map(|tool| {
                let (color, thickness) = config.tool_style(tool);
                (tool, ToolStyle { color, thickness })
            })
            .collect();

        let mut state = Self::with_defaults(
            config.drawing.default_tool,
            styles,
            config.drawing.default_font_size,
            action_map,
            clock,
        );
        state.hit_tolerance = config.selection.hit_tolerance;
        state.region_policy = config.selection.region_policy;
        state.fade_timer = FadeTimer::new(config.frame_interval());
        state.scene.fade = FadePolicy {
            enabled: config.fade.enabled,
            duration: config.fade.duration_seconds,
        };
        state
    }

    /// Controller with default configuration and the monotonic clock.
    pub fn new() -> Self {
        Self::from_config(&Config::default(), Box::new(MonotonicClock::new()))
    }

    /// Current clock reading in seconds.
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    // ------------------------------------------------------------------
    // Tool and style setters
    // ------------------------------------------------------------------

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switches the active tool.
    ///
    /// Commits any text being typed, abandons an unfinished drawing, and
    /// clears the selection when leaving the selection tool.
    pub fn set_tool(&mut self, tool: Tool) {
        if tool == self.tool {
            return;
        }
        self.settle_gesture();
        if self.tool == Tool::Select {
            self.scene.clear_selection();
        }
        log::info!("Tool changed from {:?} to {:?}", self.tool, tool);
        self.tool = tool;
        self.needs_redraw = true;
    }

    /// Remembered style of `tool`.
    pub fn style(&self, tool: Tool) -> ToolStyle {
        self.styles.get(&tool).copied().unwrap_or(ToolStyle {
            color: crate::draw::color::RED,
            thickness: 3.0,
        })
    }

    /// Color used by the active tool.
    pub fn current_color(&self) -> Color {
        self.style(self.tool).color
    }

    /// Line width used by the active tool.
    pub fn current_thickness(&self) -> f64 {
        self.style(self.tool).thickness
    }

    /// Sets the active tool's color. Existing objects keep theirs.
    pub fn set_color(&mut self, color: Color) {
        let mut style = self.style(self.tool);
        style.color = color;
        self.styles.insert(self.tool, style);
        self.needs_redraw = true;
    }

    /// Sets the active tool's line width, clamped to 1.0-40.0.
    pub fn set_line_width(&mut self, width: f64) {
        if !width.is_finite() {
            log::warn!("Ignoring line width {width}");
            return;
        }
        let mut style = self.style(self.tool);
        style.thickness = width.clamp(1.0, 40.0);
        self.styles.insert(self.tool, style);
        self.needs_redraw = true;
        log::debug!("{:?} width set to {:.1}", self.tool, style.thickness);
    }

    /// Sets the font size for new text, clamped to 8.0-72.0.
    pub fn set_font_size(&mut self, size: f64) {
        if !size.is_finite() {
            log::warn!("Ignoring font size {size}");
            return;
        }
        self.current_font_size = size.clamp(8.0, 72.0);
        if let DrawingState::TextInput(session) = &mut self.state {
            session.font_size = self.current_font_size;
        }
        self.needs_redraw = true;
    }

    /// Adjusts the current font size by a delta, clamping to valid range.
    ///
    /// Font size is clamped to 8.0-72.0px range (same as config validation).
    pub fn adjust_font_size(&mut self, delta: f64) {
        self.set_font_size(self.current_font_size + delta);
        log::debug!("Font size adjusted to {:.1}px", self.current_font_size);
    }

    /// Turns fade mode on or off.
    pub fn set_fade_mode(&mut self, enabled: bool) {
        if self.scene.fade.enabled == enabled {
            return;
        }
        self.scene.fade.enabled = enabled;
        self.scene.mark_dirty();
        self.needs_redraw = true;
        log::info!("Fade mode {}", if enabled { "enabled" } else { "disabled" });
        self.sync_fade_timer();
    }

    /// Sets how long faded objects live, in seconds.
    pub fn set_fade_duration(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            log::warn!("Ignoring fade duration {seconds}");
            return;
        }
        self.scene.fade.duration = seconds.clamp(0.25, 30.0);
        self.needs_redraw = true;
    }

    // ------------------------------------------------------------------
    // Fade timer
    // ------------------------------------------------------------------

    /// True when fade mode is on and some object will still change.
    pub fn is_anything_fading(&self) -> bool {
        fade::is_anything_fading(&self.scene)
    }

    /// Tick interval the host should use while the fade timer is active.
    pub fn frame_interval(&self) -> Duration {
        self.fade_timer.interval()
    }

    /// Reconciles the fade timer with the scene, remembering any change for the host.
    pub(crate) fn sync_fade_timer(&mut self) {
        let transition = self.fade_timer.sync(self.is_anything_fading());
        if transition != TimerTransition::Unchanged {
            self.pending_timer_transition = Some(transition);
        }
    }

    /// Takes and clears the pending timer start/stop request.
    pub fn take_timer_transition(&mut self) -> Option<TimerTransition> {
        self.pending_timer_transition.take()
    }

    // ------------------------------------------------------------------
    // Shared helpers
    // ------------------------------------------------------------------

    /// Look up an action for the given key and current modifiers.
    pub(super) fn find_action(&self, key_str: &str) -> Option<Action> {
        self.action_map
            .iter()
            .find(|(binding, _)| {
                binding.matches(
                    key_str,
                    self.modifiers.ctrl,
                    self.modifiers.shift,
                    self.modifiers.alt,
                )
            })
            .map(|(_, action)| *action)
    }

    /// Brings any gesture in flight to a clean end.
    ///
    /// Text sessions commit, drags already applied to the scene are logged,
    /// unfinished drawings and rubber bands are dropped.
    pub(crate) fn settle_gesture(&mut self) {
        match std::mem::replace(&mut self.state, DrawingState::Idle) {
            DrawingState::Idle => {}
            DrawingState::TextInput(session) => self.commit_text(session),
            DrawingState::Drawing { .. } => {
                self.scene.in_progress.clear();
                self.scene.mark_dirty();
            }
            DrawingState::Selecting { .. } => self.scene.mark_dirty(),
            state @ (DrawingState::MovingSelection { .. } | DrawingState::DraggingText { .. }) => {
                self.finish_move(state);
            }
        }
        self.needs_redraw = true;
    }

    /// Removes the most recent object the active tool would have created.
    pub(super) fn delete_last(&mut self) {
        let Some(kind) = self.tool.object_kind() else {
            log::debug!("Delete-last ignored for the selection tool");
            return;
        };
        match self.scene.remove_last(kind) {
            Ok(removed) => {
                self.history
                    .record(crate::history::Command::Insert(removed));
                self.needs_redraw = true;
            }
            Err(err) => report(&err),
        }
    }

    /// Reference to the text hidden while it is edited in place.
    pub(crate) fn editing_text_ref(&self) -> Option<ObjectRef> {
        match &self.state {
            DrawingState::TextInput(TextEditSession {
                editing: Some(index),
                ..
            }) => Some(ObjectRef::new(ObjectKind::Text, *index)),
            _ => None,
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns a scene failure into a log line (or a debug assertion).
pub(crate) fn report(err: &SceneError) {
    match err {
        SceneError::EmptyCollection(_) => log::debug!("Ignored: {err}"),
        SceneError::IndexOutOfRange { .. } => contract_violation(err),
    }
}
