//! Scripted gesture replay.
//!
//! A replay script is a JSON document listing timestamped steps:
//!
//! ```json
//! { "steps": [
//!     { "t": 0.0, "op": "tool", "tool": "line" },
//!     { "t": 0.0, "op": "pointer_down", "x": 100, "y": 100, "modifiers": { "shift": true } },
//!     { "t": 0.1, "op": "pointer_move", "x": 150, "y": 110, "modifiers": { "shift": true } },
//!     { "t": 0.2, "op": "pointer_up", "x": 150, "y": 110 },
//!     { "t": 0.5, "op": "action", "action": "undo" }
//! ] }
//! ```
//!
//! Steps drive an [`InputState`] on a manual clock, so a script reproduces
//! exactly the same frame on every run.

use crate::clock::ManualClock;
use crate::config::{Action, ColorSpec, Config};
use crate::draw::Frame;
use crate::input::{InputState, Key, Modifiers, Tool};
use crate::util::Point;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Failures while loading a replay script.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid script: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("step {index} goes back in time ({t} < {previous})")]
    TimeReversed { index: usize, t: f64, previous: f64 },
}

/// A whole replay script.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Script {
    pub steps: Vec<Step>,
}

/// One scripted input at clock reading `t` (seconds).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub t: f64,
    #[serde(flatten)]
    pub op: Op,
}

/// Scripted inputs, mirroring the controller's host-facing calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    Tool {
        tool: Tool,
    },
    Color {
        color: ColorSpec,
    },
    Width {
        width: f64,
    },
    Fade {
        enabled: bool,
        #[serde(default)]
        duration: Option<f64>,
    },
    FontSize {
        size: f64,
    },
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
        #[serde(default = "single_click")]
        clicks: u32,
    },
    PointerMove {
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Action {
        action: Action,
    },
    KeyPress {
        key: Key,
    },
    KeyRelease {
        key: Key,
    },
    Text {
        text: String,
    },
}

fn single_click() -> u32 {
    1
}

impl Script {
    /// Parses a script and checks that step times never decrease.
    pub fn from_json(source: &str) -> Result<Self, ReplayError> {
        let script: Script = serde_json::from_str(source)?;
        let mut previous = f64::NEG_INFINITY;
        for (index, step) in script.steps.iter().enumerate() {
            if step.t < previous {
                return Err(ReplayError::TimeReversed {
                    index,
                    t: step.t,
                    previous,
                });
            }
            previous = step.t;
        }
        Ok(script)
    }

    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Time of the last step, or 0 for an empty script.
    pub fn end_time(&self) -> f64 {
        self.steps.last().map_or(0.0, |step| step.t)
    }
}

/// Snapshot of the controller after a replay.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    /// Clock reading the frame was rendered at
    pub at: f64,
    pub tool: Tool,
    pub frame: Frame,
    pub undo_depth: usize,
    pub redo_depth: usize,
    pub next_counter_number: u32,
    pub fading: bool,
}

/// Feeds `script` to a fresh controller and renders at `at`.
///
/// Steps scheduled after `at` are skipped; `at` defaults to the last step.
pub fn run(script: &Script, config: &Config, at: Option<f64>) -> ReplayReport {
    let clock = ManualClock::new(0.0);
    let mut state = InputState::from_config(config, Box::new(clock.clone()));
    let at = at.unwrap_or_else(|| script.end_time());

    for step in script.steps.iter().take_while(|step| step.t <= at) {
        clock.set(step.t);
        apply(&mut state, &step.op);
    }

    clock.set(at);
    let frame = state.render_frame(at);
    log::info!(
        "Replayed {} steps, {} items at t={at:.3}",
        script.steps.len(),
        frame.items.len()
    );
    ReplayReport {
        at,
        tool: state.tool(),
        frame,
        undo_depth: state.history.undo_len(),
        redo_depth: state.history.redo_len(),
        next_counter_number: state.scene.next_counter_number(),
        fading: state.is_anything_fading(),
    }
}

fn apply(state: &mut InputState, op: &Op) {
    log::debug!("Replay step: {op:?}");
    match op {
        Op::Tool { tool } => state.set_tool(*tool),
        Op::Color { color } => state.set_color(color.to_color()),
        Op::Width { width } => state.set_line_width(*width),
        Op::Fade { enabled, duration } => {
            if let Some(seconds) = duration {
                state.set_fade_duration(*seconds);
            }
            state.set_fade_mode(*enabled);
        }
        Op::FontSize { size } => state.set_font_size(*size),
        Op::PointerDown {
            x,
            y,
            modifiers,
            clicks,
        } => state.on_pointer_down(Point::new(*x, *y), *modifiers, *clicks),
        Op::PointerMove { x, y, modifiers } => state.on_pointer_move(Point::new(*x, *y), *modifiers),
        Op::PointerUp { x, y, modifiers } => state.on_pointer_up(Point::new(*x, *y), *modifiers),
        Op::Action { action } => state.on_key_command(*action),
        Op::KeyPress { key } => state.on_key_press(*key),
        Op::KeyRelease { key } => state.on_key_release(*key),
        Op::Text { text } => {
            if !state.type_text(text) {
                log::warn!("Ignored text step outside a text session");
            }
        }
    }
}
