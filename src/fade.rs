//! Time-based fade and expiry of finalized objects.
//!
//! In fade mode shapes and counters stay fully opaque for the first half of
//! the fade duration, ramp down linearly, and are pruned once their age
//! reaches the duration. Strokes fade point by point with a faster cutoff
//! (a quarter of the duration), leaving a trail behind the pen. Text never
//! fades. Pruning is not undo-logged.

use crate::draw::{ObjectKind, Scene, ShapeRecord};
use std::time::Duration;

/// Default lifetime of a faded object, in seconds.
pub const DEFAULT_FADE_DURATION: f64 = 1.25;

/// Fraction of the fade duration a stroke point survives.
pub const STROKE_TRAIL_FRACTION: f64 = 0.25;

/// Fade mode flag and duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadePolicy {
    pub enabled: bool,
    /// Seconds until a finalized object is pruned
    pub duration: f64,
}

impl Default for FadePolicy {
    fn default() -> Self {
        Self {
            enabled: false,
            duration: DEFAULT_FADE_DURATION,
        }
    }
}

impl FadePolicy {
    /// Age at which stroke points are dropped.
    pub fn stroke_cutoff(&self) -> f64 {
        self.duration * STROKE_TRAIL_FRACTION
    }

    /// Opacity for an object created at `creation_time`, or `None` once expired.
    ///
    /// Objects without a creation time, and everything when fade mode is off,
    /// are fully opaque.
    pub fn alpha(&self, creation_time: Option<f64>, now: f64) -> Option<f64> {
        match creation_time {
            Some(created) if self.enabled => crate::util::fade_alpha(now - created, self.duration),
            _ => Some(1.0),
        }
    }
}

/// Removes expired objects and stroke points from the scene.
///
/// Returns the number of whole objects pruned. Does nothing when fade mode
/// is off.
pub fn prune_expired(scene: &mut Scene, now: f64) -> usize {
    let policy = scene.fade;
    if !policy.enabled {
        return 0;
    }

    let mut pruned = 0;
    let mut trimmed_points = false;

    let cutoff = policy.stroke_cutoff();
    for kind in [ObjectKind::Pen, ObjectKind::Highlighter] {
        let strokes = match kind {
            ObjectKind::Pen => &mut scene.collections_mut().pens,
            _ => &mut scene.collections_mut().highlighters,
        };
        let mut emptied = Vec::new();
        for (index, stroke) in strokes.iter_mut().enumerate() {
            let before = stroke.points.len();
            stroke.points.retain(|sample| now - sample.timestamp < cutoff);
            trimmed_points |= stroke.points.len() != before;
            if stroke.points.is_empty() {
                emptied.push(index);
            }
        }
        pruned += remove_indices(scene, kind, emptied);
    }

    let expired = |shape: &ShapeRecord| policy.alpha(shape.creation_time, now).is_none();
    for kind in [
        ObjectKind::Arrow,
        ObjectKind::Line,
        ObjectKind::Rectangle,
        ObjectKind::Circle,
    ] {
        let collections = scene.collections();
        let shapes = match kind {
            ObjectKind::Arrow => &collections.arrows,
            ObjectKind::Line => &collections.lines,
            ObjectKind::Rectangle => &collections.rectangles,
            _ => &collections.circles,
        };
        let indices: Vec<usize> = shapes
            .iter()
            .enumerate()
            .filter(|(_, shape)| expired(shape))
            .map(|(index, _)| index)
            .collect();
        pruned += remove_indices(scene, kind, indices);
    }

    let indices: Vec<usize> = scene
        .collections()
        .counters
        .iter()
        .enumerate()
        .filter(|(_, counter)| policy.alpha(counter.creation_time, now).is_none())
        .map(|(index, _)| index)
        .collect();
    pruned += remove_counters_keeping_numbering(scene, indices);

    if trimmed_points {
        scene.mark_dirty();
    }
    if pruned > 0 {
        log::debug!("Fade pruned {pruned} expired objects");
    }
    pruned
}

/// True when fade mode is on and some finalized object will still change.
///
/// The host's timer loop stops once this returns false.
pub fn is_anything_fading(scene: &Scene) -> bool {
    if !scene.fade.enabled {
        return false;
    }
    let objects = scene.collections();
    let timed = |shape: &ShapeRecord| shape.creation_time.is_some();
    objects
        .pens
        .iter()
        .chain(&objects.highlighters)
        .any(|stroke| !stroke.points.is_empty())
        || objects
            .arrows
            .iter()
            .chain(&objects.lines)
            .chain(&objects.rectangles)
            .chain(&objects.circles)
            .any(timed)
        || objects.counters.iter().any(|c| c.creation_time.is_some())
}

fn remove_indices(scene: &mut Scene, kind: ObjectKind, mut indices: Vec<usize>) -> usize {
    indices.sort_unstable_by(|a, b| b.cmp(a));
    let mut removed = 0;
    for index in indices {
        match scene.remove_at(kind, index) {
            Ok(_) => removed += 1,
            Err(err) => crate::error::contract_violation(&err),
        }
    }
    removed
}

/// Counter expiry is not a user edit, so numbering stays where it was.
fn remove_counters_keeping_numbering(scene: &mut Scene, indices: Vec<usize>) -> usize {
    if indices.is_empty() {
        return 0;
    }
    let next = scene.next_counter_number();
    let removed = remove_indices(scene, ObjectKind::Counter, indices);
    scene.set_next_counter_number(next);
    removed
}

/// Scheduling state of the host's redraw timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Active,
}

/// What the host should do with its timer after a [`FadeTimer::sync`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTransition {
    Start,
    Stop,
    Unchanged,
}

/// Active/idle state machine for the periodic fade tick.
///
/// The timer is armed while anything is fading and disarmed as soon as
/// nothing will change anymore, so an idle overlay never wakes up.
#[derive(Debug, Clone)]
pub struct FadeTimer {
    state: TimerState,
    interval: Duration,
}

impl FadeTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            state: TimerState::Idle,
            interval,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Tick interval the host should schedule while active.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Reconciles the timer with the current fading status.
    pub fn sync(&mut self, anything_fading: bool) -> TimerTransition {
        match (self.state, anything_fading) {
            (TimerState::Idle, true) => {
                self.state = TimerState::Active;
                log::debug!("Fade timer started ({:?} interval)", self.interval);
                TimerTransition::Start
            }
            (TimerState::Active, false) => {
                self.state = TimerState::Idle;
                log::debug!("Fade timer stopped");
                TimerTransition::Stop
            }
            _ => TimerTransition::Unchanged,
        }
    }
}

impl Default for FadeTimer {
    fn default() -> Self {
        Self::new(Duration::from_millis(16))
    }
}
