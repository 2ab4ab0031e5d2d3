//! Scene container for all finalized and in-progress annotation objects.

use super::dirty::DirtyTracker;
use super::font::{ApproximateMetrics, TextMetrics};
use super::shape::{
    CounterAnnotation, ObjectKind, ObjectView, SceneObject, ShapeRecord, Stroke, TextAnnotation,
};
use crate::error::SceneError;
use crate::fade::FadePolicy;
use crate::util::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Positional handle to one scene object: `(kind, index)` into its collection.
///
/// Only a lookup key. Indices shift when earlier objects of the same kind are
/// removed; [`Scene`] remaps its own selection, other holders must re-resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectRef {
    pub kind: ObjectKind,
    pub index: usize,
}

impl ObjectRef {
    pub fn new(kind: ObjectKind, index: usize) -> Self {
        Self { kind, index }
    }
}

/// Per-kind ordered collections of finalized objects.
///
/// Within a collection, later entries were drawn later. The same type doubles
/// as the snapshot captured by a clear-all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collections {
    pub pens: Vec<Stroke>,
    pub highlighters: Vec<Stroke>,
    pub arrows: Vec<ShapeRecord>,
    pub lines: Vec<ShapeRecord>,
    pub rectangles: Vec<ShapeRecord>,
    pub circles: Vec<ShapeRecord>,
    pub texts: Vec<TextAnnotation>,
    pub counters: Vec<CounterAnnotation>,
}

impl Collections {
    pub fn len(&self, kind: ObjectKind) -> usize {
        match kind {
            ObjectKind::Pen => self.pens.len(),
            ObjectKind::Highlighter => self.highlighters.len(),
            ObjectKind::Arrow => self.arrows.len(),
            ObjectKind::Line => self.lines.len(),
            ObjectKind::Rectangle => self.rectangles.len(),
            ObjectKind::Circle => self.circles.len(),
            ObjectKind::Text => self.texts.len(),
            ObjectKind::Counter => self.counters.len(),
        }
    }

    /// Returns true when every collection is empty.
    pub fn is_empty(&self) -> bool {
        ObjectKind::ALL.iter().all(|kind| self.len(*kind) == 0)
    }

    /// Total number of objects across all kinds.
    pub fn total(&self) -> usize {
        ObjectKind::ALL.iter().map(|kind| self.len(*kind)).sum()
    }

    pub fn view(&self, object: ObjectRef) -> Option<ObjectView<'_>> {
        let index = object.index;
        match object.kind {
            ObjectKind::Pen => self.pens.get(index).map(ObjectView::Stroke),
            ObjectKind::Highlighter => self.highlighters.get(index).map(ObjectView::Stroke),
            ObjectKind::Arrow => self.arrows.get(index).map(ObjectView::Shape),
            ObjectKind::Line => self.lines.get(index).map(ObjectView::Shape),
            ObjectKind::Rectangle => self.rectangles.get(index).map(ObjectView::Shape),
            ObjectKind::Circle => self.circles.get(index).map(ObjectView::Shape),
            ObjectKind::Text => self.texts.get(index).map(ObjectView::Text),
            ObjectKind::Counter => self.counters.get(index).map(ObjectView::Counter),
        }
    }

    /// Owned copy of the referenced object.
    pub fn get(&self, object: ObjectRef) -> Option<SceneObject> {
        let index = object.index;
        Some(match object.kind {
            ObjectKind::Pen => SceneObject::Pen(self.pens.get(index)?.clone()),
            ObjectKind::Highlighter => {
                SceneObject::Highlighter(self.highlighters.get(index)?.clone())
            }
            ObjectKind::Arrow => SceneObject::Arrow(self.arrows.get(index)?.clone()),
            ObjectKind::Line => SceneObject::Line(self.lines.get(index)?.clone()),
            ObjectKind::Rectangle => SceneObject::Rectangle(self.rectangles.get(index)?.clone()),
            ObjectKind::Circle => SceneObject::Circle(self.circles.get(index)?.clone()),
            ObjectKind::Text => SceneObject::Text(self.texts.get(index)?.clone()),
            ObjectKind::Counter => SceneObject::Counter(self.counters.get(index)?.clone()),
        })
    }

    /// Every reference, grouped by kind, in collection order.
    pub fn refs(&self) -> impl Iterator<Item = ObjectRef> + '_ {
        ObjectKind::ALL
            .into_iter()
            .flat_map(move |kind| (0..self.len(kind)).map(move |index| ObjectRef::new(kind, index)))
    }

    /// Every reference sorted by draw order, bottom-most first.
    pub fn refs_in_draw_order(&self) -> Vec<ObjectRef> {
        let mut refs: Vec<(u64, ObjectRef)> = self
            .refs()
            .filter_map(|r| self.view(r).map(|view| (view.order(), r)))
            .collect();
        refs.sort_by_key(|(order, _)| *order);
        refs.into_iter().map(|(_, r)| r).collect()
    }

    /// Inserts by draw-order stamp so a restored object returns to its old slot.
    fn insert(&mut self, object: SceneObject) -> ObjectRef {
        fn place<T>(items: &mut Vec<T>, item: T, order: u64, stamp: impl Fn(&T) -> u64) -> usize {
            let index = items.partition_point(|existing| stamp(existing) < order);
            items.insert(index, item);
            index
        }

        let kind = object.kind();
        let order = object.order();
        let index = match object {
            SceneObject::Pen(s) => place(&mut self.pens, s, order, |s| s.order),
            SceneObject::Highlighter(s) => place(&mut self.highlighters, s, order, |s| s.order),
            SceneObject::Arrow(s) => place(&mut self.arrows, s, order, |s| s.order),
            SceneObject::Line(s) => place(&mut self.lines, s, order, |s| s.order),
            SceneObject::Rectangle(s) => place(&mut self.rectangles, s, order, |s| s.order),
            SceneObject::Circle(s) => place(&mut self.circles, s, order, |s| s.order),
            SceneObject::Text(t) => place(&mut self.texts, t, order, |t| t.order),
            SceneObject::Counter(c) => place(&mut self.counters, c, order, |c| c.order),
        };
        ObjectRef::new(kind, index)
    }

    /// Removes the entry; the caller has checked the index.
    fn take(&mut self, object: ObjectRef) -> SceneObject {
        let index = object.index;
        match object.kind {
            ObjectKind::Pen => SceneObject::Pen(self.pens.remove(index)),
            ObjectKind::Highlighter => SceneObject::Highlighter(self.highlighters.remove(index)),
            ObjectKind::Arrow => SceneObject::Arrow(self.arrows.remove(index)),
            ObjectKind::Line => SceneObject::Line(self.lines.remove(index)),
            ObjectKind::Rectangle => SceneObject::Rectangle(self.rectangles.remove(index)),
            ObjectKind::Circle => SceneObject::Circle(self.circles.remove(index)),
            ObjectKind::Text => SceneObject::Text(self.texts.remove(index)),
            ObjectKind::Counter => SceneObject::Counter(self.counters.remove(index)),
        }
    }

    fn translate(&mut self, object: ObjectRef, dx: f64, dy: f64) {
        let index = object.index;
        let shift_stroke = |stroke: &mut Stroke| {
            for sample in &mut stroke.points {
                sample.point = sample.point.offset(dx, dy);
            }
        };
        let shift_shape = |shape: &mut ShapeRecord| {
            shape.start = shape.start.offset(dx, dy);
            shape.end = shape.end.offset(dx, dy);
        };
        match object.kind {
            ObjectKind::Pen => self.pens.get_mut(index).map(shift_stroke),
            ObjectKind::Highlighter => self.highlighters.get_mut(index).map(shift_stroke),
            ObjectKind::Arrow => self.arrows.get_mut(index).map(shift_shape),
            ObjectKind::Line => self.lines.get_mut(index).map(shift_shape),
            ObjectKind::Rectangle => self.rectangles.get_mut(index).map(shift_shape),
            ObjectKind::Circle => self.circles.get_mut(index).map(shift_shape),
            ObjectKind::Text => self
                .texts
                .get_mut(index)
                .map(|t| t.position = t.position.offset(dx, dy)),
            ObjectKind::Counter => self
                .counters
                .get_mut(index)
                .map(|c| c.position = c.position.offset(dx, dy)),
        };
    }

    fn max_counter_number(&self) -> u32 {
        self.counters.iter().map(|c| c.number).max().unwrap_or(0)
    }

    fn max_order(&self) -> u64 {
        self.refs()
            .filter_map(|r| self.view(r).map(|view| view.order()))
            .max()
            .unwrap_or(0)
    }
}

/// The six single-object slots for objects still being dragged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InProgress {
    pub pen: Option<Stroke>,
    pub highlighter: Option<Stroke>,
    pub arrow: Option<ShapeRecord>,
    pub line: Option<ShapeRecord>,
    pub rectangle: Option<ShapeRecord>,
    pub circle: Option<ShapeRecord>,
}

impl InProgress {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Slot for a pen or highlighter stroke.
    pub fn stroke_mut(&mut self, kind: ObjectKind) -> Option<&mut Option<Stroke>> {
        match kind {
            ObjectKind::Pen => Some(&mut self.pen),
            ObjectKind::Highlighter => Some(&mut self.highlighter),
            _ => None,
        }
    }

    /// Slot for an arrow, line, rectangle or circle.
    pub fn shape_mut(&mut self, kind: ObjectKind) -> Option<&mut Option<ShapeRecord>> {
        match kind {
            ObjectKind::Arrow => Some(&mut self.arrow),
            ObjectKind::Line => Some(&mut self.line),
            ObjectKind::Rectangle => Some(&mut self.rectangle),
            ObjectKind::Circle => Some(&mut self.circle),
            _ => None,
        }
    }

    /// Empties the slot for `kind`, returning its object.
    pub fn take(&mut self, kind: ObjectKind) -> Option<SceneObject> {
        match kind {
            ObjectKind::Pen => self.pen.take().map(SceneObject::Pen),
            ObjectKind::Highlighter => self.highlighter.take().map(SceneObject::Highlighter),
            ObjectKind::Arrow => self.arrow.take().map(SceneObject::Arrow),
            ObjectKind::Line => self.line.take().map(SceneObject::Line),
            ObjectKind::Rectangle => self.rectangle.take().map(SceneObject::Rectangle),
            ObjectKind::Circle => self.circle.take().map(SceneObject::Circle),
            ObjectKind::Text | ObjectKind::Counter => None,
        }
    }

    /// Snapshot of every occupied slot, wrapped by kind.
    pub fn objects(&self) -> Vec<SceneObject> {
        let mut out = Vec::new();
        out.extend(self.pen.clone().map(SceneObject::Pen));
        out.extend(self.highlighter.clone().map(SceneObject::Highlighter));
        out.extend(self.arrow.clone().map(SceneObject::Arrow));
        out.extend(self.line.clone().map(SceneObject::Line));
        out.extend(self.rectangle.clone().map(SceneObject::Rectangle));
        out.extend(self.circle.clone().map(SceneObject::Circle));
        out
    }
}

/// Aggregate owner of all drawable state.
///
/// Holds the per-kind collections, in-progress slots, the current selection,
/// counter numbering and fade policy. Every mutation marks damage on the
/// internal [`DirtyTracker`] for the rendering host.
pub struct Scene {
    objects: Collections,
    /// Objects currently being drawn
    pub in_progress: InProgress,
    selected: BTreeSet<ObjectRef>,
    next_counter_number: u32,
    next_order: u64,
    /// Fade mode flag and duration
    pub fade: FadePolicy,
    dirty: DirtyTracker,
    metrics: Box<dyn TextMetrics>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates an empty scene using approximate text metrics.
    pub fn new() -> Self {
        Self::with_metrics(Box::new(ApproximateMetrics::default()))
    }

    /// Creates an empty scene measuring text with the given metrics.
    pub fn with_metrics(metrics: Box<dyn TextMetrics>) -> Self {
        Self {
            objects: Collections::default(),
            in_progress: InProgress::default(),
            selected: BTreeSet::new(),
            next_counter_number: 1,
            next_order: 1,
            fade: FadePolicy::default(),
            dirty: DirtyTracker::new(),
            metrics,
        }
    }

    /// Read-only access to the finalized collections.
    pub fn collections(&self) -> &Collections {
        &self.objects
    }

    pub(crate) fn collections_mut(&mut self) -> &mut Collections {
        &mut self.objects
    }

    pub fn metrics(&self) -> &dyn TextMetrics {
        self.metrics.as_ref()
    }

    pub fn len(&self, kind: ObjectKind) -> usize {
        self.objects.len(kind)
    }

    /// Returns true when no finalized object exists.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn view(&self, object: ObjectRef) -> Option<ObjectView<'_>> {
        self.objects.view(object)
    }

    pub fn get(&self, object: ObjectRef) -> Option<SceneObject> {
        self.objects.get(object)
    }

    /// Bounding box of a referenced object.
    pub fn bounding_box(&self, object: ObjectRef) -> Option<Rect> {
        self.view(object)?.bounding_box(self.metrics())
    }

    /// Number the next counter will receive.
    pub fn next_counter_number(&self) -> u32 {
        self.next_counter_number
    }

    pub(crate) fn set_next_counter_number(&mut self, next: u32) {
        self.next_counter_number = next.max(1);
    }

    /// Adds an object to its collection.
    ///
    /// Objects without a draw-order stamp receive a fresh one and land at the
    /// tail (top of the z-order). Restored objects keep their stamp and slot
    /// back into the position they were removed from. Restoring a counter
    /// raises the counter floor to at least `number + 1`.
    pub fn append(&mut self, mut object: SceneObject) -> ObjectRef {
        if object.order() == 0 {
            object.set_order(self.next_order);
        }
        self.next_order = self.next_order.max(object.order() + 1);

        if let SceneObject::Counter(counter) = &object {
            self.next_counter_number = self.next_counter_number.max(counter.number + 1);
        }

        self.mark_object(&object);
        let reference = self.objects.insert(object);
        self.remap_selection_after_insert(reference);
        log::debug!("Appended {:?} at index {}", reference.kind, reference.index);
        reference
    }

    /// Removes the most recently added object of `kind`.
    pub fn remove_last(&mut self, kind: ObjectKind) -> Result<SceneObject, SceneError> {
        match self.len(kind) {
            0 => Err(SceneError::EmptyCollection(kind)),
            len => self.remove_at(kind, len - 1),
        }
    }

    /// Removes the object at `index`, remapping the selection around it.
    pub fn remove_at(&mut self, kind: ObjectKind, index: usize) -> Result<SceneObject, SceneError> {
        let len = self.len(kind);
        if index >= len {
            return Err(SceneError::IndexOutOfRange { kind, index, len });
        }

        let removed = self.objects.take(ObjectRef::new(kind, index));
        self.remap_selection_after_removal(kind, index);

        if let SceneObject::Counter(_) = removed {
            let floor = self.objects.max_counter_number() + 1;
            self.next_counter_number = self.next_counter_number.saturating_sub(1).max(floor).max(1);
        }

        self.mark_object(&removed);
        Ok(removed)
    }

    /// Finds the current index of the object carrying the given draw-order stamp.
    pub fn index_of_order(&self, kind: ObjectKind, order: u64) -> Option<usize> {
        (0..self.len(kind)).find(|&index| {
            self.view(ObjectRef::new(kind, index))
                .is_some_and(|view| view.order() == order)
        })
    }

    /// Shifts one object's defining points.
    pub fn translate(&mut self, object: ObjectRef, dx: f64, dy: f64) -> Result<(), SceneError> {
        self.check_ref(object)?;
        self.mark_ref(object);
        self.objects.translate(object, dx, dy);
        self.mark_ref(object);
        Ok(())
    }

    /// Moves a text annotation, returning its previous position.
    pub fn set_text_position(&mut self, index: usize, position: Point) -> Result<Point, SceneError> {
        let object = ObjectRef::new(ObjectKind::Text, index);
        self.check_ref(object)?;
        self.mark_ref(object);
        let previous = std::mem::replace(&mut self.objects.texts[index].position, position);
        self.mark_ref(object);
        Ok(previous)
    }

    /// Replaces a text annotation in place, returning the previous value.
    pub fn replace_text(
        &mut self,
        index: usize,
        text: TextAnnotation,
    ) -> Result<TextAnnotation, SceneError> {
        let object = ObjectRef::new(ObjectKind::Text, index);
        self.check_ref(object)?;
        self.mark_ref(object);
        let previous = std::mem::replace(&mut self.objects.texts[index], text);
        self.mark_ref(object);
        Ok(previous)
    }

    /// Empties every collection and returns the snapshot.
    ///
    /// Also resets counter numbering to 1 and clears the in-progress slots
    /// and selection. Returns `None` without touching anything when the scene
    /// holds no finalized object.
    pub fn clear_all(&mut self) -> Option<Collections> {
        if self.objects.is_empty() {
            return None;
        }
        let snapshot = std::mem::take(&mut self.objects);
        self.next_counter_number = 1;
        self.in_progress.clear();
        self.selected.clear();
        self.dirty.mark_full();
        log::info!("Cleared {} objects", snapshot.total());
        Some(snapshot)
    }

    /// Replaces every collection with `snapshot` verbatim.
    ///
    /// Counter numbering becomes `max(existing counters) + 1`, or 1 without
    /// counters. Returns what the collections held before.
    pub fn restore_all(&mut self, snapshot: Collections) -> Collections {
        let previous = std::mem::replace(&mut self.objects, snapshot);
        if !previous.is_empty() {
            log::warn!(
                "Restoring snapshot over {} existing objects",
                previous.total()
            );
        }
        self.next_counter_number = self.objects.max_counter_number() + 1;
        self.next_order = self.next_order.max(self.objects.max_order() + 1);
        self.selected.clear();
        self.dirty.mark_full();
        previous
    }

    // ------------------------------------------------------------------
    // Selection storage
    // ------------------------------------------------------------------

    /// Currently selected objects, ordered by kind then index.
    pub fn selection(&self) -> &BTreeSet<ObjectRef> {
        &self.selected
    }

    /// Replaces the selection; references that do not resolve are dropped.
    pub fn set_selection(&mut self, refs: impl IntoIterator<Item = ObjectRef>) {
        let valid: BTreeSet<ObjectRef> = refs
            .into_iter()
            .filter(|r| self.view(*r).is_some())
            .collect();
        if valid != self.selected {
            self.selected = valid;
            self.dirty.mark_full();
        }
    }

    pub fn clear_selection(&mut self) {
        if !self.selected.is_empty() {
            self.selected.clear();
            self.dirty.mark_full();
        }
    }

    fn remap_selection_after_insert(&mut self, inserted: ObjectRef) {
        if self
            .selected
            .iter()
            .all(|r| r.kind != inserted.kind || r.index < inserted.index)
        {
            return;
        }
        self.selected = self
            .selected
            .iter()
            .map(|r| {
                if r.kind == inserted.kind && r.index >= inserted.index {
                    ObjectRef::new(r.kind, r.index + 1)
                } else {
                    *r
                }
            })
            .collect();
    }

    fn remap_selection_after_removal(&mut self, kind: ObjectKind, index: usize) {
        if self.selected.iter().all(|r| r.kind != kind || r.index < index) {
            return;
        }
        self.selected = self
            .selected
            .iter()
            .filter(|r| !(r.kind == kind && r.index == index))
            .map(|r| {
                if r.kind == kind && r.index > index {
                    ObjectRef::new(kind, r.index - 1)
                } else {
                    *r
                }
            })
            .collect();
    }

    // ------------------------------------------------------------------
    // Damage tracking
    // ------------------------------------------------------------------

    /// Marks the whole surface for repaint.
    pub fn mark_dirty(&mut self) {
        self.dirty.mark_full();
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.is_dirty()
    }

    /// Drains pending dirty rectangles for a surface of the given size.
    pub fn take_dirty_regions(&mut self, width: f64, height: f64) -> Vec<Rect> {
        self.dirty.take_regions(width, height)
    }

    pub(crate) fn mark_object(&mut self, object: &SceneObject) {
        let view = object.view();
        let bounds = view.bounding_box(self.metrics.as_ref());
        self.dirty.mark_bounds(bounds, view.line_width());
    }

    fn mark_ref(&mut self, object: ObjectRef) {
        if let Some(view) = self.objects.view(object) {
            let bounds = view.bounding_box(self.metrics.as_ref());
            let width = view.line_width();
            self.dirty.mark_bounds(bounds, width);
        }
    }

    fn check_ref(&self, object: ObjectRef) -> Result<(), SceneError> {
        let len = self.len(object.kind);
        if object.index < len {
            Ok(())
        } else {
            Err(SceneError::IndexOutOfRange {
                kind: object.kind,
                index: object.index,
                len,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLUE, RED};

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> SceneObject {
        SceneObject::Line(ShapeRecord {
            creation_time: Some(0.0),
            ..ShapeRecord::new(Point::new(x1, y1), Point::new(x2, y2), RED, 2.0)
        })
    }

    fn counter(number: u32) -> SceneObject {
        SceneObject::Counter(CounterAnnotation {
            number,
            position: Point::new(10.0 * number as f64, 10.0),
            color: BLUE,
            creation_time: Some(0.0),
            order: 0,
        })
    }

    #[test]
    fn append_assigns_increasing_draw_order() {
        let mut scene = Scene::new();
        let a = scene.append(line(0.0, 0.0, 1.0, 1.0));
        let b = scene.append(counter(1));
        let c = scene.append(line(2.0, 2.0, 3.0, 3.0));
        assert_eq!(a, ObjectRef::new(ObjectKind::Line, 0));
        assert_eq!(c, ObjectRef::new(ObjectKind::Line, 1));
        let orders: Vec<u64> = [a, b, c]
            .iter()
            .map(|r| scene.view(*r).unwrap().order())
            .collect();
        assert_eq!(orders, vec![1, 2, 3]);
        assert_eq!(scene.collections().refs_in_draw_order(), vec![a, b, c]);
    }

    #[test]
    fn restored_object_keeps_its_draw_order() {
        let mut scene = Scene::new();
        scene.append(line(0.0, 0.0, 1.0, 1.0));
        scene.append(line(2.0, 2.0, 3.0, 3.0));
        let removed = scene.remove_at(ObjectKind::Line, 0).unwrap();
        assert_eq!(removed.order(), 1);
        let restored = scene.append(removed);
        assert_eq!(restored, ObjectRef::new(ObjectKind::Line, 0));
        assert_eq!(scene.collections().lines[0].order, 1);
        assert_eq!(scene.collections().lines[1].order, 2);
        let bottom = scene.collections().refs_in_draw_order()[0];
        assert_eq!(bottom, ObjectRef::new(ObjectKind::Line, 0));
    }

    #[test]
    fn remove_last_on_empty_collection_reports_empty() {
        let mut scene = Scene::new();
        assert_eq!(
            scene.remove_last(ObjectKind::Arrow),
            Err(SceneError::EmptyCollection(ObjectKind::Arrow))
        );
    }

    #[test]
    fn remove_at_rejects_stale_index() {
        let mut scene = Scene::new();
        scene.append(line(0.0, 0.0, 1.0, 1.0));
        assert_eq!(
            scene.remove_at(ObjectKind::Line, 3),
            Err(SceneError::IndexOutOfRange {
                kind: ObjectKind::Line,
                index: 3,
                len: 1
            })
        );
        assert_eq!(scene.len(ObjectKind::Line), 1);
    }

    #[test]
    fn counter_numbering_follows_adds_and_removes() {
        let mut scene = Scene::new();
        for n in 1..=3 {
            assert_eq!(scene.next_counter_number(), n);
            scene.append(counter(n));
        }
        assert_eq!(scene.next_counter_number(), 4);
        scene.remove_last(ObjectKind::Counter).unwrap();
        assert_eq!(scene.next_counter_number(), 3);
    }

    #[test]
    fn removing_a_middle_counter_keeps_numbers_unique() {
        let mut scene = Scene::new();
        for n in 1..=3 {
            scene.append(counter(n));
        }
        scene.remove_at(ObjectKind::Counter, 0).unwrap();
        assert_eq!(scene.next_counter_number(), 4);
    }

    #[test]
    fn removal_remaps_selection() {
        let mut scene = Scene::new();
        for i in 0..3 {
            scene.append(line(i as f64, 0.0, i as f64 + 1.0, 1.0));
        }
        scene.append(counter(1));
        scene.set_selection([
            ObjectRef::new(ObjectKind::Line, 0),
            ObjectRef::new(ObjectKind::Line, 2),
            ObjectRef::new(ObjectKind::Counter, 0),
        ]);

        scene.remove_at(ObjectKind::Line, 0).unwrap();
        let selected: Vec<_> = scene.selection().iter().copied().collect();
        assert_eq!(
            selected,
            vec![
                ObjectRef::new(ObjectKind::Line, 1),
                ObjectRef::new(ObjectKind::Counter, 0),
            ]
        );
    }

    #[test]
    fn clear_all_snapshots_and_resets() {
        let mut scene = Scene::new();
        scene.append(line(0.0, 0.0, 5.0, 5.0));
        scene.append(counter(1));
        scene.set_selection([ObjectRef::new(ObjectKind::Line, 0)]);

        let snapshot = scene.clear_all().expect("scene had objects");
        assert_eq!(snapshot.total(), 2);
        assert!(scene.is_empty());
        assert!(scene.selection().is_empty());
        assert_eq!(scene.next_counter_number(), 1);

        scene.restore_all(snapshot);
        assert_eq!(scene.collections().total(), 2);
        assert_eq!(scene.next_counter_number(), 2);
    }

    #[test]
    fn clear_all_on_empty_scene_is_noop() {
        let mut scene = Scene::new();
        assert!(scene.clear_all().is_none());
    }

    #[test]
    fn mutations_mark_damage() {
        let mut scene = Scene::new();
        assert!(!scene.is_dirty());
        scene.append(line(0.0, 0.0, 5.0, 5.0));
        assert!(scene.is_dirty());
        assert_eq!(scene.take_dirty_regions(100.0, 100.0).len(), 1);
        scene.translate(ObjectRef::new(ObjectKind::Line, 0), 10.0, 0.0).unwrap();
        assert_eq!(scene.take_dirty_regions(100.0, 100.0).len(), 2);
    }

    #[test]
    fn index_of_order_finds_moved_entries() {
        let mut scene = Scene::new();
        scene.append(line(0.0, 0.0, 1.0, 1.0));
        scene.append(line(1.0, 1.0, 2.0, 2.0));
        scene.remove_at(ObjectKind::Line, 0).unwrap();
        assert_eq!(scene.index_of_order(ObjectKind::Line, 2), Some(0));
        assert_eq!(scene.index_of_order(ObjectKind::Line, 1), None);
    }
}
