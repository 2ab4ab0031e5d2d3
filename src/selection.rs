//! Hit-testing and selection editing.
//!
//! Point queries walk objects from the top of the z-order down and return the
//! first whose outline lies under the pointer. Rectangles and circles only
//! react near their outline; clicking inside an empty frame selects whatever
//! lies underneath. Region queries compare bounding boxes.

use crate::draw::{
    COUNTER_RADIUS, ObjectKind, ObjectRef, ObjectView, Scene, ShapeRecord, Stroke, TextMetrics,
};
use crate::history::{Command, CommandLog};
use crate::util::{Point, Rect, distance_to_segment};

pub use crate::config::RegionPolicy;

/// Slack added to half the line width for proximity hits.
pub const DEFAULT_HIT_TOLERANCE: f64 = 3.0;

/// Padding around the union of selected bounds.
pub const SELECTION_PADDING: f64 = 5.0;

/// Returns true when `point` touches the object described by `view`.
pub fn hits(
    kind: ObjectKind,
    view: ObjectView<'_>,
    point: Point,
    tolerance: f64,
    metrics: &dyn TextMetrics,
) -> bool {
    match view {
        ObjectView::Stroke(stroke) => stroke_hit(stroke, point, tolerance),
        ObjectView::Shape(shape) => {
            let reach = shape.line_width / 2.0 + tolerance;
            match kind {
                ObjectKind::Rectangle => rectangle_edge_distance(shape, point) <= reach,
                ObjectKind::Circle => ellipse_edge_distance(shape, point) <= reach,
                _ => distance_to_segment(point, shape.start, shape.end) <= reach,
            }
        }
        ObjectView::Text(_) => view
            .bounding_box(metrics)
            .is_some_and(|bounds| bounds.contains_point(point)),
        ObjectView::Counter(counter) => point.distance_to(counter.position) <= COUNTER_RADIUS,
    }
}

fn stroke_hit(stroke: &Stroke, point: Point, tolerance: f64) -> bool {
    let reach = stroke.line_width / 2.0 + tolerance;
    match stroke.points.as_slice() {
        [] => false,
        [only] => point.distance_to(only.point) <= reach,
        samples => samples
            .windows(2)
            .any(|pair| distance_to_segment(point, pair[0].point, pair[1].point) <= reach),
    }
}

fn rectangle_edge_distance(shape: &ShapeRecord, point: Point) -> f64 {
    let r = shape.bounding_box();
    let corners = [
        Point::new(r.x, r.y),
        Point::new(r.max_x(), r.y),
        Point::new(r.max_x(), r.max_y()),
        Point::new(r.x, r.max_y()),
    ];
    (0..4)
        .map(|i| distance_to_segment(point, corners[i], corners[(i + 1) % 4]))
        .fold(f64::INFINITY, f64::min)
}

/// Radial distance from `point` to the ellipse inscribed in the shape's box.
fn ellipse_edge_distance(shape: &ShapeRecord, point: Point) -> f64 {
    let bounds = shape.bounding_box();
    let a = bounds.width / 2.0;
    let b = bounds.height / 2.0;
    if a < f64::EPSILON || b < f64::EPSILON {
        // Flattened ellipse degenerates to its long axis.
        return distance_to_segment(point, shape.start, shape.end);
    }

    let center = bounds.center();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    let distance = dx.hypot(dy);
    if distance < f64::EPSILON {
        return a.min(b);
    }

    let (cos, sin) = (dx / distance, dy / distance);
    let radius = a * b / ((b * cos).powi(2) + (a * sin).powi(2)).sqrt();
    (distance - radius).abs()
}

/// Topmost object under `point`, or `None`.
pub fn find_object_at(scene: &Scene, point: Point, tolerance: f64) -> Option<ObjectRef> {
    scene
        .collections()
        .refs_in_draw_order()
        .into_iter()
        .rev()
        .find(|reference| {
            scene.view(*reference).is_some_and(|view| {
                hits(reference.kind, view, point, tolerance, scene.metrics())
            })
        })
}

/// Topmost text annotation whose box contains `point`, ignoring other kinds.
pub fn find_text_at(scene: &Scene, point: Point) -> Option<usize> {
    let texts = &scene.collections().texts;
    (0..texts.len())
        .filter(|&index| {
            scene
                .bounding_box(ObjectRef::new(ObjectKind::Text, index))
                .is_some_and(|bounds| bounds.contains_point(point))
        })
        .max_by_key(|&index| texts[index].order)
}

/// Every object whose bounds match `region` under `policy`.
pub fn find_objects_in_rect(scene: &Scene, region: Rect, policy: RegionPolicy) -> Vec<ObjectRef> {
    scene
        .collections()
        .refs()
        .filter(|reference| {
            scene
                .bounding_box(*reference)
                .is_some_and(|bounds| match policy {
                    RegionPolicy::Intersects => region.intersects(&bounds),
                    RegionPolicy::Contains => region.contains_rect(&bounds),
                })
        })
        .collect()
}

/// Padded union of the selected objects' bounds, or [`Rect::ZERO`] when
/// nothing is selected.
pub fn selection_bounding_box(scene: &Scene) -> Rect {
    scene
        .selection()
        .iter()
        .filter_map(|reference| scene.bounding_box(*reference))
        .reduce(|acc, bounds| acc.union(&bounds))
        .map_or(Rect::ZERO, |union| union.inflate(SELECTION_PADDING))
}

/// Selects every finalized object, replacing the prior selection.
pub fn select_all(scene: &mut Scene) {
    let all: Vec<ObjectRef> = scene.collections().refs().collect();
    log::debug!("Selected all {} objects", all.len());
    scene.set_selection(all);
}

/// Kind and draw-order stamp of every selected object.
///
/// Stamps survive index shifts, so they name the targets of a logged move.
pub fn selected_targets(scene: &Scene) -> Vec<(ObjectKind, u64)> {
    scene
        .selection()
        .iter()
        .filter_map(|reference| {
            scene
                .view(*reference)
                .map(|view| (reference.kind, view.order()))
        })
        .collect()
}

/// Shifts every selected object by `(dx, dy)`. Not logged.
///
/// Returns false on an empty selection.
pub fn move_selected(scene: &mut Scene, dx: f64, dy: f64) -> bool {
    let targets: Vec<ObjectRef> = scene.selection().iter().copied().collect();
    if targets.is_empty() {
        return false;
    }
    for reference in targets {
        if let Err(err) = scene.translate(reference, dx, dy) {
            crate::error::contract_violation(&err);
        }
    }
    true
}

/// Removes every selected object, logging one undo entry per object.
///
/// Objects are removed in descending index order within each kind so earlier
/// indices stay valid. Returns the number removed.
pub fn delete_selected(scene: &mut Scene, log: &mut CommandLog) -> usize {
    let targets: Vec<ObjectRef> = scene.selection().iter().rev().copied().collect();
    let mut removed = 0;
    for reference in targets {
        let Some(order) = scene.view(reference).map(|view| view.order()) else {
            continue;
        };
        let command = Command::Remove {
            kind: reference.kind,
            order,
        };
        if log.perform(scene, command) {
            removed += 1;
        }
    }
    scene.clear_selection();
    if removed > 0 {
        log::info!("Deleted {removed} selected objects");
    }
    removed
}
