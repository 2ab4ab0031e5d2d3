//! Per-frame render output handed to the painting host.

use super::scene::{ObjectRef, Scene};
use super::shape::{ObjectView, SceneObject};
use crate::util::Rect;
use serde::Serialize;

/// One object to paint, with the opacity resolved for this frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderItem {
    pub object: SceneObject,
    /// Multiplier applied on top of the object's own color alpha
    pub alpha: f64,
    /// True for objects still being drawn or edited
    pub in_progress: bool,
}

/// Everything the host needs to paint one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Frame {
    /// Items in paint order (bottom first)
    pub items: Vec<RenderItem>,
    /// Padded selection outline, when anything is selected
    pub selection_bounds: Option<Rect>,
    /// Rubber-band rectangle while a region selection is dragged
    pub marquee: Option<Rect>,
}

impl Frame {
    /// Collects finalized objects in draw order with their fade alpha.
    ///
    /// `hidden` suppresses one object (text being edited in place). Objects
    /// that would already be expired are skipped; callers prune before
    /// building so this only matters for read-only previews.
    pub fn from_scene(scene: &Scene, now: f64, hidden: Option<ObjectRef>) -> Self {
        let mut items = Vec::with_capacity(scene.collections().total());
        for reference in scene.collections().refs_in_draw_order() {
            if Some(reference) == hidden {
                continue;
            }
            let Some(view) = scene.view(reference) else {
                continue;
            };
            let creation_time = match view {
                ObjectView::Shape(shape) => shape.creation_time,
                ObjectView::Counter(counter) => counter.creation_time,
                ObjectView::Stroke(_) | ObjectView::Text(_) => None,
            };
            let Some(alpha) = scene.fade.alpha(creation_time, now) else {
                continue;
            };
            if let Some(object) = scene.get(reference) {
                items.push(RenderItem {
                    object,
                    alpha,
                    in_progress: false,
                });
            }
        }

        for object in scene.in_progress.objects() {
            items.push(RenderItem {
                object,
                alpha: 1.0,
                in_progress: true,
            });
        }

        Self {
            items,
            selection_bounds: None,
            marquee: None,
        }
    }

    /// Appends an in-progress item painted above everything else.
    pub fn push_in_progress(&mut self, object: SceneObject) {
        self.items.push(RenderItem {
            object,
            alpha: 1.0,
            in_progress: true,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::RED;
    use crate::draw::{ObjectKind, ShapeRecord, Stroke, TimedPoint};
    use crate::fade::FadePolicy;
    use crate::util::Point;

    fn line_at(created: f64) -> SceneObject {
        SceneObject::Line(ShapeRecord {
            creation_time: Some(created),
            ..ShapeRecord::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0), RED, 2.0)
        })
    }

    #[test]
    fn items_follow_draw_order_across_kinds() {
        let mut scene = Scene::new();
        scene.append(line_at(0.0));
        let mut stroke = Stroke::new(RED, 2.0);
        stroke.points.push(TimedPoint::new(Point::new(1.0, 1.0), 0.0));
        scene.append(SceneObject::Pen(stroke));
        scene.append(line_at(0.0));

        let frame = Frame::from_scene(&scene, 0.0, None);
        let kinds: Vec<ObjectKind> = frame.items.iter().map(|i| i.object.kind()).collect();
        assert_eq!(kinds, vec![ObjectKind::Line, ObjectKind::Pen, ObjectKind::Line]);
    }

    #[test]
    fn in_progress_objects_render_last_at_full_opacity() {
        let mut scene = Scene::new();
        scene.fade = FadePolicy {
            enabled: true,
            duration: 1.0,
        };
        scene.append(line_at(0.0));
        scene.in_progress.arrow = Some(ShapeRecord::new(
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
            RED,
            2.0,
        ));

        let frame = Frame::from_scene(&scene, 0.75, None);
        assert_eq!(frame.items.len(), 2);
        assert!(frame.items[0].alpha < 1.0);
        assert!(frame.items[1].in_progress);
        assert_eq!(frame.items[1].alpha, 1.0);
    }

    #[test]
    fn hidden_reference_is_skipped() {
        let mut scene = Scene::new();
        let first = scene.append(line_at(0.0));
        scene.append(line_at(0.0));
        let frame = Frame::from_scene(&scene, 0.0, Some(first));
        assert_eq!(frame.items.len(), 1);
    }
}
