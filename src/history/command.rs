//! Reversible scene mutations.

use crate::draw::{Collections, ObjectKind, ObjectRef, Scene, SceneObject, TextAnnotation};
use crate::error::SceneError;
use crate::util::Point;

/// One semantic mutation of the scene.
///
/// Applying a command returns its exact inverse, so the log only ever stores
/// ready-to-run commands. Objects are addressed by kind plus draw-order stamp
/// where positions may shift between recording and replay; text moves and
/// edits use the text index directly since text never fades.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Append an object at the tail of its collection
    Insert(SceneObject),
    /// Remove the object of `kind` carrying draw-order stamp `order`
    Remove { kind: ObjectKind, order: u64 },
    /// Move the text at `index` from `from` to `to`
    MoveText { index: usize, from: Point, to: Point },
    /// Replace the text at `index` wholesale
    ReplaceText { index: usize, text: TextAnnotation },
    /// Shift every target by `(dx, dy)`
    Translate {
        targets: Vec<(ObjectKind, u64)>,
        dx: f64,
        dy: f64,
    },
    /// Empty every collection
    ClearAll,
    /// Put back collections captured by a clear-all
    RestoreAll(Collections),
}

impl Command {
    /// Performs the mutation and returns the command that undoes it.
    ///
    /// Fails with [`SceneError::EmptyCollection`] when the target no longer
    /// exists (for instance it faded out) or a clear-all finds nothing to
    /// clear; the scene is left unchanged in that case.
    pub fn apply(&self, scene: &mut Scene) -> Result<Command, SceneError> {
        match self {
            Command::Insert(object) => {
                let reference = scene.append(object.clone());
                let order = scene
                    .view(reference)
                    .map(|view| view.order())
                    .unwrap_or_default();
                Ok(Command::Remove {
                    kind: reference.kind,
                    order,
                })
            }
            Command::Remove { kind, order } => {
                let index = scene
                    .index_of_order(*kind, *order)
                    .ok_or(SceneError::EmptyCollection(*kind))?;
                let removed = scene.remove_at(*kind, index)?;
                Ok(Command::Insert(removed))
            }
            Command::MoveText { index, from, to } => {
                scene.set_text_position(*index, *to)?;
                Ok(Command::MoveText {
                    index: *index,
                    from: *to,
                    to: *from,
                })
            }
            Command::ReplaceText { index, text } => {
                let previous = scene.replace_text(*index, text.clone())?;
                Ok(Command::ReplaceText {
                    index: *index,
                    text: previous,
                })
            }
            Command::Translate { targets, dx, dy } => {
                let resolved: Vec<ObjectRef> = targets
                    .iter()
                    .filter_map(|(kind, order)| {
                        scene
                            .index_of_order(*kind, *order)
                            .map(|index| ObjectRef::new(*kind, index))
                    })
                    .collect();
                if resolved.is_empty() {
                    let kind = targets.first().map_or(ObjectKind::Pen, |(kind, _)| *kind);
                    return Err(SceneError::EmptyCollection(kind));
                }
                for reference in resolved {
                    scene.translate(reference, *dx, *dy)?;
                }
                Ok(Command::Translate {
                    targets: targets.clone(),
                    dx: -dx,
                    dy: -dy,
                })
            }
            Command::ClearAll => {
                let snapshot = scene
                    .clear_all()
                    .ok_or(SceneError::EmptyCollection(ObjectKind::Pen))?;
                Ok(Command::RestoreAll(snapshot))
            }
            Command::RestoreAll(snapshot) => {
                scene.restore_all(snapshot.clone());
                Ok(Command::ClearAll)
            }
        }
    }

    /// Short label for menus and logs.
    pub fn description(&self) -> String {
        match self {
            Command::Insert(object) => format!("Add {:?}", object.kind()),
            Command::Remove { kind, .. } => format!("Delete {kind:?}"),
            Command::MoveText { .. } => "Move Text".to_string(),
            Command::ReplaceText { .. } => "Edit Text".to_string(),
            Command::Translate { targets, .. } => format!("Move {} Objects", targets.len()),
            Command::ClearAll => "Clear All".to_string(),
            Command::RestoreAll(snapshot) => format!("Restore {} Objects", snapshot.total()),
        }
    }
}
