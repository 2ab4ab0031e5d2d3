//! Error types shared by the scene model and command log.

use crate::draw::ObjectKind;
use thiserror::Error;

/// Failures reported by scene and command operations.
///
/// None of these cross the host boundary: the input layer turns them into
/// logged no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// Delete or undo attempted on nothing (always non-fatal).
    #[error("no {0:?} object to operate on")]
    EmptyCollection(ObjectKind),

    /// Stale positional reference; an internal invariant violation.
    #[error("{kind:?} index {index} out of range (len {len})")]
    IndexOutOfRange {
        kind: ObjectKind,
        index: usize,
        len: usize,
    },
}

/// Reports an invariant violation: panics in debug builds, logs in release.
pub(crate) fn contract_violation(err: &SceneError) {
    log::error!("Scene invariant violated: {err}");
    debug_assert!(false, "scene invariant violated: {err}");
}
