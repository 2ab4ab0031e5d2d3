//! Linear undo/redo history over scene commands.

mod command;

pub use command::Command;

use crate::draw::Scene;
use crate::error::{SceneError, contract_violation};

/// Undo and redo stacks of ready-to-apply inverse commands.
///
/// Every entry is the command that reverses something already done to the
/// scene. Undo applies the top entry and parks the returned inverse on the
/// redo stack; redo mirrors that. Any fresh mutation clears the redo stack.
#[derive(Debug, Default)]
pub struct CommandLog {
    /// Inverses of performed mutations (most recent last)
    undo_stack: Vec<Command>,
    /// Inverses of undone mutations (most recent last)
    redo_stack: Vec<Command>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `command` and records its inverse.
    ///
    /// Returns false, leaving both stacks untouched, when the command had
    /// nothing to act on.
    pub fn perform(&mut self, scene: &mut Scene, command: Command) -> bool {
        match command.apply(scene) {
            Ok(inverse) => {
                log::debug!("Performed: {}", command.description());
                self.record(inverse);
                true
            }
            Err(err) => {
                report(&err, "perform");
                false
            }
        }
    }

    /// Records the inverse of a mutation the caller already applied.
    pub fn record(&mut self, inverse: Command) {
        self.redo_stack.clear();
        self.undo_stack.push(inverse);
    }

    /// Reverts the most recent mutation. No-op on an empty history.
    ///
    /// Entries whose target has vanished (for example pruned by fade) are
    /// dropped and the next one is tried, so one undo always changes the
    /// scene while anything undoable is left. Returns false otherwise.
    pub fn undo(&mut self, scene: &mut Scene) -> bool {
        while let Some(command) = self.undo_stack.pop() {
            match command.apply(scene) {
                Ok(inverse) => {
                    log::debug!("Undo: {}", command.description());
                    self.redo_stack.push(inverse);
                    return true;
                }
                Err(err) => report(&err, "undo"),
            }
        }
        false
    }

    /// Re-applies the most recently undone mutation, skipping stale entries
    /// like `undo` does. No-op when nothing was undone.
    pub fn redo(&mut self, scene: &mut Scene) -> bool {
        while let Some(command) = self.redo_stack.pop() {
            match command.apply(scene) {
                Ok(inverse) => {
                    log::debug!("Redo: {}", command.description());
                    self.undo_stack.push(inverse);
                    return true;
                }
                Err(err) => report(&err, "redo"),
            }
        }
        false
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Label of the entry the next undo would apply.
    pub fn undo_description(&self) -> Option<String> {
        self.undo_stack.last().map(Command::description)
    }

    /// Forgets all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

fn report(err: &SceneError, operation: &str) {
    match err {
        SceneError::EmptyCollection(_) => log::debug!("Skipped {operation}: {err}"),
        SceneError::IndexOutOfRange { .. } => contract_violation(err),
    }
}
