//! Polymorphic undo/redo history.
//!
//! Every user-visible mutation pushes one [`UndoItem`] describing how to
//! take it back.  Undo moves items onto the redo stack; any new mutation
//! clears the redo stack.

use tracing::warn;

use super::Scene;
use crate::entities::Entity;
use crate::styles::{RegistrySnapshot, StyleManagers};

/// One reversible step in the drawing's history
#[derive(Debug, Clone)]
pub enum UndoItem {
    /// Entities were added; they carry their assigned handles
    AddEntities { entities: Vec<Entity> },
    /// Entities were removed, each with the position it held
    RemoveEntities { entities: Vec<(usize, Entity)> },
    /// Entities were changed in place; full copies either side
    ModifyEntities {
        before: Vec<Entity>,
        after: Vec<Entity>,
    },
    /// A style registry changed; whole-registry copies either side
    Registry {
        before: RegistrySnapshot,
        after: RegistrySnapshot,
    },
}

impl UndoItem {
    /// Take the step back
    pub fn revert(&self, scene: &mut Scene, styles: &mut StyleManagers) {
        match self {
            UndoItem::AddEntities { entities } => {
                for entity in entities {
                    scene.remove_raw(entity.handle());
                }
            }
            UndoItem::RemoveEntities { entities } => {
                // ascending order restores the original positions
                let mut ordered: Vec<&(usize, Entity)> = entities.iter().collect();
                ordered.sort_by_key(|(index, _)| *index);
                for (index, entity) in ordered {
                    scene.insert_raw_at(*index, entity.clone());
                }
            }
            UndoItem::ModifyEntities { before, .. } => apply_states(scene, before),
            UndoItem::Registry { before, .. } => styles.restore(before),
        }
    }

    /// Apply the step again after a revert
    pub fn reapply(&self, scene: &mut Scene, styles: &mut StyleManagers) {
        match self {
            UndoItem::AddEntities { entities } => {
                for entity in entities {
                    scene.append_raw(entity.clone());
                }
            }
            UndoItem::RemoveEntities { entities } => {
                for (_, entity) in entities {
                    scene.remove_raw(entity.handle());
                }
            }
            UndoItem::ModifyEntities { after, .. } => apply_states(scene, after),
            UndoItem::Registry { after, .. } => styles.restore(after),
        }
    }
}

fn apply_states(scene: &mut Scene, states: &[Entity]) {
    for state in states {
        let handle = state.handle();
        match scene.entity_mut(handle) {
            Some(entity) => *entity = state.clone(),
            None => warn!(handle = %handle, "history refers to a missing entity"),
        }
    }
}

/// Two-stack undo/redo history
#[derive(Debug, Clone, Default)]
pub struct UndoStack {
    undo: Vec<UndoItem>,
    redo: Vec<UndoItem>,
}

impl UndoStack {
    /// Create an empty history
    pub fn new() -> Self {
        UndoStack::default()
    }

    /// Record a new step; anything redoable is discarded
    pub fn push(&mut self, item: UndoItem) {
        self.undo.push(item);
        self.redo.clear();
    }

    /// Pop the most recent step for reverting
    pub fn pop_undo(&mut self) -> Option<UndoItem> {
        self.undo.pop()
    }

    /// Pop the most recently reverted step for reapplying
    pub fn pop_redo(&mut self) -> Option<UndoItem> {
        self.redo.pop()
    }

    /// Park a reverted step on the redo stack
    pub fn push_redo(&mut self, item: UndoItem) {
        self.redo.push(item);
    }

    /// Return a reapplied step to the undo stack without clearing redo
    pub fn push_undo(&mut self, item: UndoItem) {
        self.undo.push(item);
    }

    /// Whether there is anything to undo
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether there is anything to redo
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of undoable steps
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Number of redoable steps
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Drop all history, e.g. after opening a file
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
