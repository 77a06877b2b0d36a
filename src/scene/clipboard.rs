//! In-process entity clipboard

use super::Scene;
use crate::entities::Entity;
use crate::types::{Handle, Vector2};

/// Holds entity copies between operations, with the base point they
/// were captured relative to.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    entities: Vec<Entity>,
    base_point: Vector2,
}

impl Clipboard {
    /// Create an empty clipboard
    pub fn new() -> Self {
        Clipboard::default()
    }

    /// Replace the clipboard contents
    pub fn store(&mut self, entities: Vec<Entity>, base_point: Vector2) {
        self.entities = entities;
        self.base_point = base_point;
    }

    /// Capture the selection, relative to `base_point`.
    ///
    /// An empty selection leaves the clipboard unchanged.
    pub fn copy(&mut self, scene: &Scene, base_point: Vector2) {
        let entities: Vec<Entity> = scene
            .selected_entities()
            .into_iter()
            .cloned()
            .collect();
        if !entities.is_empty() {
            self.store(entities, base_point);
        }
    }

    /// Add clones of the contents at `target`, as one undoable step.
    ///
    /// Clones are translated by `target - base_point` and receive fresh
    /// handles.  Returns the new handles; empty when the clipboard is.
    pub fn paste(&self, scene: &mut Scene, target: Vector2) -> Vec<Handle> {
        let offset = target - self.base_point;
        let mut clones = Vec::with_capacity(self.entities.len());
        for entity in &self.entities {
            let mut clone = entity.clone();
            clone.translate(offset);
            clones.push(clone);
        }
        scene.add_entities(clones)
    }

    /// The stored entities
    pub fn contents(&self) -> &[Entity] {
        &self.entities
    }

    /// The point the contents were captured relative to
    pub fn base_point(&self) -> Vector2 {
        self.base_point
    }

    /// Whether the clipboard holds anything
    pub fn is_valid(&self) -> bool {
        !self.entities.is_empty()
    }

    /// Empty the clipboard
    pub fn clear(&mut self) {
        self.entities.clear();
        self.base_point = Vector2::ZERO;
    }
}
