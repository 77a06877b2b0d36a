//! The drawing scene: entity storage, selection and history.
//!
//! Entities live in insertion order, which doubles as draw (z) order.
//! Handles identify entities across mutations; positional indices are
//! only valid until the next structural change.

pub mod clipboard;
pub mod selection;
pub mod undo;

pub use clipboard::Clipboard;
pub use selection::Selection;
pub use undo::{UndoItem, UndoStack};

use indexmap::IndexMap;

use crate::entities::Entity;
use crate::types::Handle;

type EntityMap = IndexMap<Handle, Entity, ahash::RandomState>;

/// Entity container with selection and undo history
#[derive(Debug, Clone)]
pub struct Scene {
    entities: EntityMap,
    /// Current selection set
    pub selection: Selection,
    /// Undo/redo history
    pub history: UndoStack,
    next_handle: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Scene::new()
    }
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Scene {
            entities: EntityMap::default(),
            selection: Selection::new(),
            history: UndoStack::new(),
            next_handle: 1,
        }
    }

    /// Allocate the next unused handle
    pub fn allocate_handle(&mut self) -> Handle {
        let handle = Handle::new(self.next_handle);
        self.next_handle += 1;
        handle
    }

    /// Reserve handles at least up to `value`, e.g. after reading a file
    pub fn reserve_handles(&mut self, value: u64) {
        if value >= self.next_handle {
            self.next_handle = value + 1;
        }
    }

    /// Number of entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene holds no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Look up an entity by handle
    pub fn entity(&self, handle: Handle) -> Option<&Entity> {
        self.entities.get(&handle)
    }

    /// Look up an entity mutably by handle
    pub fn entity_mut(&mut self, handle: Handle) -> Option<&mut Entity> {
        self.entities.get_mut(&handle)
    }

    /// Entities in draw order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Handles in draw order
    pub fn handles(&self) -> impl Iterator<Item = Handle> + '_ {
        self.entities.keys().copied()
    }

    /// Add entities as one undoable step, assigning handles.
    ///
    /// Returns the assigned handles in order.
    pub fn add_entities(&mut self, entities: Vec<Entity>) -> Vec<Handle> {
        if entities.is_empty() {
            return Vec::new();
        }
        let mut added = Vec::with_capacity(entities.len());
        for mut entity in entities {
            let handle = self.allocate_handle();
            entity.common_mut().handle = handle;
            self.entities.insert(handle, entity.clone());
            added.push(entity);
        }
        let handles: Vec<Handle> = added.iter().map(|e| e.handle()).collect();
        self.history.push(UndoItem::AddEntities { entities: added });
        handles
    }

    /// Remove entities as one undoable step.
    ///
    /// Unknown handles are skipped.  Removed entities leave the
    /// selection.  Returns the number removed.
    pub fn erase_entities(&mut self, handles: &[Handle]) -> usize {
        let mut removed = Vec::new();
        for handle in handles {
            if let Some((index, _, entity)) = self.entities.shift_remove_full(handle) {
                self.selection.deselect(*handle);
                removed.push((index, entity));
            }
        }
        let count = removed.len();
        if count > 0 {
            self.history.push(UndoItem::RemoveEntities { entities: removed });
        }
        count
    }

    /// Record an in-place modification as one undoable step.
    ///
    /// `before` and `after` are full entity copies taken either side of
    /// the change; entities are matched by handle on revert.
    pub fn record_modification(&mut self, before: Vec<Entity>, after: Vec<Entity>) {
        self.history.push(UndoItem::ModifyEntities { before, after });
    }

    /// Select every entity in the scene
    pub fn select_all(&mut self) {
        let handles: Vec<Handle> = self.handles().collect();
        for handle in handles {
            self.selection.select(handle);
        }
    }

    /// Selected entities in selection order
    pub fn selected_entities(&self) -> Vec<&Entity> {
        self.selection
            .handles()
            .iter()
            .filter_map(|h| self.entities.get(h))
            .collect()
    }

    /// Drop everything: entities, selection and history
    pub fn clear(&mut self) {
        self.entities.clear();
        self.selection.clear();
        self.history.clear();
        self.next_handle = 1;
    }

    // Raw operations used by history replay; these do not record undo.

    pub(crate) fn remove_raw(&mut self, handle: Handle) -> Option<Entity> {
        self.selection.deselect(handle);
        self.entities.shift_remove(&handle)
    }

    pub(crate) fn insert_raw_at(&mut self, index: usize, entity: Entity) {
        let index = index.min(self.entities.len());
        self.entities.shift_insert(index, entity.handle(), entity);
    }

    pub(crate) fn append_raw(&mut self, entity: Entity) {
        self.entities.insert(entity.handle(), entity);
    }

    /// Insert an entity read from a file, keeping its handle when set
    pub(crate) fn insert_loaded(&mut self, mut entity: Entity) -> Handle {
        let handle = if entity.handle().is_null() {
            self.allocate_handle()
        } else {
            self.reserve_handles(entity.handle().value());
            entity.handle()
        };
        entity.common_mut().handle = handle;
        self.entities.insert(handle, entity);
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Line, Point};
    use crate::styles::StyleManagers;
    use crate::types::Vector2;

    fn line(x: f64) -> Entity {
        Entity::Line(Line::from_points(Vector2::new(x, 0.0), Vector2::new(x, 1.0)))
    }

    #[test]
    fn test_add_assigns_handles_in_order() {
        let mut scene = Scene::new();
        let handles = scene.add_entities(vec![line(0.0), line(1.0)]);
        assert_eq!(handles.len(), 2);
        assert!(handles[0].value() < handles[1].value());
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.history.undo_len(), 1);
    }

    #[test]
    fn test_adding_nothing_records_nothing() {
        let mut scene = Scene::new();
        let handles = scene.add_entities(Vec::new());
        assert!(handles.is_empty());
        assert_eq!(scene.history.undo_len(), 0);
    }

    #[test]
    fn test_erase_removes_from_selection() {
        let mut scene = Scene::new();
        let handles = scene.add_entities(vec![line(0.0), line(1.0)]);
        scene.select_all();
        let removed = scene.erase_entities(&[handles[0], Handle::new(999)]);
        assert_eq!(removed, 1);
        assert_eq!(scene.selection.handles(), &[handles[1]]);
    }

    #[test]
    fn test_undo_restores_draw_order() {
        let mut scene = Scene::new();
        let mut styles = StyleManagers::new().unwrap();
        let handles = scene.add_entities(vec![line(0.0), line(1.0), line(2.0)]);
        // erase the middle entity, then undo
        scene.erase_entities(&[handles[1]]);
        let item = scene.history.pop_undo().unwrap();
        item.revert(&mut scene, &mut styles);
        let order: Vec<Handle> = scene.handles().collect();
        assert_eq!(order, handles);
    }

    #[test]
    fn test_modification_revert_and_reapply() {
        let mut scene = Scene::new();
        let mut styles = StyleManagers::new().unwrap();
        let handles = scene.add_entities(vec![Entity::Point(Point::at(Vector2::ZERO))]);
        let before = vec![scene.entity(handles[0]).unwrap().clone()];
        if let Some(Entity::Point(p)) = scene.entity_mut(handles[0]) {
            p.location = Vector2::new(5.0, 5.0);
        }
        let after = vec![scene.entity(handles[0]).unwrap().clone()];
        scene.record_modification(before, after);

        let item = scene.history.pop_undo().unwrap();
        item.revert(&mut scene, &mut styles);
        assert!(matches!(
            scene.entity(handles[0]),
            Some(Entity::Point(p)) if p.location == Vector2::ZERO
        ));
        item.reapply(&mut scene, &mut styles);
        assert!(matches!(
            scene.entity(handles[0]),
            Some(Entity::Point(p)) if p.location == Vector2::new(5.0, 5.0)
        ));
    }

    #[test]
    fn test_loaded_handles_are_reserved() {
        let mut scene = Scene::new();
        let mut entity = line(0.0);
        entity.common_mut().handle = Handle::new(40);
        scene.insert_loaded(entity);
        let fresh = scene.allocate_handle();
        assert!(fresh.value() > 40);
    }
}
