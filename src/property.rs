//! Selection-driven property access for the properties panel.
//!
//! The panel shows the types present in the selection, the editable
//! properties of a chosen type, and a representative value per property.
//! Writes go through entity property reflection and land as a single
//! undo step.

use tracing::debug;

use crate::entities::{Entity, PropertyValue};
use crate::error::{CoreError, Result};
use crate::scene::Scene;

/// Read and write entity properties across the current selection
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyManager;

impl PropertyManager {
    /// Create a property manager
    pub fn new() -> Self {
        PropertyManager
    }

    /// Distinct entity type names in the selection, sorted.
    ///
    /// Empty when nothing is selected.
    pub fn get_item_types(&self, scene: &Scene) -> Vec<&'static str> {
        let mut types: Vec<&'static str> = scene
            .selected_entities()
            .iter()
            .map(|e| e.type_name())
            .collect();
        types.sort_unstable();
        types.dedup();
        types
    }

    /// Editable property names for a selected type.
    ///
    /// Empty when no selected entity has that type.
    pub fn get_item_properties(&self, scene: &Scene, item_type: &str) -> Vec<&'static str> {
        match self.first_of_type(scene, item_type) {
            Some(entity) => entity.property_names(),
            None => Vec::new(),
        }
    }

    /// Value of a property, read from the first selected entity of the
    /// type in selection order.
    ///
    /// When the selection disagrees, that first value stands for all.
    pub fn get_item_property_value(
        &self,
        scene: &Scene,
        item_type: &str,
        property: &str,
    ) -> Option<PropertyValue> {
        self.first_of_type(scene, item_type)
            .and_then(|entity| entity.get_property(property))
    }

    /// Set a property on every selected entity, optionally filtered by
    /// type, as one undo step.
    ///
    /// Entities without the property are skipped; a value failing an
    /// entity's validation aborts the whole write and nothing changes.
    /// Returns the number of entities changed.
    pub fn set_item_properties(
        &self,
        scene: &mut Scene,
        property: &str,
        value: &PropertyValue,
        item_type: Option<&str>,
    ) -> Result<usize> {
        let handles = scene.selection.handles().to_vec();

        // validate against copies first so a bad value changes nothing
        let mut before = Vec::new();
        let mut after = Vec::new();
        for handle in &handles {
            let Some(entity) = scene.entity(*handle) else {
                continue;
            };
            if let Some(wanted) = item_type {
                if entity.type_name() != wanted {
                    continue;
                }
            }
            let mut updated = entity.clone();
            match updated.set_property(property, value) {
                Ok(()) => {
                    before.push(entity.clone());
                    after.push(updated);
                }
                Err(CoreError::InvalidProperty(_)) => {
                    debug!(handle = %handle, property, "entity has no such property, skipped");
                }
                Err(err) => return Err(err),
            }
        }

        let changed = after.len();
        if changed == 0 {
            return Ok(0);
        }
        for updated in &after {
            if let Some(entity) = scene.entity_mut(updated.handle()) {
                *entity = updated.clone();
            }
        }
        scene.record_modification(before, after);
        Ok(changed)
    }

    fn first_of_type<'a>(&self, scene: &'a Scene, item_type: &str) -> Option<&'a Entity> {
        scene
            .selected_entities()
            .into_iter()
            .find(|e| e.type_name() == item_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Circle, Line, Text};
    use crate::types::Vector2;

    fn scene_with_selection() -> Scene {
        let mut scene = Scene::new();
        scene.add_entities(vec![
            Entity::Line(Line::from_points(Vector2::ZERO, Vector2::UNIT_X)),
            Entity::Circle(Circle::new(Vector2::ZERO, 1.0)),
            Entity::Circle(Circle::new(Vector2::UNIT_Y, 2.0)),
            Entity::Text(Text::new(Vector2::ZERO, 2.5, "note")),
        ]);
        scene.select_all();
        scene
    }

    #[test]
    fn test_item_types_sorted_distinct() {
        let scene = scene_with_selection();
        let manager = PropertyManager::new();
        assert_eq!(
            manager.get_item_types(&scene),
            vec!["Circle", "Line", "Text"]
        );
        let empty = Scene::new();
        assert!(manager.get_item_types(&empty).is_empty());
    }

    #[test]
    fn test_item_properties_for_type() {
        let scene = scene_with_selection();
        let manager = PropertyManager::new();
        let props = manager.get_item_properties(&scene, "Circle");
        assert!(props.contains(&"radius"));
        assert!(props.contains(&"layer"));
        assert!(manager.get_item_properties(&scene, "Polyline").is_empty());
    }

    #[test]
    fn test_value_from_first_of_type() {
        let scene = scene_with_selection();
        let manager = PropertyManager::new();
        // two circles with different radii: the first one wins
        assert_eq!(
            manager.get_item_property_value(&scene, "Circle", "radius"),
            Some(PropertyValue::Number(1.0))
        );
    }

    #[test]
    fn test_set_with_type_filter_one_undo_record() {
        let mut scene = scene_with_selection();
        let manager = PropertyManager::new();
        let records_before = scene.history.undo_len();
        let changed = manager
            .set_item_properties(
                &mut scene,
                "radius",
                &PropertyValue::Number(9.0),
                Some("Circle"),
            )
            .unwrap();
        assert_eq!(changed, 2);
        assert_eq!(scene.history.undo_len(), records_before + 1);
        for entity in scene.iter() {
            if let Entity::Circle(circle) = entity {
                assert_eq!(circle.radius, 9.0);
            }
        }
    }

    #[test]
    fn test_set_without_filter_skips_missing_property() {
        let mut scene = scene_with_selection();
        let manager = PropertyManager::new();
        // only circles carry "radius"; others are skipped, not errors
        let changed = manager
            .set_item_properties(&mut scene, "radius", &PropertyValue::Number(3.0), None)
            .unwrap();
        assert_eq!(changed, 2);
    }

    #[test]
    fn test_invalid_value_changes_nothing() {
        let mut scene = scene_with_selection();
        let manager = PropertyManager::new();
        let records_before = scene.history.undo_len();
        let result = manager.set_item_properties(
            &mut scene,
            "radius",
            &PropertyValue::Number(-1.0),
            Some("Circle"),
        );
        assert!(result.is_err());
        assert_eq!(scene.history.undo_len(), records_before);
        for entity in scene.iter() {
            if let Entity::Circle(circle) = entity {
                assert!(circle.radius > 0.0);
            }
        }
    }

    #[test]
    fn test_shared_property_applies_to_all() {
        let mut scene = scene_with_selection();
        let manager = PropertyManager::new();
        let changed = manager
            .set_item_properties(
                &mut scene,
                "layer",
                &PropertyValue::Text("WALLS".into()),
                None,
            )
            .unwrap();
        assert_eq!(changed, 4);
        assert!(scene.iter().all(|e| e.common().layer == "WALLS"));
    }
}
