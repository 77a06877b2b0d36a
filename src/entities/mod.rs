//! Drawing entity types
//!
//! Entities are polymorphic over the [`Entity`] enum.  Shared attributes
//! (handle, layer reference, colour, line type, line weight, visibility)
//! live in [`EntityCommon`].  Layer and style references are held by name
//! and resolved through the registries at access time; an entity never
//! owns its layer or style.

use crate::error::{CoreError, Result};
use crate::types::{Colour, Handle, LineWeight, Vector2};

pub mod arc;
pub mod circle;
pub mod dimension;
pub mod hatch;
pub mod insert;
pub mod line;
pub mod point;
pub mod polyline;
pub mod property;
pub mod text;

pub use arc::Arc;
pub use circle::Circle;
pub use dimension::AlignedDimension;
pub use hatch::Hatch;
pub use insert::Insert;
pub use line::Line;
pub use point::Point;
pub use polyline::Polyline;
pub use property::PropertyValue;
pub use text::{HorizontalAlignment, Text, VerticalAlignment};

/// Attributes shared by every entity variant
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCommon {
    /// Unique handle, assigned by the scene on insertion
    pub handle: Handle,
    /// Layer reference by name; resolved through the layer registry
    pub layer: String,
    /// Entity colour
    pub colour: Colour,
    /// Line type reference by name
    pub line_type: String,
    /// Line weight
    pub line_weight: LineWeight,
    /// Visibility flag (layer off/frozen state is resolved separately)
    pub visible: bool,
}

impl EntityCommon {
    /// Create common data with default references (layer "0", ByLayer styles)
    pub fn new() -> Self {
        EntityCommon {
            handle: Handle::NULL,
            layer: "0".to_string(),
            colour: Colour::ByLayer,
            line_type: "BYLAYER".to_string(),
            line_weight: LineWeight::ByLayer,
            visible: true,
        }
    }

    /// Create common data on a specific layer
    pub fn on_layer(layer: impl Into<String>) -> Self {
        EntityCommon {
            layer: layer.into(),
            ..Self::new()
        }
    }

    /// Property names shared by all entity types
    pub const PROPERTIES: &'static [&'static str] = &["layer", "colour", "lineType", "lineWeight"];

    /// Read a shared property by name
    pub fn get_property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "layer" => Some(PropertyValue::Text(self.layer.clone())),
            "colour" => Some(PropertyValue::Colour(self.colour)),
            "lineType" => Some(PropertyValue::Text(self.line_type.clone())),
            "lineWeight" => Some(PropertyValue::Number(self.line_weight.value() as f64)),
            _ => None,
        }
    }

    /// Write a shared property by name; `Ok(false)` if the name is not shared
    pub fn set_property(&mut self, name: &str, value: &PropertyValue) -> Result<bool> {
        match name {
            "layer" => {
                let layer = value.expect_text(name)?;
                if layer.is_empty() {
                    return Err(CoreError::invalid_value(name, "layer name cannot be empty"));
                }
                self.layer = layer.to_string();
            }
            "colour" => self.colour = value.expect_colour(name)?,
            "lineType" => {
                let lt = value.expect_text(name)?;
                if lt.is_empty() {
                    return Err(CoreError::invalid_value(name, "line type name cannot be empty"));
                }
                self.line_type = lt.to_string();
            }
            "lineWeight" => {
                let raw = value.expect_number(name)?;
                if raw.fract() != 0.0 || !(-3.0..=211.0).contains(&raw) {
                    return Err(CoreError::invalid_value(name, "expected a lineweight value"));
                }
                self.line_weight = LineWeight::from_value(raw as i16);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}

impl Default for EntityCommon {
    fn default() -> Self {
        Self::new()
    }
}

/// Polymorphic entity container
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    /// Point marker
    Point(Point),
    /// Line segment
    Line(Line),
    /// Full circle
    Circle(Circle),
    /// Circular arc
    Arc(Arc),
    /// Polyline (open or closed)
    Polyline(Polyline),
    /// Single-line text
    Text(Text),
    /// Aligned linear dimension
    AlignedDimension(AlignedDimension),
    /// Hatched boundary
    Hatch(Hatch),
    /// Block reference
    Insert(Insert),
}

impl Entity {
    /// Get the shared entity data
    pub fn common(&self) -> &EntityCommon {
        match self {
            Entity::Point(e) => &e.common,
            Entity::Line(e) => &e.common,
            Entity::Circle(e) => &e.common,
            Entity::Arc(e) => &e.common,
            Entity::Polyline(e) => &e.common,
            Entity::Text(e) => &e.common,
            Entity::AlignedDimension(e) => &e.common,
            Entity::Hatch(e) => &e.common,
            Entity::Insert(e) => &e.common,
        }
    }

    /// Get the shared entity data mutably
    pub fn common_mut(&mut self) -> &mut EntityCommon {
        match self {
            Entity::Point(e) => &mut e.common,
            Entity::Line(e) => &mut e.common,
            Entity::Circle(e) => &mut e.common,
            Entity::Arc(e) => &mut e.common,
            Entity::Polyline(e) => &mut e.common,
            Entity::Text(e) => &mut e.common,
            Entity::AlignedDimension(e) => &mut e.common,
            Entity::Hatch(e) => &mut e.common,
            Entity::Insert(e) => &mut e.common,
        }
    }

    /// The entity's handle
    pub fn handle(&self) -> Handle {
        self.common().handle
    }

    /// The entity type name shown in the UI
    pub fn type_name(&self) -> &'static str {
        match self {
            Entity::Point(_) => "Point",
            Entity::Line(_) => "Line",
            Entity::Circle(_) => "Circle",
            Entity::Arc(_) => "Arc",
            Entity::Polyline(_) => "Polyline",
            Entity::Text(_) => "Text",
            Entity::AlignedDimension(_) => "AlignedDimension",
            Entity::Hatch(_) => "Hatch",
            Entity::Insert(_) => "Insert",
        }
    }

    /// Translate the entity by an offset
    pub fn translate(&mut self, offset: Vector2) {
        match self {
            Entity::Point(e) => e.translate(offset),
            Entity::Line(e) => e.translate(offset),
            Entity::Circle(e) => e.translate(offset),
            Entity::Arc(e) => e.translate(offset),
            Entity::Polyline(e) => e.translate(offset),
            Entity::Text(e) => e.translate(offset),
            Entity::AlignedDimension(e) => e.translate(offset),
            Entity::Hatch(e) => e.translate(offset),
            Entity::Insert(e) => e.translate(offset),
        }
    }

    /// Names of all editable properties, shared ones first
    pub fn property_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = EntityCommon::PROPERTIES.to_vec();
        names.extend_from_slice(self.extra_property_names());
        names
    }

    /// Read a property by name
    pub fn get_property(&self, name: &str) -> Option<PropertyValue> {
        if let Some(value) = self.common().get_property(name) {
            return Some(value);
        }
        match self {
            Entity::Point(e) => e.get_extra_property(name),
            Entity::Line(e) => e.get_extra_property(name),
            Entity::Circle(e) => e.get_extra_property(name),
            Entity::Arc(e) => e.get_extra_property(name),
            Entity::Polyline(e) => e.get_extra_property(name),
            Entity::Text(e) => e.get_extra_property(name),
            Entity::AlignedDimension(e) => e.get_extra_property(name),
            Entity::Hatch(e) => e.get_extra_property(name),
            Entity::Insert(e) => e.get_extra_property(name),
        }
    }

    /// Write a property by name, validating the value type and range.
    ///
    /// Fails with `InvalidProperty` if the name is unknown for this entity
    /// type, or `InvalidValue` if the value does not fit; the entity is
    /// unchanged on failure.
    pub fn set_property(&mut self, name: &str, value: &PropertyValue) -> Result<()> {
        if self.common_mut().set_property(name, value)? {
            return Ok(());
        }
        match self {
            Entity::Point(e) => e.set_extra_property(name, value),
            Entity::Line(e) => e.set_extra_property(name, value),
            Entity::Circle(e) => e.set_extra_property(name, value),
            Entity::Arc(e) => e.set_extra_property(name, value),
            Entity::Polyline(e) => e.set_extra_property(name, value),
            Entity::Text(e) => e.set_extra_property(name, value),
            Entity::AlignedDimension(e) => e.set_extra_property(name, value),
            Entity::Hatch(e) => e.set_extra_property(name, value),
            Entity::Insert(e) => e.set_extra_property(name, value),
        }
    }

    fn extra_property_names(&self) -> &'static [&'static str] {
        match self {
            Entity::Point(_) => Point::EXTRA_PROPERTIES,
            Entity::Line(_) => Line::EXTRA_PROPERTIES,
            Entity::Circle(_) => Circle::EXTRA_PROPERTIES,
            Entity::Arc(_) => Arc::EXTRA_PROPERTIES,
            Entity::Polyline(_) => Polyline::EXTRA_PROPERTIES,
            Entity::Text(_) => Text::EXTRA_PROPERTIES,
            Entity::AlignedDimension(_) => AlignedDimension::EXTRA_PROPERTIES,
            Entity::Hatch(_) => Hatch::EXTRA_PROPERTIES,
            Entity::Insert(_) => Insert::EXTRA_PROPERTIES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_defaults() {
        let common = EntityCommon::new();
        assert_eq!(common.layer, "0");
        assert_eq!(common.colour, Colour::ByLayer);
        assert_eq!(common.line_type, "BYLAYER");
        assert!(common.visible);
    }

    #[test]
    fn test_shared_property_roundtrip() {
        let mut entity = Entity::Line(Line::new());
        entity
            .set_property("layer", &PropertyValue::Text("WALLS".into()))
            .unwrap();
        assert_eq!(
            entity.get_property("layer"),
            Some(PropertyValue::Text("WALLS".into()))
        );
    }

    #[test]
    fn test_unknown_property_rejected() {
        let mut entity = Entity::Line(Line::new());
        let err = entity
            .set_property("radius", &PropertyValue::Number(1.0))
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidProperty(_)));
    }

    #[test]
    fn test_invalid_value_leaves_entity_unchanged() {
        let mut entity = Entity::Circle(Circle::new(Vector2::ZERO, 5.0));
        let err = entity
            .set_property("radius", &PropertyValue::Number(-1.0))
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidValue { .. }));
        assert_eq!(
            entity.get_property("radius"),
            Some(PropertyValue::Number(5.0))
        );
    }

    #[test]
    fn test_property_names_include_shared() {
        let entity = Entity::Circle(Circle::new(Vector2::ZERO, 1.0));
        let names = entity.property_names();
        assert!(names.contains(&"layer"));
        assert!(names.contains(&"radius"));
    }
}
