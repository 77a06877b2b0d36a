//! Layer table item

use super::registry::StyleItem;
use crate::entities::PropertyValue;
use crate::error::{CoreError, Result};
use crate::types::{Colour, LineWeight};

/// A drawing layer.
///
/// Layer "0" always exists and cannot be deleted or renamed.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Layer name
    pub name: String,
    /// Layer colour, applied to entities drawn ByLayer
    pub colour: Colour,
    /// Line type reference by name
    pub line_type: String,
    /// Line weight for entities drawn ByLayer
    pub line_weight: LineWeight,
    /// Visible in the viewport
    pub on: bool,
    /// Frozen layers are neither drawn nor regenerated
    pub frozen: bool,
    /// Locked layers are visible but not editable
    pub locked: bool,
    /// Included in plot output
    pub plotting: bool,
}

impl Layer {
    /// Create a layer with default attributes
    pub fn new(name: impl Into<String>) -> Self {
        Layer {
            name: name.into(),
            colour: Colour::Index(7),
            line_type: "Continuous".to_string(),
            line_weight: LineWeight::Default,
            on: true,
            frozen: false,
            locked: false,
            plotting: true,
        }
    }

    /// The mandatory default layer "0"
    pub fn zero() -> Self {
        Layer::new("0")
    }

    /// A layer contributes to the drawing only when on and not frozen
    pub fn is_visible(&self) -> bool {
        self.on && !self.frozen
    }
}

impl StyleItem for Layer {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn is_indelible(&self) -> bool {
        self.name == "0"
    }

    fn default_base_name() -> &'static str {
        "NEW_LAYER"
    }

    fn with_name(name: String) -> Self {
        Layer::new(name)
    }

    fn get_property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "name" => Some(PropertyValue::Text(self.name.clone())),
            "colour" => Some(PropertyValue::Colour(self.colour)),
            "lineType" => Some(PropertyValue::Text(self.line_type.clone())),
            "lineWeight" => Some(PropertyValue::Number(self.line_weight.value() as f64)),
            "on" => Some(PropertyValue::Boolean(self.on)),
            "frozen" => Some(PropertyValue::Boolean(self.frozen)),
            "locked" => Some(PropertyValue::Boolean(self.locked)),
            "plotting" => Some(PropertyValue::Boolean(self.plotting)),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: &PropertyValue) -> Result<()> {
        match name {
            "colour" => self.colour = value.expect_colour(name)?,
            "lineType" => {
                let lt = value.expect_text(name)?;
                if lt.is_empty() {
                    return Err(CoreError::invalid_value(name, "line type cannot be empty"));
                }
                self.line_type = lt.to_string();
            }
            "lineWeight" => {
                let raw = value.expect_number(name)?;
                if raw.fract() != 0.0 || !(-3.0..=211.0).contains(&raw) {
                    return Err(CoreError::invalid_value(
                        name,
                        "line weight must be an integer between -3 and 211",
                    ));
                }
                self.line_weight = LineWeight::from_value(raw as i16);
            }
            "on" => self.on = value.expect_boolean(name)?,
            "frozen" => self.frozen = value.expect_boolean(name)?,
            "locked" => self.locked = value.expect_boolean(name)?,
            "plotting" => self.plotting = value.expect_boolean(name)?,
            _ => return Err(CoreError::InvalidProperty(name.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_zero_is_indelible() {
        assert!(Layer::zero().is_indelible());
        assert!(!Layer::new("WALLS").is_indelible());
    }

    #[test]
    fn test_visibility() {
        let mut layer = Layer::new("WALLS");
        assert!(layer.is_visible());
        layer.frozen = true;
        assert!(!layer.is_visible());
    }

    #[test]
    fn test_boolean_flags() {
        let mut layer = Layer::new("WALLS");
        layer
            .set_property("locked", &PropertyValue::Boolean(true))
            .unwrap();
        assert!(layer.locked);
        assert!(layer
            .set_property("locked", &PropertyValue::Number(1.0))
            .is_err());
    }

    #[test]
    fn test_line_weight_range() {
        let mut layer = Layer::new("WALLS");
        layer
            .set_property("lineWeight", &PropertyValue::Number(25.0))
            .unwrap();
        assert_eq!(layer.line_weight, LineWeight::Value(25));
        assert!(layer
            .set_property("lineWeight", &PropertyValue::Number(0.5))
            .is_err());
    }
}
