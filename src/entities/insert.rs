//! Insert (block reference) entity

use super::{EntityCommon, PropertyValue};
use crate::error::{CoreError, Result};
use crate::types::Vector2;

/// A reference to a named block, placed at a point with scale and rotation
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    /// Common entity data
    pub common: EntityCommon,
    /// Referenced block name
    pub block_name: String,
    /// Insertion point
    pub insertion: Vector2,
    /// X scale factor
    pub x_scale: f64,
    /// Y scale factor
    pub y_scale: f64,
    /// Rotation in degrees
    pub rotation: f64,
}

impl Insert {
    /// Create a new block reference
    pub fn new(block_name: impl Into<String>, insertion: Vector2) -> Self {
        Insert {
            common: EntityCommon::new(),
            block_name: block_name.into(),
            insertion,
            x_scale: 1.0,
            y_scale: 1.0,
            rotation: 0.0,
        }
    }

    /// Translate the reference by an offset
    pub fn translate(&mut self, offset: Vector2) {
        self.insertion = self.insertion + offset;
    }

    pub(super) const EXTRA_PROPERTIES: &'static [&'static str] =
        &["blockName", "scale", "rotation"];

    pub(super) fn get_extra_property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "blockName" => Some(PropertyValue::Text(self.block_name.clone())),
            // uniform scale shown in the UI; X and Y kept in step
            "scale" => Some(PropertyValue::Number(self.x_scale)),
            "rotation" => Some(PropertyValue::Number(self.rotation)),
            _ => None,
        }
    }

    pub(super) fn set_extra_property(&mut self, name: &str, value: &PropertyValue) -> Result<()> {
        match name {
            "blockName" => {
                let block = value.expect_text(name)?;
                if block.is_empty() {
                    return Err(CoreError::invalid_value(name, "block name cannot be empty"));
                }
                self.block_name = block.to_string();
            }
            "scale" => {
                let scale = value.expect_positive(name)?;
                self.x_scale = scale;
                self.y_scale = scale;
            }
            "rotation" => self.rotation = value.expect_number(name)?,
            _ => return Err(CoreError::InvalidProperty(name.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_defaults() {
        let ins = Insert::new("DOOR", Vector2::ZERO);
        assert_eq!(ins.x_scale, 1.0);
        assert_eq!(ins.rotation, 0.0);
    }

    #[test]
    fn test_uniform_scale() {
        let mut ins = Insert::new("DOOR", Vector2::ZERO);
        ins.set_extra_property("scale", &PropertyValue::Number(2.0))
            .unwrap();
        assert_eq!(ins.x_scale, 2.0);
        assert_eq!(ins.y_scale, 2.0);
    }
}
