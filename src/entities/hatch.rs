//! Hatch entity

use super::{EntityCommon, PropertyValue};
use crate::error::{CoreError, Result};
use crate::types::Vector2;

/// A hatched region bounded by a closed polygon.
///
/// The boundary is a single closed vertex loop; the fill is a named
/// pattern applied at an angle and scale.
#[derive(Debug, Clone, PartialEq)]
pub struct Hatch {
    /// Common entity data
    pub common: EntityCommon,
    /// Boundary vertices (implicitly closed)
    pub points: Vec<Vector2>,
    /// Fill pattern reference by name
    pub pattern_name: String,
    /// Pattern angle in degrees
    pub angle: f64,
    /// Pattern scale factor
    pub scale: f64,
}

impl Hatch {
    /// Create a hatch over a boundary with the SOLID pattern
    pub fn new(points: Vec<Vector2>) -> Self {
        Hatch {
            common: EntityCommon::new(),
            points,
            pattern_name: "SOLID".to_string(),
            angle: 0.0,
            scale: 1.0,
        }
    }

    /// Translate the hatch by an offset
    pub fn translate(&mut self, offset: Vector2) {
        for p in &mut self.points {
            *p = *p + offset;
        }
    }

    pub(super) const EXTRA_PROPERTIES: &'static [&'static str] =
        &["patternName", "angle", "scale"];

    pub(super) fn get_extra_property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "patternName" => Some(PropertyValue::Text(self.pattern_name.clone())),
            "angle" => Some(PropertyValue::Number(self.angle)),
            "scale" => Some(PropertyValue::Number(self.scale)),
            _ => None,
        }
    }

    pub(super) fn set_extra_property(&mut self, name: &str, value: &PropertyValue) -> Result<()> {
        match name {
            "patternName" => {
                let pattern = value.expect_text(name)?;
                if pattern.is_empty() {
                    return Err(CoreError::invalid_value(name, "pattern name cannot be empty"));
                }
                self.pattern_name = pattern.to_string();
            }
            "angle" => self.angle = value.expect_number(name)?,
            "scale" => self.scale = value.expect_positive(name)?,
            _ => return Err(CoreError::InvalidProperty(name.to_string())),
        }
        Ok(())
    }
}
