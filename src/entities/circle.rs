//! Circle entity

use super::{EntityCommon, PropertyValue};
use crate::error::{CoreError, Result};
use crate::types::Vector2;

/// A circle entity defined by centre and radius
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    /// Common entity data
    pub common: EntityCommon,
    /// Centre point
    pub centre: Vector2,
    /// Radius
    pub radius: f64,
}

impl Circle {
    /// Create a new circle
    pub fn new(centre: Vector2, radius: f64) -> Self {
        Circle {
            common: EntityCommon::new(),
            centre,
            radius,
        }
    }

    /// Get the circumference
    pub fn circumference(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.radius
    }

    /// Get the area
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }

    /// Translate the circle by an offset
    pub fn translate(&mut self, offset: Vector2) {
        self.centre = self.centre + offset;
    }

    pub(super) const EXTRA_PROPERTIES: &'static [&'static str] = &["radius"];

    pub(super) fn get_extra_property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "radius" => Some(PropertyValue::Number(self.radius)),
            _ => None,
        }
    }

    pub(super) fn set_extra_property(&mut self, name: &str, value: &PropertyValue) -> Result<()> {
        match name {
            "radius" => {
                self.radius = value.expect_positive(name)?;
                Ok(())
            }
            _ => Err(CoreError::InvalidProperty(name.to_string())),
        }
    }
}
