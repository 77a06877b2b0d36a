//! Point entity

use super::{EntityCommon, PropertyValue};
use crate::error::{CoreError, Result};
use crate::types::Vector2;

/// A point marker entity
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// Common entity data
    pub common: EntityCommon,
    /// Location of the point
    pub location: Vector2,
}

impl Point {
    /// Create a point at the origin
    pub fn new() -> Self {
        Point {
            common: EntityCommon::new(),
            location: Vector2::ZERO,
        }
    }

    /// Create a point at a location
    pub fn at(location: Vector2) -> Self {
        Point {
            location,
            ..Self::new()
        }
    }

    /// Translate the point by an offset
    pub fn translate(&mut self, offset: Vector2) {
        self.location = self.location + offset;
    }

    pub(super) const EXTRA_PROPERTIES: &'static [&'static str] = &[];

    pub(super) fn get_extra_property(&self, _name: &str) -> Option<PropertyValue> {
        None
    }

    pub(super) fn set_extra_property(&mut self, name: &str, _value: &PropertyValue) -> Result<()> {
        Err(CoreError::InvalidProperty(name.to_string()))
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new()
    }
}
