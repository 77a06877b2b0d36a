//! Line entity

use super::{EntityCommon, PropertyValue};
use crate::error::{CoreError, Result};
use crate::types::Vector2;

/// A line entity defined by two endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Common entity data
    pub common: EntityCommon,
    /// Start point of the line
    pub start: Vector2,
    /// End point of the line
    pub end: Vector2,
}

impl Line {
    /// Create a new line from origin to origin
    pub fn new() -> Self {
        Line {
            common: EntityCommon::new(),
            start: Vector2::ZERO,
            end: Vector2::ZERO,
        }
    }

    /// Create a new line between two points
    pub fn from_points(start: Vector2, end: Vector2) -> Self {
        Line {
            start,
            end,
            ..Self::new()
        }
    }

    /// Get the length of the line
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    /// Get the midpoint of the line
    pub fn midpoint(&self) -> Vector2 {
        self.start.midpoint(&self.end)
    }

    /// Get the angle of the line in degrees
    pub fn angle(&self) -> f64 {
        self.start.angle_to(&self.end)
    }

    /// Translate the line by an offset
    pub fn translate(&mut self, offset: Vector2) {
        self.start = self.start + offset;
        self.end = self.end + offset;
    }

    pub(super) const EXTRA_PROPERTIES: &'static [&'static str] = &[];

    pub(super) fn get_extra_property(&self, _name: &str) -> Option<PropertyValue> {
        None
    }

    pub(super) fn set_extra_property(&mut self, name: &str, _value: &PropertyValue) -> Result<()> {
        Err(CoreError::InvalidProperty(name.to_string()))
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}
