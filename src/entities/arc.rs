//! Arc entity

use super::{EntityCommon, PropertyValue};
use crate::error::{CoreError, Result};
use crate::types::Vector2;

/// A circular arc defined by centre, radius and start/end angles.
///
/// Angles are in degrees, measured counterclockwise from the positive
/// X axis; the arc runs counterclockwise from start to end.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    /// Common entity data
    pub common: EntityCommon,
    /// Centre point
    pub centre: Vector2,
    /// Radius
    pub radius: f64,
    /// Start angle in degrees
    pub start_angle: f64,
    /// End angle in degrees
    pub end_angle: f64,
}

impl Arc {
    /// Create a new arc
    pub fn new(centre: Vector2, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Arc {
            common: EntityCommon::new(),
            centre,
            radius,
            start_angle,
            end_angle,
        }
    }

    /// Create an arc through a centre, start point and end point
    pub fn from_points(centre: Vector2, start: Vector2, end: Vector2) -> Self {
        Arc::new(
            centre,
            centre.distance(&start),
            centre.angle_to(&start),
            centre.angle_to(&end),
        )
    }

    /// Point where the arc starts
    pub fn start_point(&self) -> Vector2 {
        self.point_at(self.start_angle)
    }

    /// Point where the arc ends
    pub fn end_point(&self) -> Vector2 {
        self.point_at(self.end_angle)
    }

    /// Swept angle in degrees, normalised to (0, 360]
    pub fn swept_angle(&self) -> f64 {
        let mut sweep = self.end_angle - self.start_angle;
        while sweep <= 0.0 {
            sweep += 360.0;
        }
        sweep
    }

    fn point_at(&self, degrees: f64) -> Vector2 {
        let rad = degrees.to_radians();
        Vector2::new(
            self.centre.x + self.radius * rad.cos(),
            self.centre.y + self.radius * rad.sin(),
        )
    }

    /// Translate the arc by an offset
    pub fn translate(&mut self, offset: Vector2) {
        self.centre = self.centre + offset;
    }

    pub(super) const EXTRA_PROPERTIES: &'static [&'static str] =
        &["radius", "startAngle", "endAngle"];

    pub(super) fn get_extra_property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "radius" => Some(PropertyValue::Number(self.radius)),
            "startAngle" => Some(PropertyValue::Number(self.start_angle)),
            "endAngle" => Some(PropertyValue::Number(self.end_angle)),
            _ => None,
        }
    }

    pub(super) fn set_extra_property(&mut self, name: &str, value: &PropertyValue) -> Result<()> {
        match name {
            "radius" => self.radius = value.expect_positive(name)?,
            "startAngle" => self.start_angle = value.expect_number(name)?,
            "endAngle" => self.end_angle = value.expect_number(name)?,
            _ => return Err(CoreError::InvalidProperty(name.to_string())),
        }
        Ok(())
    }
}
