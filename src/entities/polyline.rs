//! Polyline entity

use super::{EntityCommon, PropertyValue};
use crate::error::{CoreError, Result};
use crate::types::Vector2;

/// A polyline through an ordered sequence of vertices
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    /// Common entity data
    pub common: EntityCommon,
    /// Vertices in drawing order
    pub points: Vec<Vector2>,
    /// Whether the last vertex connects back to the first
    pub closed: bool,
    /// Constant segment width
    pub width: f64,
}

impl Polyline {
    /// Create an empty open polyline
    pub fn new() -> Self {
        Polyline {
            common: EntityCommon::new(),
            points: Vec::new(),
            closed: false,
            width: 0.0,
        }
    }

    /// Create a polyline through the given points
    pub fn from_points(points: Vec<Vector2>) -> Self {
        Polyline {
            points,
            ..Self::new()
        }
    }

    /// Append a vertex
    pub fn add_point(&mut self, point: Vector2) {
        self.points.push(point);
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// Total length along the segments (including the closing segment)
    pub fn length(&self) -> f64 {
        let mut total: f64 = self
            .points
            .windows(2)
            .map(|pair| pair[0].distance(&pair[1]))
            .sum();
        if self.closed && self.points.len() > 2 {
            total += self.points[self.points.len() - 1].distance(&self.points[0]);
        }
        total
    }

    /// Translate the polyline by an offset
    pub fn translate(&mut self, offset: Vector2) {
        for p in &mut self.points {
            *p = *p + offset;
        }
    }

    pub(super) const EXTRA_PROPERTIES: &'static [&'static str] = &["width"];

    pub(super) fn get_extra_property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "width" => Some(PropertyValue::Number(self.width)),
            _ => None,
        }
    }

    pub(super) fn set_extra_property(&mut self, name: &str, value: &PropertyValue) -> Result<()> {
        match name {
            "width" => {
                let w = value.expect_number(name)?;
                if w < 0.0 {
                    return Err(CoreError::invalid_value(name, "must not be negative"));
                }
                self.width = w;
                Ok(())
            }
            _ => Err(CoreError::InvalidProperty(name.to_string())),
        }
    }
}

impl Default for Polyline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_length() {
        let pl = Polyline::from_points(vec![
            Vector2::ZERO,
            Vector2::new(3.0, 4.0),
            Vector2::new(3.0, 10.0),
        ]);
        assert_eq!(pl.length(), 11.0);
    }

    #[test]
    fn test_closed_length() {
        let mut pl = Polyline::from_points(vec![
            Vector2::ZERO,
            Vector2::new(4.0, 0.0),
            Vector2::new(4.0, 3.0),
        ]);
        pl.closed = true;
        assert_eq!(pl.length(), 12.0);
    }

    #[test]
    fn test_negative_width_rejected() {
        let mut pl = Polyline::new();
        assert!(pl
            .set_extra_property("width", &PropertyValue::Number(-1.0))
            .is_err());
    }
}
