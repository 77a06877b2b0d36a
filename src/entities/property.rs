//! Typed property values for generic UI binding.
//!
//! Entities expose their editable state as named, typed properties so a
//! properties panel can build widgets without knowing concrete entity types.
//! Values are validated on assignment; a type mismatch is an
//! [`InvalidValue`](crate::error::CoreError::InvalidValue) and never
//! partially mutates the entity.

use crate::error::{CoreError, Result};
use crate::types::{Colour, Vector2};
use std::fmt;

/// A dynamically typed property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Floating point number (lengths, angles, scale factors, enum indices)
    Number(f64),
    /// Boolean flag
    Boolean(bool),
    /// Free text or a style/layer name reference
    Text(String),
    /// 2D point
    Point(Vector2),
    /// Colour value
    Colour(Colour),
}

impl PropertyValue {
    /// Name of the contained type, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Number(_) => "number",
            PropertyValue::Boolean(_) => "boolean",
            PropertyValue::Text(_) => "text",
            PropertyValue::Point(_) => "point",
            PropertyValue::Colour(_) => "colour",
        }
    }

    /// Extract a number, or fail with `InvalidValue` naming `property`
    pub fn expect_number(&self, property: &str) -> Result<f64> {
        match self {
            PropertyValue::Number(n) => Ok(*n),
            other => Err(CoreError::invalid_value(
                property,
                format!("expected a number, got {}", other.type_name()),
            )),
        }
    }

    /// Extract a strictly positive number
    pub fn expect_positive(&self, property: &str) -> Result<f64> {
        let n = self.expect_number(property)?;
        if n > 0.0 {
            Ok(n)
        } else {
            Err(CoreError::invalid_value(property, "must be greater than zero"))
        }
    }

    /// Extract a boolean
    pub fn expect_boolean(&self, property: &str) -> Result<bool> {
        match self {
            PropertyValue::Boolean(b) => Ok(*b),
            other => Err(CoreError::invalid_value(
                property,
                format!("expected a boolean, got {}", other.type_name()),
            )),
        }
    }

    /// Extract text
    pub fn expect_text(&self, property: &str) -> Result<&str> {
        match self {
            PropertyValue::Text(s) => Ok(s),
            other => Err(CoreError::invalid_value(
                property,
                format!("expected text, got {}", other.type_name()),
            )),
        }
    }

    /// Extract a point
    pub fn expect_point(&self, property: &str) -> Result<Vector2> {
        match self {
            PropertyValue::Point(p) => Ok(*p),
            other => Err(CoreError::invalid_value(
                property,
                format!("expected a point, got {}", other.type_name()),
            )),
        }
    }

    /// Extract a colour
    pub fn expect_colour(&self, property: &str) -> Result<Colour> {
        match self {
            PropertyValue::Colour(c) => Ok(*c),
            other => Err(CoreError::invalid_value(
                property,
                format!("expected a colour, got {}", other.type_name()),
            )),
        }
    }

    /// Extract a model-backed enum index; must be an integer in `0..count`
    pub fn expect_enum_index(&self, property: &str, count: usize) -> Result<usize> {
        let n = self.expect_number(property)?;
        if n.fract() != 0.0 || n < 0.0 {
            return Err(CoreError::invalid_value(property, "expected a whole number"));
        }
        let index = n as usize;
        if index >= count {
            return Err(CoreError::invalid_value(
                property,
                format!("index {} out of range (0-{})", index, count - 1),
            ));
        }
        Ok(index)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Number(n) => write!(f, "{}", n),
            PropertyValue::Boolean(b) => write!(f, "{}", b),
            PropertyValue::Text(s) => write!(f, "{}", s),
            PropertyValue::Point(p) => write!(f, "{}", p),
            PropertyValue::Colour(c) => write!(f, "{}", c),
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(n: f64) -> Self {
        PropertyValue::Number(n)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Boolean(b)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Text(s)
    }
}

impl From<Vector2> for PropertyValue {
    fn from(p: Vector2) -> Self {
        PropertyValue::Point(p)
    }
}

impl From<Colour> for PropertyValue {
    fn from(c: Colour) -> Self {
        PropertyValue::Colour(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expect_number() {
        assert_eq!(PropertyValue::Number(2.5).expect_number("radius").unwrap(), 2.5);
        assert!(PropertyValue::Text("x".into()).expect_number("radius").is_err());
    }

    #[test]
    fn test_expect_positive() {
        assert!(PropertyValue::Number(0.0).expect_positive("height").is_err());
        assert!(PropertyValue::Number(-1.0).expect_positive("height").is_err());
        assert_eq!(PropertyValue::Number(1.0).expect_positive("height").unwrap(), 1.0);
    }

    #[test]
    fn test_expect_enum_index() {
        let v = PropertyValue::Number(2.0);
        assert_eq!(v.expect_enum_index("horizontalAlignment", 3).unwrap(), 2);
        assert!(v.expect_enum_index("horizontalAlignment", 2).is_err());
        assert!(PropertyValue::Number(1.5).expect_enum_index("x", 3).is_err());
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = PropertyValue::Boolean(true).expect_text("layer").unwrap_err();
        assert!(err.to_string().contains("expected text"));
    }
}
