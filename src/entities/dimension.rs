//! Dimension entities

use super::{EntityCommon, PropertyValue};
use crate::error::{CoreError, Result};
use crate::types::Vector2;

/// An aligned linear dimension between two measurement points.
///
/// The displayed text is the measured distance unless `text_override`
/// is non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedDimension {
    /// Common entity data
    pub common: EntityCommon,
    /// First measurement point
    pub p1: Vector2,
    /// Second measurement point
    pub p2: Vector2,
    /// Location of the dimension line
    pub location: Vector2,
    /// Dimension style reference by name
    pub dim_style: String,
    /// Replacement text; empty means show the measurement
    pub text_override: String,
}

impl AlignedDimension {
    /// Create a new aligned dimension
    pub fn new(p1: Vector2, p2: Vector2, location: Vector2) -> Self {
        AlignedDimension {
            common: EntityCommon::new(),
            p1,
            p2,
            location,
            dim_style: "STANDARD".to_string(),
            text_override: String::new(),
        }
    }

    /// The measured distance
    pub fn measurement(&self) -> f64 {
        self.p1.distance(&self.p2)
    }

    /// The text shown on the dimension line
    pub fn display_text(&self) -> String {
        if self.text_override.is_empty() {
            format!("{:.2}", self.measurement())
        } else {
            self.text_override.clone()
        }
    }

    /// Translate the dimension by an offset
    pub fn translate(&mut self, offset: Vector2) {
        self.p1 = self.p1 + offset;
        self.p2 = self.p2 + offset;
        self.location = self.location + offset;
    }

    pub(super) const EXTRA_PROPERTIES: &'static [&'static str] =
        &["dimensionStyle", "textOverride"];

    pub(super) fn get_extra_property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "dimensionStyle" => Some(PropertyValue::Text(self.dim_style.clone())),
            "textOverride" => Some(PropertyValue::Text(self.text_override.clone())),
            _ => None,
        }
    }

    pub(super) fn set_extra_property(&mut self, name: &str, value: &PropertyValue) -> Result<()> {
        match name {
            "dimensionStyle" => {
                let style = value.expect_text(name)?;
                if style.is_empty() {
                    return Err(CoreError::invalid_value(name, "style name cannot be empty"));
                }
                self.dim_style = style.to_string();
            }
            "textOverride" => self.text_override = value.expect_text(name)?.to_string(),
            _ => return Err(CoreError::InvalidProperty(name.to_string())),
        }
        Ok(())
    }
}
