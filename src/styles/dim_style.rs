//! Dimension style table item

use super::registry::StyleItem;
use crate::entities::PropertyValue;
use crate::error::{CoreError, Result};

/// A named dimension style referenced by dimension entities
#[derive(Debug, Clone, PartialEq)]
pub struct DimStyle {
    /// Style name
    pub name: String,
    /// Overall scale applied to sizes and offsets
    pub scale: f64,
    /// Arrowhead size
    pub arrow_size: f64,
    /// Gap between the measured point and the extension line
    pub extension_line_offset: f64,
    /// Extension line overshoot past the dimension line
    pub extension_line_extension: f64,
    /// Dimension text height
    pub text_height: f64,
    /// Gap between the dimension line and the text
    pub text_gap: f64,
    /// Decimal places shown in the measurement
    pub decimal_places: u8,
    /// Text style reference by name
    pub text_style: String,
}

impl DimStyle {
    /// Create a dimension style with default attributes
    pub fn new(name: impl Into<String>) -> Self {
        DimStyle {
            name: name.into(),
            scale: 1.0,
            arrow_size: 2.5,
            extension_line_offset: 0.625,
            extension_line_extension: 1.25,
            text_height: 2.5,
            text_gap: 0.625,
            decimal_places: 2,
            text_style: "STANDARD".to_string(),
        }
    }

    /// The mandatory STANDARD style
    pub fn standard() -> Self {
        DimStyle::new("STANDARD")
    }
}

impl StyleItem for DimStyle {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn is_indelible(&self) -> bool {
        self.name.eq_ignore_ascii_case("STANDARD")
    }

    fn default_base_name() -> &'static str {
        "NEW_DIMSTYLE"
    }

    fn with_name(name: String) -> Self {
        DimStyle::new(name)
    }

    fn get_property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "name" => Some(PropertyValue::Text(self.name.clone())),
            "scale" => Some(PropertyValue::Number(self.scale)),
            "arrowSize" => Some(PropertyValue::Number(self.arrow_size)),
            "extensionLineOffset" => Some(PropertyValue::Number(self.extension_line_offset)),
            "extensionLineExtension" => Some(PropertyValue::Number(self.extension_line_extension)),
            "textHeight" => Some(PropertyValue::Number(self.text_height)),
            "textGap" => Some(PropertyValue::Number(self.text_gap)),
            "decimalPlaces" => Some(PropertyValue::Number(self.decimal_places as f64)),
            "textStyle" => Some(PropertyValue::Text(self.text_style.clone())),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: &PropertyValue) -> Result<()> {
        match name {
            "scale" => self.scale = value.expect_positive(name)?,
            "arrowSize" => self.arrow_size = value.expect_positive(name)?,
            "extensionLineOffset" => {
                let offset = value.expect_number(name)?;
                if offset < 0.0 {
                    return Err(CoreError::invalid_value(name, "offset cannot be negative"));
                }
                self.extension_line_offset = offset;
            }
            "extensionLineExtension" => {
                let ext = value.expect_number(name)?;
                if ext < 0.0 {
                    return Err(CoreError::invalid_value(name, "extension cannot be negative"));
                }
                self.extension_line_extension = ext;
            }
            "textHeight" => self.text_height = value.expect_positive(name)?,
            "textGap" => {
                let gap = value.expect_number(name)?;
                if gap < 0.0 {
                    return Err(CoreError::invalid_value(name, "gap cannot be negative"));
                }
                self.text_gap = gap;
            }
            "decimalPlaces" => {
                let places = value.expect_enum_index(name, 9)?;
                self.decimal_places = places as u8;
            }
            "textStyle" => {
                let style = value.expect_text(name)?;
                if style.is_empty() {
                    return Err(CoreError::invalid_value(name, "style name cannot be empty"));
                }
                self.text_style = style.to_string();
            }
            _ => return Err(CoreError::InvalidProperty(name.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_is_indelible() {
        assert!(DimStyle::standard().is_indelible());
        assert!(!DimStyle::new("ARCH").is_indelible());
    }

    #[test]
    fn test_decimal_places_range() {
        let mut style = DimStyle::new("ARCH");
        style
            .set_property("decimalPlaces", &PropertyValue::Number(4.0))
            .unwrap();
        assert_eq!(style.decimal_places, 4);
        assert!(style
            .set_property("decimalPlaces", &PropertyValue::Number(9.0))
            .is_err());
    }

    #[test]
    fn test_scale_positive() {
        let mut style = DimStyle::new("ARCH");
        assert!(style
            .set_property("scale", &PropertyValue::Number(-1.0))
            .is_err());
    }
}
