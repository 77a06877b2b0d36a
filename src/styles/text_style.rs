//! Text style table item

use super::registry::StyleItem;
use crate::entities::PropertyValue;
use crate::error::{CoreError, Result};

/// A named text style referenced by text entities.
///
/// `text_height` of zero means the height is not fixed and each text
/// entity supplies its own.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Style name
    pub name: String,
    /// Font family name
    pub font: String,
    /// Fixed text height, 0 when per-entity
    pub text_height: f64,
    /// Character width factor
    pub width_factor: f64,
    /// Oblique (slant) angle in degrees
    pub oblique_angle: f64,
    /// Mirrored left to right
    pub backwards: bool,
    /// Mirrored top to bottom
    pub upside_down: bool,
    /// Drawn top to bottom
    pub vertical: bool,
}

impl TextStyle {
    /// Create a text style with default attributes
    pub fn new(name: impl Into<String>) -> Self {
        TextStyle {
            name: name.into(),
            font: "Arial".to_string(),
            text_height: 0.0,
            width_factor: 1.0,
            oblique_angle: 0.0,
            backwards: false,
            upside_down: false,
            vertical: false,
        }
    }

    /// The mandatory STANDARD style
    pub fn standard() -> Self {
        TextStyle::new("STANDARD")
    }
}

impl StyleItem for TextStyle {
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
        "NEW_STYLE"
    }

    fn with_name(name: String) -> Self {
        TextStyle::new(name)
    }

    fn get_property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "name" => Some(PropertyValue::Text(self.name.clone())),
            "font" => Some(PropertyValue::Text(self.font.clone())),
            "textHeight" => Some(PropertyValue::Number(self.text_height)),
            "widthFactor" => Some(PropertyValue::Number(self.width_factor)),
            "obliqueAngle" => Some(PropertyValue::Number(self.oblique_angle)),
            "backwards" => Some(PropertyValue::Boolean(self.backwards)),
            "upsideDown" => Some(PropertyValue::Boolean(self.upside_down)),
            "vertical" => Some(PropertyValue::Boolean(self.vertical)),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: &PropertyValue) -> Result<()> {
        match name {
            "font" => {
                let font = value.expect_text(name)?;
                if font.is_empty() {
                    return Err(CoreError::invalid_value(name, "font cannot be empty"));
                }
                self.font = font.to_string();
            }
            "textHeight" => {
                let height = value.expect_number(name)?;
                if height < 0.0 {
                    return Err(CoreError::invalid_value(name, "height cannot be negative"));
                }
                self.text_height = height;
            }
            "widthFactor" => self.width_factor = value.expect_positive(name)?,
            "obliqueAngle" => self.oblique_angle = value.expect_number(name)?,
            "backwards" => self.backwards = value.expect_boolean(name)?,
            "upsideDown" => self.upside_down = value.expect_boolean(name)?,
            "vertical" => self.vertical = value.expect_boolean(name)?,
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
        assert!(TextStyle::standard().is_indelible());
        assert!(TextStyle::new("Standard").is_indelible());
        assert!(!TextStyle::new("NOTES").is_indelible());
    }

    #[test]
    fn test_zero_height_allowed() {
        let mut style = TextStyle::new("NOTES");
        style
            .set_property("textHeight", &PropertyValue::Number(0.0))
            .unwrap();
        assert!(style
            .set_property("textHeight", &PropertyValue::Number(-1.0))
            .is_err());
    }

    #[test]
    fn test_width_factor_positive() {
        let mut style = TextStyle::new("NOTES");
        assert!(style
            .set_property("widthFactor", &PropertyValue::Number(0.0))
            .is_err());
        assert_eq!(style.width_factor, 1.0);
    }
}
