//! Single-line text entity

use super::{EntityCommon, PropertyValue};
use crate::error::{CoreError, Result};
use crate::types::Vector2;

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlignment {
    /// Aligned to the left of the insertion point
    #[default]
    Left,
    /// Centred on the insertion point
    Centre,
    /// Aligned to the right of the insertion point
    Right,
}

impl HorizontalAlignment {
    /// All variants, indexable by the UI model position
    pub const ALL: [HorizontalAlignment; 3] = [
        HorizontalAlignment::Left,
        HorizontalAlignment::Centre,
        HorizontalAlignment::Right,
    ];

    /// Model index of this variant
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|v| v == self).unwrap_or(0)
    }
}

/// Vertical text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlignment {
    /// On the text baseline
    #[default]
    Baseline,
    /// Below the insertion point
    Bottom,
    /// Centred vertically
    Middle,
    /// Above the insertion point
    Top,
}

impl VerticalAlignment {
    /// All variants, indexable by the UI model position
    pub const ALL: [VerticalAlignment; 4] = [
        VerticalAlignment::Baseline,
        VerticalAlignment::Bottom,
        VerticalAlignment::Middle,
        VerticalAlignment::Top,
    ];

    /// Model index of this variant
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|v| v == self).unwrap_or(0)
    }
}

/// A single-line text entity
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    /// Common entity data
    pub common: EntityCommon,
    /// Insertion point
    pub insertion: Vector2,
    /// Text height
    pub height: f64,
    /// Rotation in degrees
    pub rotation: f64,
    /// Text content
    pub string: String,
    /// Text style reference by name
    pub style_name: String,
    /// Horizontal alignment
    pub horizontal_alignment: HorizontalAlignment,
    /// Vertical alignment
    pub vertical_alignment: VerticalAlignment,
}

impl Text {
    /// Create a new text entity
    pub fn new(insertion: Vector2, height: f64, string: impl Into<String>) -> Self {
        Text {
            common: EntityCommon::new(),
            insertion,
            height,
            rotation: 0.0,
            string: string.into(),
            style_name: "STANDARD".to_string(),
            horizontal_alignment: HorizontalAlignment::default(),
            vertical_alignment: VerticalAlignment::default(),
        }
    }

    /// Translate the text by an offset
    pub fn translate(&mut self, offset: Vector2) {
        self.insertion = self.insertion + offset;
    }

    pub(super) const EXTRA_PROPERTIES: &'static [&'static str] = &[
        "string",
        "height",
        "rotation",
        "styleName",
        "horizontalAlignment",
        "verticalAlignment",
    ];

    pub(super) fn get_extra_property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "string" => Some(PropertyValue::Text(self.string.clone())),
            "height" => Some(PropertyValue::Number(self.height)),
            "rotation" => Some(PropertyValue::Number(self.rotation)),
            "styleName" => Some(PropertyValue::Text(self.style_name.clone())),
            "horizontalAlignment" => {
                Some(PropertyValue::Number(self.horizontal_alignment.index() as f64))
            }
            "verticalAlignment" => {
                Some(PropertyValue::Number(self.vertical_alignment.index() as f64))
            }
            _ => None,
        }
    }

    pub(super) fn set_extra_property(&mut self, name: &str, value: &PropertyValue) -> Result<()> {
        match name {
            "string" => self.string = value.expect_text(name)?.to_string(),
            "height" => self.height = value.expect_positive(name)?,
            "rotation" => self.rotation = value.expect_number(name)?,
            "styleName" => {
                let style = value.expect_text(name)?;
                if style.is_empty() {
                    return Err(CoreError::invalid_value(name, "style name cannot be empty"));
                }
                self.style_name = style.to_string();
            }
            "horizontalAlignment" => {
                let index = value.expect_enum_index(name, HorizontalAlignment::ALL.len())?;
                self.horizontal_alignment = HorizontalAlignment::ALL[index];
            }
            "verticalAlignment" => {
                let index = value.expect_enum_index(name, VerticalAlignment::ALL.len())?;
                self.vertical_alignment = VerticalAlignment::ALL[index];
            }
            _ => return Err(CoreError::InvalidProperty(name.to_string())),
        }
        Ok(())
    }
}
