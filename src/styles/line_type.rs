//! Line type table item and its registry wrapper

use once_cell::sync::Lazy;

use super::registry::{StyleItem, StyleRegistry};
use crate::entities::PropertyValue;
use crate::error::{CoreError, Result};

/// Names that are always present and can never be removed or renamed
pub const INDELIBLE_LINE_TYPES: [&str; 3] = ["ByLayer", "ByBlock", "Continuous"];

/// A named dash pattern referenced by layers and entities.
///
/// Pattern elements follow the DXF convention: positive lengths are
/// dashes, negative lengths are gaps and zero is a dot.  An empty
/// pattern draws a continuous line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineType {
    /// Line type name
    pub name: String,
    /// Human-readable description, e.g. `"__ __ __"`
    pub description: String,
    /// Dash pattern elements
    pub pattern: Vec<f64>,
}

impl LineType {
    /// Create a line type with the given pattern
    pub fn new(name: impl Into<String>, description: impl Into<String>, pattern: Vec<f64>) -> Self {
        LineType {
            name: name.into(),
            description: description.into(),
            pattern,
        }
    }

    /// Create a continuous (unpatterned) line type
    pub fn continuous(name: impl Into<String>) -> Self {
        LineType::new(name, "Solid line", Vec::new())
    }

    /// Total length of one pattern repeat
    pub fn pattern_length(&self) -> f64 {
        self.pattern.iter().map(|e| e.abs()).sum()
    }

    /// Whether the line is drawn without a pattern
    pub fn is_continuous(&self) -> bool {
        self.pattern.is_empty()
    }
}

impl StyleItem for LineType {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn is_indelible(&self) -> bool {
        INDELIBLE_LINE_TYPES
            .iter()
            .any(|n| n.eq_ignore_ascii_case(&self.name))
    }

    fn default_base_name() -> &'static str {
        "NEW_LINETYPE"
    }

    fn with_name(name: String) -> Self {
        LineType::continuous(name)
    }

    fn get_property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "name" => Some(PropertyValue::Text(self.name.clone())),
            "description" => Some(PropertyValue::Text(self.description.clone())),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: &PropertyValue) -> Result<()> {
        match name {
            "description" => self.description = value.expect_text(name)?.to_string(),
            _ => return Err(CoreError::InvalidProperty(name.to_string())),
        }
        Ok(())
    }
}

/// Predefined patterns a drawing can load on demand
static OPTIONAL_LINE_TYPES: Lazy<Vec<LineType>> = Lazy::new(|| {
    vec![
        LineType::new("Dashed", "__ __ __ __ __", vec![12.0, -6.0]),
        LineType::new("Dotted", ". . . . . . . .", vec![0.0, -6.0]),
        LineType::new("DashDot", "__ . __ . __ .", vec![12.0, -6.0, 0.0, -6.0]),
        LineType::new("Center", "____ _ ____ _", vec![32.0, -6.0, 6.0, -6.0]),
        LineType::new("Hidden", "__ __ __ __", vec![6.0, -3.0]),
    ]
});

/// Line type registry with the catalogue of loadable predefined patterns.
///
/// Dereferences to [`StyleRegistry`] for the shared registry operations.
#[derive(Debug, Clone)]
pub struct LineTypeManager {
    registry: StyleRegistry<LineType>,
}

impl LineTypeManager {
    /// Create a manager holding the mandatory line types, with ByLayer current
    pub fn new() -> Result<Self> {
        let mut registry = StyleRegistry::new("line type");
        registry.add_item(LineType::new("ByLayer", "", Vec::new()))?;
        registry.add_item(LineType::new("ByBlock", "", Vec::new()))?;
        registry.add_item(LineType::continuous("Continuous"))?;
        registry.set_cstyle("ByLayer")?;
        Ok(LineTypeManager { registry })
    }

    /// Predefined patterns available to load, whether or not already loaded
    pub fn optional_styles(&self) -> &'static [LineType] {
        &OPTIONAL_LINE_TYPES
    }

    /// Load a predefined pattern into the drawing.
    ///
    /// Loading an already present name is a no-op.
    pub fn add_item(&mut self, style: &LineType) -> Result<()> {
        if self.registry.item_exists(&style.name) {
            return Ok(());
        }
        self.registry.add_item(style.clone())?;
        Ok(())
    }

    /// Names that must always exist in the drawing
    pub fn indelible_items(&self) -> &'static [&'static str] {
        &INDELIBLE_LINE_TYPES
    }
}

impl std::ops::Deref for LineTypeManager {
    type Target = StyleRegistry<LineType>;

    fn deref(&self) -> &Self::Target {
        &self.registry
    }
}

impl std::ops::DerefMut for LineTypeManager {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manager_defaults() {
        let manager = LineTypeManager::new().unwrap();
        assert_eq!(manager.item_count(), 3);
        assert_eq!(manager.get_cstyle(), "ByLayer");
        assert!(manager.item_exists("CONTINUOUS"));
    }

    #[test]
    fn test_mandatory_names_protected() {
        let mut manager = LineTypeManager::new().unwrap();
        let index = manager.item_index("Continuous").unwrap();
        assert!(manager.delete_style(index).is_err());
        assert!(manager.rename_style(index, "SOLID").is_err());
    }

    #[test]
    fn test_load_optional_style() {
        let mut manager = LineTypeManager::new().unwrap();
        let dashed = manager.optional_styles()[0].clone();
        manager.add_item(&dashed).unwrap();
        assert!(manager.item_exists("Dashed"));
        // loading again is harmless
        manager.add_item(&dashed).unwrap();
        assert_eq!(manager.item_count(), 4);
    }

    #[test]
    fn test_pattern_length() {
        let lt = LineType::new("Dashed", "", vec![12.0, -6.0]);
        assert_eq!(lt.pattern_length(), 18.0);
        assert!(!lt.is_continuous());
        assert!(LineType::continuous("Continuous").is_continuous());
    }
}
