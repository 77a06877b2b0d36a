//! Style registries.
//!
//! A drawing carries four registries: layers, text styles, dimension
//! styles and line types.  They share the generic lifecycle in
//! [`registry`] and each guarantees its mandatory built-in items exist
//! from creation.

pub mod dim_style;
pub mod layer;
pub mod line_type;
pub mod registry;
pub mod text_style;

pub use dim_style::DimStyle;
pub use layer::Layer;
pub use line_type::{LineType, LineTypeManager, INDELIBLE_LINE_TYPES};
pub use registry::{StyleItem, StyleRegistry, StyleSnapshot};
pub use text_style::TextStyle;

use crate::error::Result;

/// Identifies one of the four registries, for undo records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryKind {
    Layers,
    TextStyles,
    DimStyles,
    LineTypes,
}

/// A point-in-time copy of one registry
#[derive(Debug, Clone)]
pub enum RegistrySnapshot {
    Layers(StyleSnapshot<Layer>),
    TextStyles(StyleSnapshot<TextStyle>),
    DimStyles(StyleSnapshot<DimStyle>),
    LineTypes(StyleSnapshot<LineType>),
}

impl RegistrySnapshot {
    /// Which registry this snapshot belongs to
    pub fn kind(&self) -> RegistryKind {
        match self {
            RegistrySnapshot::Layers(_) => RegistryKind::Layers,
            RegistrySnapshot::TextStyles(_) => RegistryKind::TextStyles,
            RegistrySnapshot::DimStyles(_) => RegistryKind::DimStyles,
            RegistrySnapshot::LineTypes(_) => RegistryKind::LineTypes,
        }
    }
}

/// The four style registries of a drawing
#[derive(Debug, Clone)]
pub struct StyleManagers {
    pub layers: StyleRegistry<Layer>,
    pub text_styles: StyleRegistry<TextStyle>,
    pub dim_styles: StyleRegistry<DimStyle>,
    pub line_types: LineTypeManager,
}

impl StyleManagers {
    /// Create the registries with their mandatory defaults current
    pub fn new() -> Result<Self> {
        let mut layers = StyleRegistry::new("layer");
        layers.add_item(Layer::zero())?;

        let mut text_styles = StyleRegistry::new("text style");
        text_styles.add_item(TextStyle::standard())?;

        let mut dim_styles = StyleRegistry::new("dimension style");
        dim_styles.add_item(DimStyle::standard())?;

        Ok(StyleManagers {
            layers,
            text_styles,
            dim_styles,
            line_types: LineTypeManager::new()?,
        })
    }

    /// Capture one registry for an undo record
    pub fn snapshot(&self, kind: RegistryKind) -> RegistrySnapshot {
        match kind {
            RegistryKind::Layers => RegistrySnapshot::Layers(self.layers.snapshot()),
            RegistryKind::TextStyles => RegistrySnapshot::TextStyles(self.text_styles.snapshot()),
            RegistryKind::DimStyles => RegistrySnapshot::DimStyles(self.dim_styles.snapshot()),
            RegistryKind::LineTypes => RegistrySnapshot::LineTypes(self.line_types.snapshot()),
        }
    }

    /// Restore one registry from an undo record
    pub fn restore(&mut self, snapshot: &RegistrySnapshot) {
        match snapshot {
            RegistrySnapshot::Layers(snap) => self.layers.restore(snap),
            RegistrySnapshot::TextStyles(snap) => self.text_styles.restore(snap),
            RegistrySnapshot::DimStyles(snap) => self.dim_styles.restore(snap),
            RegistrySnapshot::LineTypes(snap) => self.line_types.restore(snap),
        }
    }
}
