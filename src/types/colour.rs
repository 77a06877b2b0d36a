//! Colour representation for drawing entities

use std::fmt;

/// Represents an entity or layer colour.
///
/// Colours can be represented in multiple ways:
/// - By index (1-255): AutoCAD Colour Index (ACI)
/// - By RGB values: true colour
/// - By layer: use the layer's colour
/// - By block: use the block's colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Colour {
    /// Colour by layer (index 256)
    #[default]
    ByLayer,
    /// Colour by block (index 0)
    ByBlock,
    /// AutoCAD Colour Index (1-255)
    Index(u8),
    /// True colour with RGB values
    Rgb { r: u8, g: u8, b: u8 },
}

impl Colour {
    /// Create a colour from an AutoCAD Colour Index
    pub fn from_index(index: i16) -> Self {
        match index {
            0 => Colour::ByBlock,
            256 => Colour::ByLayer,
            1..=255 => Colour::Index(index as u8),
            // Negative means the layer is off; the sign is carried separately
            _ if index < 0 => Colour::Index((-index).min(255) as u8),
            _ => Colour::Index(7),
        }
    }

    /// Create a true colour from RGB values
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Colour::Rgb { r, g, b }
    }

    /// Get RGB values (if applicable)
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        match self {
            Colour::Rgb { r, g, b } => Some((*r, *g, *b)),
            _ => None,
        }
    }

    /// Check whether this is one of the ByLayer/ByBlock sentinels
    pub fn is_by_reference(&self) -> bool {
        matches!(self, Colour::ByLayer | Colour::ByBlock)
    }

    /// Common colour constants
    pub const RED: Colour = Colour::Index(1);
    pub const YELLOW: Colour = Colour::Index(2);
    pub const GREEN: Colour = Colour::Index(3);
    pub const CYAN: Colour = Colour::Index(4);
    pub const BLUE: Colour = Colour::Index(5);
    pub const MAGENTA: Colour = Colour::Index(6);
    pub const WHITE: Colour = Colour::Index(7);

    /// Approximate this colour to the nearest ACI index.
    ///
    /// Used when writing to DXF versions without true-colour support.
    pub fn approximate_index(&self) -> i16 {
        match self {
            Colour::ByBlock => 0,
            Colour::ByLayer => 256,
            Colour::Index(i) => *i as i16,
            Colour::Rgb { r, g, b } => {
                let brightness = ((*r as u16) + (*g as u16) + (*b as u16)) / 3;
                if brightness < 32 {
                    8 // dark gray
                } else if brightness > 224 {
                    7 // white
                } else if *r > *g && *r > *b {
                    1 // red
                } else if *g > *r && *g > *b {
                    3 // green
                } else if *b > *r && *b > *g {
                    5 // blue
                } else if *r > 128 && *g > 128 {
                    2 // yellow
                } else if *g > 128 && *b > 128 {
                    4 // cyan
                } else if *r > 128 && *b > 128 {
                    6 // magenta
                } else {
                    7 // white
                }
            }
        }
    }

    /// Pack a true colour into the DXF group 420 representation
    pub fn as_true_colour(&self) -> Option<u32> {
        self.rgb()
            .map(|(r, g, b)| ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Unpack a DXF group 420 value into a true colour
    pub fn from_true_colour(value: u32) -> Self {
        Colour::Rgb {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Colour::ByLayer => write!(f, "ByLayer"),
            Colour::ByBlock => write!(f, "ByBlock"),
            Colour::Index(i) => write!(f, "Index({})", i),
            Colour::Rgb { r, g, b } => write!(f, "RGB({}, {}, {})", r, g, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index() {
        assert_eq!(Colour::from_index(0), Colour::ByBlock);
        assert_eq!(Colour::from_index(256), Colour::ByLayer);
        assert_eq!(Colour::from_index(1), Colour::RED);
        assert_eq!(Colour::from_index(-7), Colour::Index(7));
    }

    #[test]
    fn test_true_colour_roundtrip() {
        let c = Colour::from_rgb(10, 20, 30);
        let packed = c.as_true_colour().unwrap();
        assert_eq!(Colour::from_true_colour(packed), c);
    }

    #[test]
    fn test_approximate_index() {
        assert_eq!(Colour::ByLayer.approximate_index(), 256);
        assert_eq!(Colour::from_rgb(255, 0, 0).approximate_index(), 1);
        assert_eq!(Colour::from_rgb(0, 0, 255).approximate_index(), 5);
    }

    #[test]
    fn test_display() {
        assert_eq!(Colour::ByLayer.to_string(), "ByLayer");
        assert_eq!(Colour::from_rgb(1, 2, 3).to_string(), "RGB(1, 2, 3)");
    }
}
