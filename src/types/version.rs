//! DXF version codes

use crate::error::{CoreError, Result};
use std::fmt;

/// Supported DXF file versions.
///
/// Ordering follows release order, so version gates can use comparisons
/// (`version >= DxfVersion::AC1015`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DxfVersion {
    /// AutoCAD R12
    AC1009,
    /// AutoCAD 2000
    AC1015,
    /// AutoCAD 2004
    AC1018,
    /// AutoCAD 2007
    AC1021,
    /// AutoCAD 2010
    AC1024,
    /// AutoCAD 2013
    AC1027,
    /// AutoCAD 2018
    AC1032,
}

impl DxfVersion {
    /// All supported versions in release order
    pub const ALL: [DxfVersion; 7] = [
        DxfVersion::AC1009,
        DxfVersion::AC1015,
        DxfVersion::AC1018,
        DxfVersion::AC1021,
        DxfVersion::AC1024,
        DxfVersion::AC1027,
        DxfVersion::AC1032,
    ];

    /// The `$ACADVER` code for this version
    pub fn code(&self) -> &'static str {
        match self {
            DxfVersion::AC1009 => "AC1009",
            DxfVersion::AC1015 => "AC1015",
            DxfVersion::AC1018 => "AC1018",
            DxfVersion::AC1021 => "AC1021",
            DxfVersion::AC1024 => "AC1024",
            DxfVersion::AC1027 => "AC1027",
            DxfVersion::AC1032 => "AC1032",
        }
    }

    /// Human-readable release label
    pub fn label(&self) -> &'static str {
        match self {
            DxfVersion::AC1009 => "R12",
            DxfVersion::AC1015 => "2000",
            DxfVersion::AC1018 => "2004",
            DxfVersion::AC1021 => "2007",
            DxfVersion::AC1024 => "2010",
            DxfVersion::AC1027 => "2013",
            DxfVersion::AC1032 => "2018",
        }
    }

    /// Parse an `$ACADVER` code
    pub fn from_code(code: &str) -> Result<Self> {
        match code.trim() {
            "AC1009" => Ok(DxfVersion::AC1009),
            // R13/R14 files are read with the R2000 grammar subset
            "AC1012" | "AC1014" | "AC1015" => Ok(DxfVersion::AC1015),
            "AC1018" => Ok(DxfVersion::AC1018),
            "AC1021" => Ok(DxfVersion::AC1021),
            "AC1024" => Ok(DxfVersion::AC1024),
            "AC1027" => Ok(DxfVersion::AC1027),
            "AC1032" => Ok(DxfVersion::AC1032),
            other => Err(CoreError::UnsupportedVersion(other.to_string())),
        }
    }

    /// True-colour (group 420) support arrived with AC1018
    pub fn supports_true_colour(&self) -> bool {
        *self >= DxfVersion::AC1018
    }

    /// LWPOLYLINE, lineweights and HATCH arrived with AC1015
    pub fn supports_lwpolyline(&self) -> bool {
        *self >= DxfVersion::AC1015
    }
}

impl Default for DxfVersion {
    fn default() -> Self {
        DxfVersion::AC1015
    }
}

impl fmt::Display for DxfVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for v in DxfVersion::ALL {
            assert_eq!(DxfVersion::from_code(v.code()).unwrap(), v);
        }
    }

    #[test]
    fn test_unknown_code() {
        assert!(DxfVersion::from_code("AC9999").is_err());
    }

    #[test]
    fn test_ordering_gates() {
        assert!(!DxfVersion::AC1009.supports_lwpolyline());
        assert!(DxfVersion::AC1015.supports_lwpolyline());
        assert!(!DxfVersion::AC1015.supports_true_colour());
        assert!(DxfVersion::AC1018.supports_true_colour());
    }

    #[test]
    fn test_r13_mapped_to_r2000() {
        assert_eq!(
            DxfVersion::from_code("AC1014").unwrap(),
            DxfVersion::AC1015
        );
    }
}
