//! Paper sizes, orientation and the resolved page profile.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A supported paper size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    /// ISO A3 (297 x 420 mm)
    A3,
    /// ISO A4 (210 x 297 mm)
    #[default]
    A4,
    /// US Letter (216 x 279 mm)
    Letter,
    /// US Tabloid (279.4 x 431.8 mm)
    Tabloid,
}

impl PaperSize {
    /// All supported sizes.
    pub const ALL: [PaperSize; 4] = [
        PaperSize::A3,
        PaperSize::A4,
        PaperSize::Letter,
        PaperSize::Tabloid,
    ];

    /// Portrait (width, height) in millimetres.
    pub fn dimensions_mm(self) -> (f64, f64) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::Letter => (216.0, 279.0),
            PaperSize::Tabloid => (279.4, 431.8),
        }
    }

    /// Layout constant class for this size.
    pub fn size_class(self) -> SizeClass {
        match self {
            PaperSize::A3 | PaperSize::Tabloid => SizeClass::Large,
            PaperSize::A4 | PaperSize::Letter => SizeClass::Small,
        }
    }

    /// Lowercase name, as used on the command line and by vpype.
    pub fn name(self) -> &'static str {
        match self {
            PaperSize::A3 => "a3",
            PaperSize::A4 => "a4",
            PaperSize::Letter => "letter",
            PaperSize::Tabloid => "tabloid",
        }
    }

    /// Resolve a size name, falling back to A4 with a warning.
    ///
    /// An unknown size never fails a build.
    pub fn resolve(name: Option<&str>) -> Self {
        match name {
            None => {
                log::debug!("No paper size given, using A4");
                PaperSize::A4
            }
            Some(name) => name.parse().unwrap_or_else(|e: Error| {
                log::warn!("{}; defaulting to A4", e);
                PaperSize::A4
            }),
        }
    }
}

impl FromStr for PaperSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a3" => Ok(PaperSize::A3),
            "a4" => Ok(PaperSize::A4),
            "letter" => Ok(PaperSize::Letter),
            "tabloid" => Ok(PaperSize::Tabloid),
            _ => Err(Error::UnknownPaperSize(s.to_string())),
        }
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which constant table a paper size uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeClass {
    /// A3 and Tabloid
    Large,
    /// A4 and Letter
    Small,
}

/// Page orientation.
///
/// Deserializes through [`FromStr`], so `"Landscape"` reads like `"landscape"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Orientation {
    /// Height exceeds width
    #[default]
    Portrait,
    /// Width and height swapped
    Landscape,
}

impl TryFrom<String> for Orientation {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            _ => Err(Error::Other(format!("Unknown orientation: {:?}", s))),
        }
    }
}

/// The resolved page: size, orientation and millimetre dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaperProfile {
    /// Named size
    pub size: PaperSize,
    /// Orientation
    pub orientation: Orientation,
    /// Page width in millimetres
    pub width: f64,
    /// Page height in millimetres
    pub height: f64,
}

impl PaperProfile {
    /// Resolve a size and orientation into page dimensions.
    pub fn new(size: PaperSize, orientation: Orientation) -> Self {
        let (w, h) = size.dimensions_mm();
        let (width, height) = match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        };
        Self {
            size,
            orientation,
            width,
            height,
        }
    }

    /// Constant class of the underlying size.
    pub fn size_class(&self) -> SizeClass {
        self.size.size_class()
    }
}

impl Default for PaperProfile {
    fn default() -> Self {
        Self::new(PaperSize::A4, Orientation::Portrait)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sizes() {
        assert_eq!("a3".parse::<PaperSize>().unwrap(), PaperSize::A3);
        assert_eq!("Letter".parse::<PaperSize>().unwrap(), PaperSize::Letter);
        assert_eq!(" TABLOID ".parse::<PaperSize>().unwrap(), PaperSize::Tabloid);
        assert!(matches!(
            "a5".parse::<PaperSize>(),
            Err(Error::UnknownPaperSize(_))
        ));
    }

    #[test]
    fn test_resolve_falls_back_to_a4() {
        assert_eq!(PaperSize::resolve(Some("a5")), PaperSize::A4);
        assert_eq!(PaperSize::resolve(None), PaperSize::A4);
        assert_eq!(PaperSize::resolve(Some("a3")), PaperSize::A3);
    }

    #[test]
    fn test_size_classes() {
        assert_eq!(PaperSize::A3.size_class(), SizeClass::Large);
        assert_eq!(PaperSize::Tabloid.size_class(), SizeClass::Large);
        assert_eq!(PaperSize::A4.size_class(), SizeClass::Small);
        assert_eq!(PaperSize::Letter.size_class(), SizeClass::Small);
    }

    #[test]
    fn test_orientation_swaps_dimensions() {
        for size in PaperSize::ALL {
            let portrait = PaperProfile::new(size, Orientation::Portrait);
            let landscape = PaperProfile::new(size, Orientation::Landscape);
            assert_eq!(portrait.width, landscape.height);
            assert_eq!(portrait.height, landscape.width);
        }
    }

    #[test]
    fn test_orientation_parse() {
        assert_eq!(
            "Landscape".parse::<Orientation>().unwrap(),
            Orientation::Landscape
        );
        assert!("sideways".parse::<Orientation>().is_err());
    }
}
