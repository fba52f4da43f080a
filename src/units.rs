//! Length units and millimetre normalization.
//!
//! Every length that reaches layout arithmetic is normalized to millimetres
//! exactly once, at ingress. Two ingestion paths exist and they disagree on
//! what a bare number means:
//!
//! - [`Ingest::Conversion`] handles raw, image-derived SVGs (px to mm
//!   conversion, inset loading). A unit-less `width="800"` is pixels.
//! - [`Ingest::Inspection`] handles documents that are already laid out in
//!   millimetre user space. A unit-less `width="210"` is millimetres.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};

/// Millimetres per CSS pixel at 96 DPI (0.264583).
pub const MM_PER_PX: f64 = 25.4 / 96.0;

/// Millimetres per centimetre.
pub const MM_PER_CM: f64 = 10.0;

/// Millimetres per inch.
pub const MM_PER_IN: f64 = 25.4;

/// A length unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// CSS pixel (96 DPI)
    Pixel,
    /// Millimetre
    Millimeter,
    /// Centimetre
    Centimeter,
    /// Inch
    Inch,
    /// Unit-less document coordinate (1 unit = 1 mm in composed drawings)
    User,
}

impl Unit {
    /// Millimetres represented by one of this unit.
    pub fn mm_per_unit(self) -> f64 {
        match self {
            Unit::Pixel => MM_PER_PX,
            Unit::Millimeter | Unit::User => 1.0,
            Unit::Centimeter => MM_PER_CM,
            Unit::Inch => MM_PER_IN,
        }
    }

    /// Parse a unit suffix such as `px` or `MM`.
    ///
    /// Returns `None` for an empty or unrecognized suffix.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix.trim().to_ascii_lowercase().as_str() {
            "px" => Some(Unit::Pixel),
            "mm" => Some(Unit::Millimeter),
            "cm" => Some(Unit::Centimeter),
            "in" => Some(Unit::Inch),
            _ => None,
        }
    }

    /// The suffix written after a value in this unit.
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Pixel => "px",
            Unit::Millimeter => "mm",
            Unit::Centimeter => "cm",
            Unit::Inch => "in",
            Unit::User => "",
        }
    }
}

/// Which producer a length came from, deciding the default unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ingest {
    /// Raw image-derived documents: bare numbers are pixels.
    Conversion,
    /// Already normalized documents: bare numbers are millimetres.
    Inspection,
}

impl Ingest {
    /// Unit assumed when a length has no (or an unknown) suffix.
    pub fn default_unit(self) -> Unit {
        match self {
            Ingest::Conversion => Unit::Pixel,
            Ingest::Inspection => Unit::Millimeter,
        }
    }
}

/// A magnitude with a unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    /// Numeric magnitude
    pub value: f64,
    /// Unit of `value`
    pub unit: Unit,
}

impl Length {
    /// Create a new length.
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// A length in millimetres.
    pub fn mm(value: f64) -> Self {
        Self::new(value, Unit::Millimeter)
    }

    /// Zero millimetres.
    pub fn zero() -> Self {
        Self::mm(0.0)
    }

    /// Convert to millimetres.
    pub fn to_mm(self) -> Length {
        to_mm(self.value, self.unit)
    }

    /// Magnitude in millimetres.
    pub fn as_mm(self) -> f64 {
        self.value * self.unit.mm_per_unit()
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

/// Convert `value` expressed in `unit` to millimetres.
pub fn to_mm(value: f64, unit: Unit) -> Length {
    Length::mm(value * unit.mm_per_unit())
}

fn re_length() -> &'static Regex {
    static ONCE: OnceLock<Regex> = OnceLock::new();
    ONCE.get_or_init(|| {
        Regex::new(r"^\s*([+-]?(?:\d+\.\d*|\.\d+|\d+)(?:[eE][+-]?\d+)?)\s*([A-Za-z%]*)\s*$")
            .expect("length pattern is valid")
    })
}

/// Parse a length attribute such as `"210mm"`, `"800"` or `"8.5 in"`.
///
/// A missing or unknown suffix falls back to the ingestion path's default
/// unit. When the text has no clean numeric prefix, every non-numeric
/// character is stripped and the remainder parsed, with the unit guessed
/// from any suffix text present.
///
/// # Errors
///
/// Returns [`Error::MalformedLength`] when no number can be recovered.
pub fn parse_length(raw: &str, ingest: Ingest) -> Result<Length> {
    if let Some(caps) = re_length().captures(raw) {
        let value: f64 = caps[1]
            .parse()
            .map_err(|_| Error::MalformedLength(raw.to_string()))?;
        let suffix = caps.get(2).map_or("", |m| m.as_str());
        let unit = Unit::from_suffix(suffix).unwrap_or_else(|| {
            if !suffix.is_empty() {
                log::debug!(
                    "Unrecognized unit {:?} in {:?}, assuming {:?}",
                    suffix,
                    raw,
                    ingest.default_unit()
                );
            }
            ingest.default_unit()
        });
        return Ok(Length::new(value, unit));
    }

    let stripped: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let value: f64 = stripped
        .parse()
        .map_err(|_| Error::MalformedLength(raw.to_string()))?;
    let lower = raw.to_ascii_lowercase();
    let unit = ["cm", "mm", "in", "px"]
        .iter()
        .find(|s| lower.contains(*s))
        .and_then(|s| Unit::from_suffix(s))
        .unwrap_or_else(|| ingest.default_unit());
    log::debug!("Recovered {} from malformed length {:?}", value, raw);
    Ok(Length::new(value, unit))
}

/// Parse a length, substituting zero millimetres (with a warning) on failure.
pub fn length_or_zero(raw: &str, ingest: Ingest) -> Length {
    match parse_length(raw, ingest) {
        Ok(length) => length,
        Err(e) => {
            log::warn!("{}; using zero width", e);
            Length::zero()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_to_mm_factors() {
        assert!(approx(to_mm(96.0, Unit::Pixel).value, 25.4));
        assert!(approx(to_mm(1.0, Unit::Pixel).value, 0.2645833333));
        assert!(approx(to_mm(2.5, Unit::Centimeter).value, 25.0));
        assert!(approx(to_mm(2.0, Unit::Inch).value, 50.8));
        assert!(approx(to_mm(42.0, Unit::Millimeter).value, 42.0));
        assert_eq!(to_mm(1.0, Unit::Inch).unit, Unit::Millimeter);
    }

    #[test]
    fn test_parse_with_suffix() {
        let l = parse_length("210mm", Ingest::Conversion).unwrap();
        assert_eq!(l, Length::mm(210.0));

        let l = parse_length(" 8.5in ", Ingest::Inspection).unwrap();
        assert_eq!(l.unit, Unit::Inch);
        assert!(approx(l.as_mm(), 215.9));

        let l = parse_length("30CM", Ingest::Inspection).unwrap();
        assert_eq!(l.unit, Unit::Centimeter);
    }

    #[test]
    fn test_ingest_defaults_differ() {
        let converted = parse_length("800", Ingest::Conversion).unwrap();
        assert_eq!(converted.unit, Unit::Pixel);

        let inspected = parse_length("800", Ingest::Inspection).unwrap();
        assert_eq!(inspected.unit, Unit::Millimeter);

        assert!(converted.as_mm() < inspected.as_mm());
    }

    #[test]
    fn test_unknown_suffix_uses_default() {
        let l = parse_length("100%", Ingest::Inspection).unwrap();
        assert_eq!(l, Length::mm(100.0));
    }

    #[test]
    fn test_malformed_recovery() {
        let l = parse_length("w=12.5px;", Ingest::Inspection).unwrap();
        assert_eq!(l.unit, Unit::Pixel);
        assert!(approx(l.value, 12.5));
    }

    #[test]
    fn test_malformed_error_and_fallback() {
        let err = parse_length("auto", Ingest::Conversion).unwrap_err();
        assert!(matches!(err, Error::MalformedLength(_)));

        assert_eq!(length_or_zero("auto", Ingest::Conversion), Length::zero());
        assert_eq!(length_or_zero("", Ingest::Inspection), Length::zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(Length::new(12.5, Unit::Centimeter).to_string(), "12.5cm");
        assert_eq!(Length::new(3.0, Unit::User).to_string(), "3");
    }
}
