//! Structured input records.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::Orientation;
use crate::error::{Error, Result};

/// One legend row: a label and its value, rendered left to right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendRow {
    /// Left column text (`label` in JSON)
    #[serde(rename = "label", alias = "name")]
    pub name: String,
    /// Right column text
    pub detail: String,
}

impl LegendRow {
    /// Create a legend row.
    pub fn new(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            detail: detail.into(),
        }
    }
}

/// Input for a blueprint drawing.
///
/// ```
/// use drawscape::BlueprintData;
///
/// let data = BlueprintData::from_json_str(r#"{
///     "title": "Sloop",
///     "specifications": [{"label": "LOA", "detail": "32ft"}]
/// }"#).unwrap();
/// assert_eq!(data.specifications.len(), 1);
/// assert!(data.subtitle().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlueprintData {
    /// Drawing title (rendered upper-case)
    #[serde(default)]
    pub title: String,

    /// Optional subtitle
    #[serde(default)]
    pub subtitle: Option<String>,

    /// Legend rows, in display order
    #[serde(default)]
    pub specifications: Vec<LegendRow>,

    /// Paper size name (`a3`, `a4`, `letter`, `tabloid`)
    #[serde(default)]
    pub paper_size: Option<String>,

    /// Page orientation
    #[serde(default)]
    pub orientation: Option<Orientation>,

    /// Vector artwork to inset into the page
    #[serde(default)]
    pub inset: Option<PathBuf>,
}

impl BlueprintData {
    /// Create input with just a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Append a legend row.
    pub fn with_row(mut self, name: impl Into<String>, detail: impl Into<String>) -> Self {
        self.specifications.push(LegendRow::new(name, detail));
        self
    }

    /// Set the paper size name.
    pub fn with_paper_size(mut self, size: impl Into<String>) -> Self {
        self.paper_size = Some(size.into());
        self
    }

    /// Set the orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    /// The subtitle, treating an empty string as absent.
    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref().filter(|s| !s.is_empty())
    }

    /// Parse input from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        parse_json(json, "<memory>")
    }

    /// Load input from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_json(path.as_ref())
    }
}

/// Input for a shipping label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingData {
    /// Recipient name
    #[serde(default = "not_available")]
    pub to_name: String,
    /// Recipient street address
    #[serde(default = "not_available")]
    pub to_address: String,
    /// Recipient city line
    #[serde(default = "not_available")]
    pub to_city: String,
}

fn not_available() -> String {
    "N/A".to_string()
}

impl Default for ShippingData {
    fn default() -> Self {
        Self {
            to_name: not_available(),
            to_address: not_available(),
            to_city: not_available(),
        }
    }
}

impl ShippingData {
    /// Parse input from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        parse_json(json, "<memory>")
    }

    /// Load input from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_json(path.as_ref())
    }

    /// Recipient lines, top to bottom.
    pub fn recipient_lines(&self) -> [&str; 3] {
        [&self.to_name, &self.to_address, &self.to_city]
    }
}

fn parse_json<T: DeserializeOwned>(json: &str, origin: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| Error::malformed(origin, e))
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(Error::InputNotFound(path.to_path_buf()));
    }
    let json = fs::read_to_string(path)?;
    parse_json(&json, &path.display().to_string())
}
