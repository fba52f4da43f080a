//! Options for composing a drawing.

use std::path::PathBuf;

use super::LayoutConfig;
use crate::model::{BlueprintData, Orientation, PaperProfile, PaperSize};

/// Overrides applied on top of an input record.
#[derive(Debug, Clone, Default)]
pub struct ComposeOptions {
    /// Paper size, replacing the record's `paper_size`
    pub paper_size: Option<PaperSize>,

    /// Orientation, replacing the record's `orientation`
    pub orientation: Option<Orientation>,

    /// Inset artwork, replacing the record's `inset`
    pub inset: Option<PathBuf>,

    /// Layout constants, replacing the size-class table
    pub config: Option<LayoutConfig>,
}

impl ComposeOptions {
    /// Create options with no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the paper size.
    pub fn with_paper_size(mut self, size: PaperSize) -> Self {
        self.paper_size = Some(size);
        self
    }

    /// Set the orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    /// Landscape orientation.
    pub fn landscape(self) -> Self {
        self.with_orientation(Orientation::Landscape)
    }

    /// Set the inset artwork path.
    pub fn with_inset(mut self, path: impl Into<PathBuf>) -> Self {
        self.inset = Some(path.into());
        self
    }

    /// Set explicit layout constants.
    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Resolve the page for `data`, overrides first.
    pub fn paper_for(&self, data: &BlueprintData) -> PaperProfile {
        let size = self
            .paper_size
            .unwrap_or_else(|| PaperSize::resolve(data.paper_size.as_deref()));
        let orientation = self.orientation.or(data.orientation).unwrap_or_default();
        PaperProfile::new(size, orientation)
    }

    /// Layout constants for `paper`, overrides first.
    pub fn config_for(&self, paper: &PaperProfile) -> LayoutConfig {
        self.config
            .unwrap_or_else(|| LayoutConfig::for_class(paper.size_class()))
    }

    /// Inset path for `data`, overrides first.
    pub fn inset_for<'a>(&'a self, data: &'a BlueprintData) -> Option<&'a PathBuf> {
        self.inset.as_ref().or(data.inset.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_win() {
        let data = BlueprintData::new("Sloop")
            .with_paper_size("a3")
            .with_orientation(Orientation::Portrait);

        let paper = ComposeOptions::new().paper_for(&data);
        assert_eq!(paper.size, PaperSize::A3);

        let options = ComposeOptions::new()
            .with_paper_size(PaperSize::Letter)
            .landscape();
        let paper = options.paper_for(&data);
        assert_eq!(paper.size, PaperSize::Letter);
        assert_eq!((paper.width, paper.height), (279.0, 216.0));
        assert_eq!(options.config_for(&paper), LayoutConfig::small());
    }

    #[test]
    fn test_defaults() {
        let data = BlueprintData::new("Sloop");
        let options = ComposeOptions::default();
        let paper = options.paper_for(&data);
        assert_eq!(paper.size, PaperSize::A4);
        assert_eq!(paper.orientation, Orientation::Portrait);
        assert!(options.inset_for(&data).is_none());

        let options = options.with_config(LayoutConfig::label());
        assert_eq!(options.config_for(&paper).border_inset, 12.0);
    }
}
