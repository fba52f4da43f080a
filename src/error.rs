//! Error types for the drawscape library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for drawscape operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while composing or processing drawings.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An input file does not exist.
    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Structured data or vector markup could not be parsed.
    #[error("Malformed input in {path}: {reason}")]
    MalformedInput {
        /// Offending path (or `<memory>` for in-memory sources)
        path: String,
        /// Parser diagnostic
        reason: String,
    },

    /// A length attribute carried no recoverable number.
    #[error("Malformed length: {0:?}")]
    MalformedLength(String),

    /// No coordinates could be extracted to form a bounding box.
    #[error("Unresolvable bounding box: {0}")]
    UnresolvableBoundingBox(String),

    /// The paper size name is not one of the supported sizes.
    #[error("Unknown paper size: {0:?}")]
    UnknownPaperSize(String),

    /// Stroke font could not be loaded.
    #[error("Font error: {0}")]
    Font(String),

    /// The plotter estimate could not be produced.
    #[error("Plotter error: {0}")]
    Plotter(String),

    /// The external path optimizer failed.
    #[error("Optimizer failed (status {}): {output}", .status.map_or_else(|| "none".to_string(), |s| s.to_string()))]
    Optimizer {
        /// Exit status of the process, if it ran at all
        status: Option<i32>,
        /// Captured diagnostic output
        output: String,
    },

    /// Error while producing output.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build a [`Error::MalformedInput`] for the given source path.
    pub fn malformed(path: impl Into<String>, reason: impl ToString) -> Self {
        Error::MalformedInput {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether layout can continue after logging this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::MalformedLength(_)
                | Error::UnresolvableBoundingBox(_)
                | Error::UnknownPaperSize(_)
                | Error::Plotter(_)
        )
    }
}
