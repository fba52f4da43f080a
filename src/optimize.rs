//! Out-of-process path optimization with `vpype`.
//!
//! The optimizer merges and simplifies lines, sorts them to cut pen-up
//! travel, and refits the drawing to a paper size. It runs as a
//! subprocess and is treated as opaque: it either produces the output file
//! or fails with its captured output.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};
use crate::model::PaperSize;

/// Builds and runs the `vpype` optimization pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PathOptimizer {
    /// Program to run
    pub program: PathBuf,
    /// Target paper size
    pub paper: PaperSize,
    /// Margin kept by `layout --fit-to-margins`
    pub margin: String,
}

impl Default for PathOptimizer {
    fn default() -> Self {
        Self {
            program: PathBuf::from("vpype"),
            paper: PaperSize::Tabloid,
            margin: "2cm".to_string(),
        }
    }
}

impl PathOptimizer {
    /// Create an optimizer targeting Tabloid paper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the program to run.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Set the target paper size.
    pub fn with_paper(mut self, paper: PaperSize) -> Self {
        self.paper = paper;
        self
    }

    /// Set the layout margin (a vpype length such as `2cm`).
    pub fn with_margin(mut self, margin: impl Into<String>) -> Self {
        self.margin = margin.into();
        self
    }

    /// Where the optimized drawing for `input` is written:
    /// `<stem>_<paper>_optimized.svg` next to it.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        crate::svg::sibling_path(input, &format!("_{}_optimized", self.paper.name()))
    }

    /// Pipeline arguments for `input`, program excluded.
    pub fn args(&self, input: &Path) -> Vec<OsString> {
        let (w, h) = self.paper.dimensions_mm();
        let page = self.paper.name();
        let mut args: Vec<OsString> = vec!["read".into(), input.into()];
        args.extend(
            [
                "linemerge".to_string(),
                "linesimplify".to_string(),
                "linesort".to_string(),
                "scaleto".to_string(),
                format!("{}mm", w),
                format!("{}mm", h),
                "layout".to_string(),
                "--fit-to-margins".to_string(),
                self.margin.clone(),
                page.to_string(),
                "write".to_string(),
                "--page-size".to_string(),
                page.to_string(),
                "--center".to_string(),
            ]
            .map(OsString::from),
        );
        args.push(self.output_path(input).into());
        args
    }

    /// The full command for `input`.
    pub fn command(&self, input: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.args(input));
        cmd
    }

    /// Run the pipeline, returning the path written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputNotFound`] for a missing input, and
    /// [`Error::Optimizer`] when the program cannot start or exits
    /// unsuccessfully, carrying its stdout and stderr.
    pub fn run(&self, input: &Path) -> Result<PathBuf> {
        if !input.exists() {
            return Err(Error::InputNotFound(input.to_path_buf()));
        }

        log::debug!("Running {:?}", self.command(input));
        let output = self.command(input).output().map_err(|e| Error::Optimizer {
            status: None,
            output: format!("could not start {}: {}", self.program.display(), e),
        })?;

        if !output.status.success() {
            let mut captured = String::from_utf8_lossy(&output.stdout).into_owned();
            captured.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(Error::Optimizer {
                status: output.status.code(),
                output: captured.trim().to_string(),
            });
        }

        Ok(self.output_path(input))
    }
}
