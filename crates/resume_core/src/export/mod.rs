//! Preview export.
//!
//! # Responsibility
//! - Define the export capability consumed by editor sessions.
//! - Ship a PDF implementation (`pdf`).
//!
//! # Invariants
//! - Export reads a laid-out preview only; it never sees the document.
//! - An empty preview is rejected before anything touches the filesystem.

pub mod pdf;

use crate::preview::layout::PreviewLayout;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub use pdf::PdfExporter;

/// Fixed file name of the exported artifact.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "resume.pdf";

pub type ExportResult<T> = Result<T, ExportError>;

/// Error for export attempts.
#[derive(Debug)]
pub enum ExportError {
    /// Layout has no visible text.
    EmptyPreview,
    /// Writing the artifact failed.
    Io(std::io::Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPreview => write!(f, "nothing to export: preview is empty"),
            Self::Io(err) => write!(f, "failed to write export artifact: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptyPreview => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Description of a written export artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub path: PathBuf,
    /// Page width in layout pixels.
    pub width: f32,
    /// Page height in layout pixels.
    pub height: f32,
    pub byte_len: usize,
}

/// Capability that turns a laid-out preview into a downloadable artifact.
pub trait ExportAdapter {
    fn export(&mut self, layout: &PreviewLayout) -> ExportResult<ExportArtifact>;
}
