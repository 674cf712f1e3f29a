//! Extraction error types

use crate::document::DocumentError;
use thiserror::Error;

/// Why a document could not be turned into a `Profile`.
///
/// Every variant carries the selector path that failed, e.g.
/// `profile > experience[1] > position[0] > .experience-item__title`.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Required node missing: {path}")]
    MissingNode { path: String },

    #[error("Required text is empty: {path}")]
    EmptyText { path: String },

    #[error("No location node and only {found} metadata item(s): {path}")]
    MissingLocation { path: String, found: usize },

    #[error("Grouped experience has no positions: {path}")]
    NoPositions { path: String },

    #[error("Document error at {path}: {source}")]
    Document {
        path: String,
        #[source]
        source: DocumentError,
    },
}

impl ExtractionError {
    /// The selector path identifying where extraction stopped
    pub fn path(&self) -> &str {
        match self {
            Self::MissingNode { path }
            | Self::EmptyText { path }
            | Self::MissingLocation { path, .. }
            | Self::NoPositions { path }
            | Self::Document { path, .. } => path,
        }
    }
}

/// Result type for extraction
pub type ExtractResult<T> = Result<T, ExtractionError>;
