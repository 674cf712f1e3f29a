//! Document capability trait definitions

use thiserror::Error;

/// Errors raised by a document backend
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Document backend error: {0}")]
    Backend(String),
}

/// Result type for document operations
pub type DocumentResult<T> = Result<T, DocumentError>;

/// A node in a rendered document.
///
/// Lookups are scoped to the node's descendants. A lookup that matches
/// nothing is `Ok(None)` / `Ok(vec![])`, never an error; errors are reserved
/// for backend failures and malformed selectors.
pub trait DocumentNode: Sized {
    /// First descendant matching `selector`
    fn find(&self, selector: &str) -> DocumentResult<Option<Self>>;

    /// All descendants matching `selector`, in document order
    fn find_all(&self, selector: &str) -> DocumentResult<Vec<Self>>;

    /// Rendered text content of this node
    fn text(&self) -> DocumentResult<String>;

    /// Value of an attribute, if present
    fn attribute(&self, name: &str) -> DocumentResult<Option<String>>;
}
