//! Read access to a rendered, tree-structured document
//!
//! Extraction only needs four capabilities from a document: find the first
//! descendant matching a selector, find all of them, read text, and read an
//! attribute. `DocumentNode` captures exactly that, so the extractor can run
//! against a parsed HTML snapshot, a live page handle, or a test fixture.

mod html;
mod traits;

pub use html::{HtmlDocument, HtmlNode};
pub use traits::{DocumentError, DocumentNode, DocumentResult};
