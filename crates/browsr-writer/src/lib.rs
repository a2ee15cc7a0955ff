//! Browsr Writer
//!
//! Turns a content-span tree back into text: canonical Browsr document
//! source for saving, or an outline for inspection.
//!
//! ```text
//! ContentSpan → write_document() → "<table>\n  <tr>\n ..."
//! ContentSpan → outline()        → "Table (2 rows)\n  Row 0\n ..."
//! ```

pub mod document;
pub mod outline;

use browsr_parser::ast::ContentSpan;

/// Raised when a tree holds a value the Browsr dialect cannot express.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Write error: {message}")]
pub struct WriteError {
    pub message: String,
}

impl WriteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Serialize a tree as Browsr document text that parses back into it.
pub fn write_document(span: &ContentSpan) -> Result<String, WriteError> {
    document::generate(span)
}

/// Render an indented, one-node-per-line outline of a tree.
pub fn outline(span: &ContentSpan) -> String {
    outline::generate(span)
}
