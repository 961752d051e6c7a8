//! Text extraction collaborators.
//!
//! The parsing core only sees the [`TextExtractor`] contract; these
//! implementations turn files on disk into statement text.

mod file;
mod pdf;

pub use file::FileTextExtractor;
pub use pdf::PdfTextExtractor;

use std::path::Path;

use crate::error::TextExtractionError;

/// Result type for text extraction.
pub type Result<T> = std::result::Result<T, TextExtractionError>;

/// Turns an opaque document handle into UTF-8 text.
pub trait TextExtractor: Sync {
    /// Document handle type.
    type Document: Sync;

    /// Identifier reported in the record's `file_name`.
    fn document_name(&self, document: &Self::Document) -> String;

    /// Extract the document's full text.
    fn extract_text(&self, document: &Self::Document) -> Result<String>;
}

/// File name component of a path, falling back to the full path.
pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
