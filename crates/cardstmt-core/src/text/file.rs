//! File-based text extraction dispatching on extension.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::pdf::PdfTextExtractor;
use super::{file_name_of, Result, TextExtractor};
use crate::error::TextExtractionError;
use crate::models::config::PdfConfig;

/// Extensions this extractor handles (lowercase).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "txt"];

/// Reads statements from PDF files or pre-extracted `.txt` files.
#[derive(Debug, Clone, Default)]
pub struct FileTextExtractor {
    pdf: PdfTextExtractor,
    min_text_length: usize,
}

impl FileTextExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor from PDF configuration.
    pub fn from_config(config: &PdfConfig) -> Self {
        Self {
            pdf: PdfTextExtractor::new().with_empty_password_decryption(config.decrypt_empty_password),
            min_text_length: config.min_text_length,
        }
    }

    /// Reject text shorter than `length` characters (0 disables the check).
    pub fn with_min_text_length(mut self, length: usize) -> Self {
        self.min_text_length = length;
        self
    }

    /// Whether a path has an extension this extractor handles.
    pub fn supports(path: &Path) -> bool {
        extension_of(path).is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

impl TextExtractor for FileTextExtractor {
    type Document = PathBuf;

    fn document_name(&self, document: &PathBuf) -> String {
        file_name_of(document)
    }

    fn extract_text(&self, document: &PathBuf) -> Result<String> {
        let extension = extension_of(document).unwrap_or_default();

        let text = match extension.as_str() {
            "pdf" => self.pdf.extract_text(document)?,
            "txt" => std::fs::read_to_string(document)
                .map_err(|e| TextExtractionError::Read(e.to_string()))?,
            "" => return Err(TextExtractionError::UnsupportedFormat("(none)".to_string())),
            other => return Err(TextExtractionError::UnsupportedFormat(other.to_string())),
        };

        let found = text.trim().chars().count();
        if found < self.min_text_length {
            return Err(TextExtractionError::InsufficientText {
                found,
                minimum: self.min_text_length,
            });
        }

        debug!("{}: {} characters of text", document.display(), found);
        Ok(text)
    }
}
