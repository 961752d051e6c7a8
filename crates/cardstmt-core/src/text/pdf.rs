//! PDF text extraction using lopdf and pdf-extract.

use std::borrow::Cow;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

use lopdf::Document;
use tracing::debug;

use super::{file_name_of, Result, TextExtractor};
use crate::error::TextExtractionError;

/// PDF text extractor.
///
/// Pages are concatenated in document order; no layout analysis is done.
#[derive(Debug, Clone)]
pub struct PdfTextExtractor {
    decrypt_empty_password: bool,
}

impl PdfTextExtractor {
    /// Create a new PDF text extractor.
    pub fn new() -> Self {
        Self {
            decrypt_empty_password: true,
        }
    }

    /// Set whether encrypted PDFs are retried with an empty password.
    pub fn with_empty_password_decryption(mut self, enabled: bool) -> Self {
        self.decrypt_empty_password = enabled;
        self
    }

    /// Extract text from PDF bytes.
    pub fn extract_from_bytes(&self, data: &[u8]) -> Result<String> {
        // pdf-extract panics on some malformed font and encoding tables.
        panic::catch_unwind(AssertUnwindSafe(|| self.extract_unguarded(data))).map_err(|_| {
            TextExtractionError::Extraction("PDF library panicked on malformed input".to_string())
        })?
    }

    fn extract_unguarded(&self, data: &[u8]) -> Result<String> {
        let data = self.prepare(data)?;
        let text = pdf_extract::extract_text_from_mem(&data)
            .map_err(|e| TextExtractionError::Extraction(e.to_string()))?;

        debug!("Extracted {} characters of text", text.len());
        Ok(text)
    }

    /// Validate the document and return bytes pdf-extract can read.
    fn prepare<'a>(&self, data: &'a [u8]) -> Result<Cow<'a, [u8]>> {
        let mut doc =
            Document::load_mem(data).map_err(|e| TextExtractionError::Parse(e.to_string()))?;

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(TextExtractionError::NoPages);
        }
        debug!("Loaded PDF with {} pages", page_count);

        if !doc.is_encrypted() {
            return Ok(Cow::Borrowed(data));
        }

        if !self.decrypt_empty_password || doc.decrypt("").is_err() {
            return Err(TextExtractionError::Encrypted);
        }
        debug!("Decrypted PDF with empty password");

        // Save the decrypted document for pdf_extract
        let mut decrypted = Vec::new();
        doc.save_to(&mut decrypted).map_err(|e| {
            TextExtractionError::Parse(format!("failed to save decrypted PDF: {}", e))
        })?;
        Ok(Cow::Owned(decrypted))
    }
}

impl Default for PdfTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for PdfTextExtractor {
    type Document = PathBuf;

    fn document_name(&self, document: &PathBuf) -> String {
        file_name_of(document)
    }

    fn extract_text(&self, document: &PathBuf) -> Result<String> {
        let data = std::fs::read(document).map_err(|e| TextExtractionError::Read(e.to_string()))?;
        self.extract_from_bytes(&data)
    }
}
