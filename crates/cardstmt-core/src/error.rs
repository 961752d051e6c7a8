//! Error types for the cardstmt-core library.

use thiserror::Error;

/// Main error type for the cardstmt library.
#[derive(Error, Debug)]
pub enum StatementError {
    /// Issuer registry construction error.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Document text extraction error.
    #[error("text extraction error: {0}")]
    TextExtraction(#[from] TextExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while building an issuer registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// A pattern failed to compile.
    #[error("invalid pattern for {issuer}: {pattern}: {source}")]
    InvalidPattern {
        issuer: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Two profiles share the same issuer name.
    #[error("duplicate issuer: {0}")]
    DuplicateIssuer(String),

    /// A profile has an empty issuer name.
    #[error("issuer name must not be empty")]
    EmptyName,

    /// A profile defines no identifier patterns, so it could never be detected.
    #[error("issuer {0} has no identifier patterns")]
    NoIdentifiers(String),

    /// Failed to read or parse a profile file.
    #[error("failed to load profiles: {0}")]
    Load(String),
}

/// Errors raised by a text extraction collaborator.
///
/// The `Display` text of this error becomes the sole diagnostic of a
/// record with status `error`.
#[derive(Error, Debug)]
pub enum TextExtractionError {
    /// Failed to read the document.
    #[error("failed to read document: {0}")]
    Read(String),

    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from the PDF.
    #[error("failed to extract text from PDF: {0}")]
    Extraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The document type is not handled by this extractor.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Extracted text is shorter than the configured minimum.
    #[error("insufficient text: {found} characters (minimum {minimum})")]
    InsufficientText { found: usize, minimum: usize },
}

/// Result type for the cardstmt library.
pub type Result<T> = std::result::Result<T, StatementError>;
