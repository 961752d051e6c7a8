//! Core library for credit card statement parsing.
//!
//! This crate provides:
//! - An immutable registry of issuer profiles (ICICI, Axis, IDFC FIRST, RBL, American Express)
//! - Issuer detection and ordered-fallback field extraction
//! - Status classification (success / partial / failed / error)
//! - A batch runner with a bounded worker pool that preserves input order
//! - Text extraction collaborators for PDF and plain-text documents

pub mod error;
pub mod models;
pub mod statement;
pub mod text;

pub use error::{RegistryError, Result, StatementError, TextExtractionError};
pub use models::config::ParserConfig;
pub use models::statement::{BatchSummary, Field, ParsingStatus, StatementRecord};
pub use statement::{
    BatchRunner, FieldExtractor, IssuerDefinition, IssuerDetector, IssuerProfile,
    IssuerRegistry, NoopObserver, ProgressObserver, StatementClassifier,
};
pub use text::{FileTextExtractor, PdfTextExtractor, TextExtractor};
