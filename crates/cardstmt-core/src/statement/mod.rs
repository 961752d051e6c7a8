//! Statement parsing: issuer registry, detection, field extraction,
//! classification, and batch processing.

mod batch;
mod classifier;
mod detector;
mod extractor;
pub mod issuers;
mod registry;

pub use batch::{BatchRunner, NoopObserver, ProgressObserver};
pub use classifier::StatementClassifier;
pub use detector::IssuerDetector;
pub use extractor::{extract_field, FieldExtractor};
pub use registry::{IssuerDefinition, IssuerProfile, IssuerRegistry};
