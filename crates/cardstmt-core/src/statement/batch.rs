//! Batch processing of statement documents.

use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::models::statement::{BatchSummary, StatementRecord};
use crate::text::TextExtractor;

use super::classifier::StatementClassifier;
use super::registry::IssuerRegistry;

/// Receives one notification per finished document.
///
/// With more than one worker, notifications arrive in completion order,
/// not input order.
pub trait ProgressObserver: Sync {
    fn on_document(&self, record: &StatementRecord);
}

impl<F> ProgressObserver for F
where
    F: Fn(&StatementRecord) + Sync,
{
    fn on_document(&self, record: &StatementRecord) {
        self(record)
    }
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn on_document(&self, _record: &StatementRecord) {}
}

/// Runs the parsing pipeline over a batch of documents.
pub struct BatchRunner<E> {
    registry: Arc<IssuerRegistry>,
    extractor: E,
    jobs: usize,
}

impl<E: TextExtractor> BatchRunner<E> {
    /// Create a sequential runner.
    pub fn new(registry: Arc<IssuerRegistry>, extractor: E) -> Self {
        Self {
            registry,
            extractor,
            jobs: 1,
        }
    }

    /// Set the number of parallel workers (1 = sequential).
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn registry(&self) -> &IssuerRegistry {
        &self.registry
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// Parse a single document. Never fails: extraction errors become an
    /// `error` record.
    pub fn process(&self, document: &E::Document) -> StatementRecord {
        let name = self.extractor.document_name(document);
        let text = self.extractor.extract_text(document);
        StatementClassifier::new(&self.registry).classify(&name, text.as_deref())
    }

    /// Parse every document, returning exactly one record per document in
    /// input order.
    pub fn run<O>(&self, documents: &[E::Document], observer: &O) -> Vec<StatementRecord>
    where
        O: ProgressObserver + ?Sized,
    {
        let start = Instant::now();
        info!(
            "Processing {} documents with {} worker(s)",
            documents.len(),
            self.jobs
        );

        let records = if self.jobs > 1 && documents.len() > 1 {
            match rayon::ThreadPoolBuilder::new().num_threads(self.jobs).build() {
                Ok(pool) => pool.install(|| {
                    documents
                        .par_iter()
                        .map(|document| self.process_and_notify(document, observer))
                        .collect()
                }),
                Err(e) => {
                    warn!("Failed to start worker pool, processing sequentially: {}", e);
                    self.run_sequential(documents, observer)
                }
            }
        } else {
            self.run_sequential(documents, observer)
        };

        info!(
            "Processed batch in {:?}: {}",
            start.elapsed(),
            BatchSummary::from_records(&records)
        );
        records
    }

    fn run_sequential<O>(&self, documents: &[E::Document], observer: &O) -> Vec<StatementRecord>
    where
        O: ProgressObserver + ?Sized,
    {
        documents
            .iter()
            .map(|document| self.process_and_notify(document, observer))
            .collect()
    }

    fn process_and_notify<O>(&self, document: &E::Document, observer: &O) -> StatementRecord
    where
        O: ProgressObserver + ?Sized,
    {
        let record = self.process(document);
        debug!("{}: {} - {}", record.file_name, record.issuer, record.parsing_status);
        observer.on_document(&record);
        record
    }
}
