// * "All documents" mode
// * Fetches the (optionally filtered) collection once, then processes each document in order.
// * Failures stay with the document that caused them.

use crate::engine::processor::{DocumentProcessor, ProcessOutcome};
use std::collections::HashSet;
use tracing::{error, info};

/// Counters for one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Documents returned by the listing.
    pub found: usize,
    /// Documents skipped through the exclude list.
    pub skipped: usize,
    pub updated: usize,
    pub dry_run: usize,
    pub failed: usize,
    /// True when the listing itself failed or came back empty.
    pub retrieval_failed: bool,
}

impl BatchReport {
    pub fn processed(&self) -> usize {
        self.updated + self.dry_run + self.failed
    }

    fn record(&mut self, outcome: &ProcessOutcome) {
        match outcome {
            ProcessOutcome::Updated(_) => self.updated += 1,
            ProcessOutcome::DryRun(_) => self.dry_run += 1,
            _ => self.failed += 1,
        }
    }
}

pub async fn run_batch(
    processor: &DocumentProcessor<'_>,
    filter: Option<&str>,
    exclude: &[i64],
) -> BatchReport {
    let mut report = BatchReport::default();
    let exclude: HashSet<i64> = exclude.iter().copied().collect();

    let documents = match processor.store().fetch_documents(filter).await {
        Ok(documents) if !documents.is_empty() => documents,
        Ok(_) => {
            error!("could not retrieve documents");
            report.retrieval_failed = true;
            return report;
        }
        Err(e) => {
            error!(error = %e, "could not retrieve documents");
            report.retrieval_failed = true;
            return report;
        }
    };

    report.found = documents.len();
    info!("found {} documents", documents.len());

    for document in &documents {
        let doc_id = document.id;

        if exclude.contains(&doc_id) {
            info!(doc_id, "skipping document {}", doc_id);
            report.skipped += 1;
            continue;
        }

        info!(doc_id, "running for document {}", doc_id);
        let outcome = processor.process(document).await;
        report.record(&outcome);
        info!(doc_id, "finished running for document {}", doc_id);
    }

    info!(
        found = report.found,
        processed = report.processed(),
        updated = report.updated,
        dry_run = report.dry_run,
        skipped = report.skipped,
        failed = report.failed,
        "Batch complete"
    );

    report
}
