// * Per-document pipeline: generate -> parse -> log -> (dry-run stop | update)
// * Linear, one document per call, every failure ends the run for that document only

use crate::engine::generator::TitleGenerator;
use crate::engine::response::{parse_title_response, TitleSuggestion};
use crate::persistence::{Document, DocumentStore};
use tracing::{error, info};

/// How processing one document ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The new title was patched onto the document.
    Updated(TitleSuggestion),
    /// A title was produced but dry-run suppressed the update.
    DryRun(TitleSuggestion),
    /// The document could not be retrieved.
    RetrievalFailed,
    /// The completion call failed or returned no content.
    GenerationFailed,
    /// The answer was not JSON or had no usable title.
    ParseFailed { raw: String },
    /// The document service rejected the update.
    UpdateFailed(TitleSuggestion),
}

impl ProcessOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProcessOutcome::Updated(_) | ProcessOutcome::DryRun(_))
    }
}

pub struct DocumentProcessor<'a> {
    generator: &'a dyn TitleGenerator,
    store: &'a dyn DocumentStore,
    dry_run: bool,
}

impl<'a> DocumentProcessor<'a> {
    pub fn new(
        generator: &'a dyn TitleGenerator,
        store: &'a dyn DocumentStore,
        dry_run: bool,
    ) -> Self {
        Self {
            generator,
            store,
            dry_run,
        }
    }

    pub fn store(&self) -> &'a dyn DocumentStore {
        self.store
    }

    /// Fetches the document first, then runs [`DocumentProcessor::process`].
    pub async fn process_by_id(&self, doc_id: i64) -> ProcessOutcome {
        match self.store.fetch_document(doc_id).await {
            Ok(document) => self.process(&document).await,
            Err(e) => {
                error!(
                    doc_id,
                    error = %e,
                    "could not retrieve document info for document {}", doc_id
                );
                ProcessOutcome::RetrievalFailed
            }
        }
    }

    pub async fn process(&self, document: &Document) -> ProcessOutcome {
        let doc_id = document.id;

        let raw = match self.generator.generate_title(&document.content).await {
            Ok(raw) => raw,
            Err(e) => {
                error!(doc_id, error = %e, "could not generate title for document {}", doc_id);
                return ProcessOutcome::GenerationFailed;
            }
        };

        let suggestion = match parse_title_response(&raw) {
            Ok(suggestion) => suggestion,
            Err(e) => {
                error!(
                    doc_id,
                    error = %e,
                    "could not parse response for document {}: {}", doc_id, raw
                );
                return ProcessOutcome::ParseFailed { raw };
            }
        };

        info!(
            doc_id,
            "will update document {} title from {} to: {} because {}",
            doc_id,
            document.title,
            suggestion.title,
            suggestion.explanation
        );

        if self.dry_run {
            return ProcessOutcome::DryRun(suggestion);
        }

        match self.store.update_title(doc_id, &suggestion.title).await {
            Ok(()) => {
                info!(doc_id, "updated document {} title to {}", doc_id, suggestion.title);
                ProcessOutcome::Updated(suggestion)
            }
            Err(e) => {
                error!(
                    doc_id,
                    error = %e,
                    "could not update document {} title to {}", doc_id, suggestion.title
                );
                ProcessOutcome::UpdateFailed(suggestion)
            }
        }
    }
}
