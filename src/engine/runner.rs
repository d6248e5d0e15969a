// * Wires Settings into the HTTP clients and exposes the two operating modes.
// * One ApiClient (one connection pool) is shared by both upstreams for the whole run.
// * The pool's timeout covers document requests; completions carry their own.

use crate::config::Settings;
use crate::engine::batch::{run_batch, BatchReport};
use crate::engine::generator::{GenerationError, OpenAiTitleGenerator};
use crate::engine::processor::{DocumentProcessor, ProcessOutcome};
use crate::network::{ApiClient, NetworkError};
use crate::persistence::{DocumentError, PaperlessClient};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Documents(#[from] DocumentError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

pub struct Runner {
    store: PaperlessClient,
    generator: OpenAiTitleGenerator,
    dry_run: bool,
}

impl Runner {
    pub fn from_settings(settings: &Settings) -> Result<Self, RunnerError> {
        let api = ApiClient::new(settings.timeout)?;

        let store = PaperlessClient::new(
            api.clone(),
            &settings.paperless_url,
            &settings.paperless_api_key,
        )?;

        let generator = OpenAiTitleGenerator::new(
            api,
            &settings.openai_api_key,
            settings.completion_base_url(),
            settings.openai_model.clone(),
            settings.prompt.clone(),
        )?
        .with_timeout(settings.completion_timeout);

        Ok(Self {
            store,
            generator,
            dry_run: settings.dry_run,
        })
    }

    fn processor(&self) -> DocumentProcessor<'_> {
        DocumentProcessor::new(&self.generator, &self.store, self.dry_run)
    }

    pub async fn run_single(&self, doc_id: i64) -> ProcessOutcome {
        if self.dry_run {
            info!("Running in dry mode");
        }
        info!(doc_id, "Running for document {}", doc_id);

        self.processor().process_by_id(doc_id).await
    }

    pub async fn run_all(&self, filter: Option<&str>, exclude: &[i64]) -> BatchReport {
        if self.dry_run {
            info!("Running in dry mode");
        }
        info!("Running on all documents");

        run_batch(&self.processor(), filter, exclude).await
    }
}
