// * Document service access: single fetch, paginated listing and title patches

use crate::network::{ApiClient, ApiRequest, Credentials, NetworkError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// A scanned document as returned by the document service.
///
/// Only the fields this tool reads are kept; everything else in the
/// payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    /// Raw OCR text.
    #[serde(default)]
    pub content: String,
}

impl Document {
    pub fn new(id: i64, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
        }
    }
}

// * One page of the list endpoint
#[derive(Debug, Deserialize)]
struct DocumentPage {
    #[serde(default)]
    results: Vec<Document>,
    #[serde(default)]
    next: Option<String>,
}

/// Errors raised while talking to the document service.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("Unexpected response body from {url}")]
    UnexpectedBody { url: String },

    #[error("Invalid document service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Document {0} not found")]
    NotFound(i64),
}

/// Boxed future returned by [`DocumentStore`] methods.
pub type AsyncResult<'a, T> = Pin<Box<dyn Future<Output = Result<T, DocumentError>> + Send + 'a>>;

/// Source and sink for documents.
pub trait DocumentStore: Send + Sync {
    /// Fetches one document by id.
    fn fetch_document(&self, id: i64) -> AsyncResult<'_, Document>;

    /// Fetches every document matching the optional query-string filter.
    ///
    /// Either the complete collection or an error; never a partial list.
    fn fetch_documents<'a>(&'a self, filter: Option<&'a str>) -> AsyncResult<'a, Vec<Document>>;

    /// Replaces the title of one document.
    fn update_title<'a>(&'a self, id: i64, title: &'a str) -> AsyncResult<'a, ()>;
}

/// HTTP implementation of [`DocumentStore`] for a Paperless-style REST API.
#[derive(Debug, Clone)]
pub struct PaperlessClient {
    api: ApiClient,
    base_url: Url,
    credentials: Credentials,
}

impl PaperlessClient {
    pub fn new(api: ApiClient, base_url: &str, api_key: &str) -> Result<Self, DocumentError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))?;
        let credentials = Credentials::token(api_key)?;

        Ok(Self {
            api,
            base_url,
            credentials,
        })
    }

    // * {base}/api/documents/
    pub fn documents_url(&self) -> String {
        format!("{}/api/documents/", self.base_url.as_str().trim_end_matches('/'))
    }

    // * {base}/api/documents/{id}/
    pub fn document_url(&self, id: i64) -> String {
        format!("{}{}/", self.documents_url(), id)
    }

    // * List URL with the caller's filter appended verbatim
    pub fn list_url(&self, filter: Option<&str>) -> String {
        let base = self.documents_url();
        match filter.map(|f| f.trim().trim_start_matches('?')) {
            Some(f) if !f.is_empty() => format!("{}?{}", base, f),
            _ => base,
        }
    }

    // * Resolves a `next` cursor against the page it came from
    fn resolve_next(current: &str, next: &str) -> Result<String, DocumentError> {
        Ok(Url::parse(current)?.join(next)?.to_string())
    }

    async fn get_object(&self, url: &str) -> Result<Map<String, Value>, DocumentError> {
        let request = ApiRequest::get(url).header(
            reqwest::header::AUTHORIZATION,
            self.credentials.header_value(),
        );

        self.api
            .execute(request)
            .await?
            .into_object()
            .ok_or_else(|| DocumentError::UnexpectedBody {
                url: url.to_string(),
            })
    }

    async fn fetch_page(&self, url: &str) -> Result<DocumentPage, DocumentError> {
        let object = self.get_object(url).await?;
        serde_json::from_value(Value::Object(object)).map_err(|_| {
            DocumentError::UnexpectedBody {
                url: url.to_string(),
            }
        })
    }

    async fn fetch_one(&self, id: i64) -> Result<Document, DocumentError> {
        let url = self.document_url(id);
        let object = self.get_object(&url).await?;
        serde_json::from_value(Value::Object(object))
            .map_err(|_| DocumentError::UnexpectedBody { url })
    }

    async fn fetch_all(&self, filter: Option<&str>) -> Result<Vec<Document>, DocumentError> {
        let mut url = self.list_url(filter);
        let mut documents = Vec::new();

        loop {
            // ! Any failed page aborts the whole listing; pages already read are dropped
            let page = self.fetch_page(&url).await?;
            debug!(url = %url, count = page.results.len(), "Fetched document page");
            documents.extend(page.results);

            match page.next.as_deref().filter(|n| !n.is_empty()) {
                Some(next) => url = Self::resolve_next(&url, next)?,
                None => break,
            }
        }

        Ok(documents)
    }

    async fn patch_title(&self, id: i64, title: &str) -> Result<(), DocumentError> {
        let request = ApiRequest::patch(self.document_url(id))
            .header(
                reqwest::header::AUTHORIZATION,
                self.credentials.header_value(),
            )
            .json(&json!({ "title": title }));

        self.api.execute(request).await?;
        debug!(doc_id = id, "Patched title of document {}", id);
        Ok(())
    }
}

impl DocumentStore for PaperlessClient {
    fn fetch_document(&self, id: i64) -> AsyncResult<'_, Document> {
        Box::pin(self.fetch_one(id))
    }

    fn fetch_documents<'a>(&'a self, filter: Option<&'a str>) -> AsyncResult<'a, Vec<Document>> {
        Box::pin(self.fetch_all(filter))
    }

    fn update_title<'a>(&'a self, id: i64, title: &'a str) -> AsyncResult<'a, ()> {
        Box::pin(self.patch_title(id, title))
    }
}
