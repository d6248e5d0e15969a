use crate::persistence::documents::{AsyncResult, Document, DocumentError, DocumentStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

/// In-memory document store for testing and dry experiments.
///
/// Records every title update so callers can assert on what would have
/// been sent to the document service.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<Vec<Document>>,
    updates: RwLock<Vec<(i64, String)>>,
    fail_listing: AtomicBool,
    fail_updates: AtomicBool,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(documents: Vec<Document>) -> Self {
        let store = Self::new();
        for doc in documents {
            store.add(doc);
        }
        store
    }

    pub fn add(&self, document: Document) {
        if let Ok(mut docs) = self.documents.write() {
            docs.push(document);
        }
    }

    /// Title updates received so far, in call order.
    pub fn updates(&self) -> Vec<(i64, String)> {
        self.updates.read().map(|u| u.clone()).unwrap_or_default()
    }

    pub fn get(&self, id: i64) -> Option<Document> {
        self.documents
            .read()
            .ok()
            .and_then(|docs| docs.iter().find(|d| d.id == id).cloned())
    }

    // * Makes fetch_documents fail, as if a page request had errored
    pub fn set_fail_listing(&self, fail: bool) {
        self.fail_listing.store(fail, Ordering::Relaxed);
    }

    pub fn set_fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::Relaxed);
    }

    fn apply_update(&self, id: i64, title: &str) -> Result<(), DocumentError> {
        if let Ok(mut updates) = self.updates.write() {
            updates.push((id, title.to_string()));
        }

        if self.fail_updates.load(Ordering::Relaxed) {
            return Err(DocumentError::NotFound(id));
        }

        let mut docs = self
            .documents
            .write()
            .map_err(|_| DocumentError::NotFound(id))?;
        match docs.iter_mut().find(|d| d.id == id) {
            Some(doc) => {
                doc.title = title.to_string();
                Ok(())
            }
            None => Err(DocumentError::NotFound(id)),
        }
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn fetch_document(&self, id: i64) -> AsyncResult<'_, Document> {
        let result = self.get(id).ok_or(DocumentError::NotFound(id));
        Box::pin(async move { result })
    }

    fn fetch_documents<'a>(&'a self, _filter: Option<&'a str>) -> AsyncResult<'a, Vec<Document>> {
        let result = if self.fail_listing.load(Ordering::Relaxed) {
            Err(DocumentError::UnexpectedBody {
                url: "memory://documents".to_string(),
            })
        } else {
            Ok(self.documents.read().map(|d| d.clone()).unwrap_or_default())
        };
        Box::pin(async move { result })
    }

    fn update_title<'a>(&'a self, id: i64, title: &'a str) -> AsyncResult<'a, ()> {
        let result = self.apply_update(id, title);
        Box::pin(async move { result })
    }
}
