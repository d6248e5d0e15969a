// * Document service access
// * HTTP store for production runs, in-memory store for tests

pub mod documents;
pub mod memory;

// * Re-exports for convenient access
pub use documents::{AsyncResult, Document, DocumentError, DocumentStore, PaperlessClient};
pub use memory::InMemoryDocumentStore;
