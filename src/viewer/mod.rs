pub mod document;
pub mod viewport;

pub use document::{document_url, load_document, DocumentSource, DocumentStatus, LoadedDocument};
pub use viewport::{DocumentViewportController, PagerItem, ViewMode};
