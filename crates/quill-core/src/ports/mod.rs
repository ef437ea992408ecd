//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod document_store;
mod repository;

pub use document_store::{Document, DocumentStore, Namespace};
pub use repository::PostRepository;
