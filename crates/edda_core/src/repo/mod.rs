//! Persistence layer contracts and file-format implementations.
//!
//! # Responsibility
//! - Define use-case oriented load/save contracts for whole documents.
//! - Isolate DOCX wire details from model and service code.
//!
//! # Invariants
//! - Stores never mutate the document they are asked to save.
//! - Load paths degrade gracefully on style properties they cannot decode;
//!   text content is never dropped silently.

pub mod document_store;
