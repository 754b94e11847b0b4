//! Find-in-document entry points.
//!
//! # Responsibility
//! - Expose query APIs over in-memory document content.
//! - Keep hit shaping (ranges, snippets) inside core.

pub mod find;
