//! Core engine for Edda, a rich-text document editor.
//! This crate is the single source of truth for document and styling
//! invariants; GUI shells stay thin on top of it.

pub mod format;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use format::tagged::{parse_paragraph, render_paragraph, TaggedError, TaggedResult};
pub use logging::{default_log_dir, default_log_level, init_logging, logging_status};
pub use model::document::{Document, DocumentId, Metadata};
pub use model::fonts::{is_known_family, known_families, register_family};
pub use model::paragraph::{ParagraphError, ParagraphResult, StyledParagraph};
pub use model::style::{Style, StyleCommand, StyleError, StyleResult, UnderlineStyle};
pub use model::text::StyledText;
pub use repo::document_store::{DocumentStore, DocxStore, StoreError, StoreResult};
pub use search::find::{find_in_document, FindHit, FindQuery};
pub use service::editor::{EditorError, EditorResult, EditorService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
