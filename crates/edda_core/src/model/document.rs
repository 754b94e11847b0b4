//! Document domain model.
//!
//! # Responsibility
//! - Hold the ordered paragraph content and document metadata.
//! - Provide text extraction in plain and tagged form.
//!
//! # Invariants
//! - `id` is stable for the lifetime of the document and never reused.
//! - Paragraph order is the display order.
//! - `text()` concatenates run text without inserting separators; callers
//!   needing paragraph boundaries iterate `paragraphs()` instead.

use crate::model::paragraph::StyledParagraph;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use uuid::Uuid;

/// Stable identifier for a document.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type DocumentId = Uuid;

/// Descriptive metadata carried alongside document content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Stable global ID used for linking and auditing.
    pub id: DocumentId,
    pub title: String,
    pub authors: Option<Vec<String>>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub version: Option<String>,
    pub status: Option<String>,
    pub language: Option<String>,
    pub keywords: Option<Vec<String>>,
}

impl Metadata {
    /// Creates metadata with a generated stable ID and the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title)
    }

    /// Creates metadata with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(id: DocumentId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            authors: None,
            description: None,
            category: None,
            version: None,
            status: None,
            language: None,
            keywords: None,
        }
    }
}

/// A styled document: ordered paragraphs plus metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    paragraphs: Vec<StyledParagraph>,
    metadata: Metadata,
}

impl Document {
    /// Creates a blank document.
    pub fn new(title: &str) -> Self {
        Self {
            paragraphs: Vec::new(),
            metadata: Metadata::new(title),
        }
    }

    /// Creates a blank document with a caller-provided stable ID.
    pub fn with_id(id: DocumentId, title: &str) -> Self {
        Self {
            paragraphs: Vec::new(),
            metadata: Metadata::with_id(id, title),
        }
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &StyledParagraph> {
        self.paragraphs.iter()
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn paragraph_mut(&mut self, index: usize) -> Option<&mut StyledParagraph> {
        self.paragraphs.get_mut(index)
    }

    /// Appends a paragraph at the end of the document.
    pub fn push_paragraph(&mut self, paragraph: StyledParagraph) {
        self.paragraphs.push(paragraph);
    }

    /// Inserts a paragraph before `index`; `index == paragraph_count()`
    /// appends. Returns `false` when the index is past the end.
    pub fn insert_paragraph(&mut self, index: usize, paragraph: StyledParagraph) -> bool {
        if index > self.paragraphs.len() {
            return false;
        }
        self.paragraphs.insert(index, paragraph);
        true
    }

    /// Removes and returns the paragraph at `index`.
    pub fn remove_paragraph(&mut self, index: usize) -> Option<StyledParagraph> {
        if index < self.paragraphs.len() {
            Some(self.paragraphs.remove(index))
        } else {
            None
        }
    }

    /// Full document text as one string.
    ///
    /// With `tagged` set, every run is wrapped in its style tags.
    pub fn text(&self, tagged: bool) -> String {
        let mut buffer = String::with_capacity(self.paragraphs.len() * 100);
        for paragraph in &self.paragraphs {
            for run in paragraph.runs() {
                if tagged {
                    let _ = write!(buffer, "{}", run.tagged());
                } else {
                    buffer.push_str(&run.text);
                }
            }
        }
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::style::Style;
    use crate::model::text::StyledText;

    fn sample_document() -> Document {
        let mut doc = Document::new("Test Title");

        let plain = Style::default();
        let bold = Style::default().switch_bold();

        let mut para1 = StyledParagraph::new();
        para1.add(StyledText::new("Paragraph 1, Sentence 1. ", plain.clone()));
        para1.add(StyledText::new("Bold bit.", bold));

        let mut para2 = StyledParagraph::new();
        para2.add(StyledText::new("Paragraph 2.", plain));

        doc.push_paragraph(para1);
        doc.push_paragraph(para2);
        doc
    }

    #[test]
    fn new_document_is_blank_with_title() {
        let doc = Document::new("My Document");
        assert_eq!(doc.paragraph_count(), 0);
        assert_eq!(doc.metadata().title, "My Document");
        assert!(doc.metadata().authors.is_none());
        assert!(doc.metadata().description.is_none());
    }

    #[test]
    fn with_id_keeps_caller_identity() {
        let id = Uuid::new_v4();
        let doc = Document::with_id(id, "Imported");
        assert_eq!(doc.metadata().id, id);
    }

    #[test]
    fn text_untagged_concatenates_runs() {
        let doc = sample_document();
        assert_eq!(doc.text(false), "Paragraph 1, Sentence 1. Bold bit.Paragraph 2.");
    }

    #[test]
    fn text_tagged_wraps_each_run() {
        let doc = sample_document();
        let plain_tag = format!("{}", Style::default());
        let bold_tag = format!("{}", Style::default().switch_bold());

        let expected = format!(
            "[[{0}]]Paragraph 1, Sentence 1. [[/{0}]][[{1}]]Bold bit.[[/{1}]][[{0}]]Paragraph 2.[[/{0}]]",
            plain_tag, bold_tag
        );
        assert_eq!(doc.text(true), expected);
    }

    #[test]
    fn text_of_empty_document_is_empty() {
        let doc = Document::new("Empty Doc");
        assert_eq!(doc.text(false), "");
        assert_eq!(doc.text(true), "");
    }

    #[test]
    fn paragraph_insert_and_remove_respect_bounds() {
        let mut doc = Document::new("Doc");
        let mut para = StyledParagraph::new();
        para.add(StyledText::new("only", Style::default()));

        assert!(doc.insert_paragraph(0, para.clone()));
        assert!(!doc.insert_paragraph(5, para.clone()));
        assert_eq!(doc.paragraph_count(), 1);

        assert!(doc.remove_paragraph(3).is_none());
        let removed = doc.remove_paragraph(0).expect("index 0 exists");
        assert_eq!(removed.plain_text(), "only");
        assert_eq!(doc.paragraph_count(), 0);
    }
}
