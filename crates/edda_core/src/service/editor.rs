//! Editor use-case service.
//!
//! # Responsibility
//! - Provide the entry points an editing shell calls: restyle, insert,
//!   delete, find, open, save.
//! - Delegate persistence to a [`DocumentStore`] implementation.
//!
//! # Invariants
//! - Service APIs never bypass paragraph range validation.
//! - A failed operation leaves the held document unchanged.
//! - The service stays agnostic of the concrete store format.

use crate::model::document::Document;
use crate::model::paragraph::{ParagraphError, StyledParagraph};
use crate::model::style::StyleCommand;
use crate::repo::document_store::{DocumentStore, StoreError};
use crate::search::find::{find_in_document, FindHit, FindQuery};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::Range;
use std::path::Path;

pub type EditorResult<T> = Result<T, EditorError>;

/// Error for editor use-case operations.
#[derive(Debug)]
pub enum EditorError {
    /// The paragraph index does not exist in the current document.
    NoParagraph(usize),
    /// A paragraph-level edit failed (bounds or style validation).
    Paragraph(ParagraphError),
    /// Persistence failed.
    Store(StoreError),
}

impl Display for EditorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoParagraph(index) => write!(f, "no paragraph at index {index}"),
            Self::Paragraph(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EditorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NoParagraph(_) => None,
            Self::Paragraph(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ParagraphError> for EditorError {
    fn from(value: ParagraphError) -> Self {
        Self::Paragraph(value)
    }
}

impl From<StoreError> for EditorError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Use-case service wrapping one open document and its store.
pub struct EditorService<S: DocumentStore> {
    store: S,
    document: Document,
}

impl<S: DocumentStore> EditorService<S> {
    /// Creates a service editing the provided document.
    pub fn new(store: S, document: Document) -> Self {
        Self { store, document }
    }

    /// Creates a service by loading the document at `path`.
    pub fn open(store: S, path: &Path) -> EditorResult<Self> {
        let document = store.load(path)?;
        Ok(Self { store, document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Replaces the held document by loading from `path`.
    pub fn reload(&mut self, path: &Path) -> EditorResult<()> {
        self.document = self.store.load(path)?;
        Ok(())
    }

    /// Saves the held document to `path`.
    pub fn save(&self, path: &Path) -> EditorResult<()> {
        self.store.save(&self.document, path)?;
        Ok(())
    }

    /// Applies a style command to a char range of one paragraph.
    ///
    /// # Contract
    /// - The command affects exactly `range`; runs are split as needed.
    /// - Returns paragraph-level bounds/style errors unchanged.
    pub fn restyle(
        &mut self,
        paragraph: usize,
        range: Range<usize>,
        command: &StyleCommand,
    ) -> EditorResult<()> {
        self.paragraph_mut(paragraph)?.apply_to_range(range, command)?;
        Ok(())
    }

    /// Inserts text at a char offset of one paragraph.
    pub fn insert_text(
        &mut self,
        paragraph: usize,
        char_offset: usize,
        text: &str,
    ) -> EditorResult<()> {
        self.paragraph_mut(paragraph)?.insert_text(char_offset, text)?;
        Ok(())
    }

    /// Deletes a char range of one paragraph.
    pub fn delete_range(&mut self, paragraph: usize, range: Range<usize>) -> EditorResult<()> {
        self.paragraph_mut(paragraph)?.delete_range(range)?;
        Ok(())
    }

    /// Appends a paragraph at the end of the document.
    pub fn append_paragraph(&mut self, paragraph: StyledParagraph) {
        self.document.push_paragraph(paragraph);
    }

    /// Finds query occurrences in the held document.
    pub fn find(&self, query: &FindQuery) -> Vec<FindHit> {
        find_in_document(&self.document, query)
    }

    fn paragraph_mut(&mut self, index: usize) -> EditorResult<&mut StyledParagraph> {
        self.document
            .paragraph_mut(index)
            .ok_or(EditorError::NoParagraph(index))
    }
}
