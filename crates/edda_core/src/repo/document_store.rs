//! Document store contract and DOCX implementation.
//!
//! # Responsibility
//! - Persist whole documents to disk and load them back.
//! - Map run styles onto DOCX run properties in both directions.
//!
//! # Invariants
//! - One DOCX paragraph per `StyledParagraph`, one DOCX run per run.
//! - Paragraph count survives a save/load round trip, including empty
//!   paragraphs.
//! - Undecodable style properties are skipped, never turned into errors;
//!   run text is decoded verbatim.

use crate::model::document::Document;
use crate::model::paragraph::StyledParagraph;
use crate::model::style::{Style, UnderlineStyle};
use crate::model::text::StyledText;
use docx_rs::{
    read_docx, DocumentChild, Docx, Paragraph, ParagraphChild, ReaderError, RunChild, RunFonts,
    RunProperty,
};
use log::{error, info};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for document persistence operations.
#[derive(Debug)]
pub enum StoreError {
    /// The document file could not be created, opened or written.
    Io(io::Error),
    /// The file exists but is not a readable DOCX archive.
    Read(ReaderError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "could not access the document file: {err}"),
            Self::Read(err) => write!(f, "could not read the docx document: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Read(err) => Some(err),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ReaderError> for StoreError {
    fn from(value: ReaderError) -> Self {
        Self::Read(value)
    }
}

/// Persistence contract for whole documents.
pub trait DocumentStore {
    fn save(&self, document: &Document, path: &Path) -> StoreResult<()>;
    fn load(&self, path: &Path) -> StoreResult<Document>;
}

/// DOCX-backed document store.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxStore;

impl DocxStore {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentStore for DocxStore {
    /// # Side effects
    /// - Writes the full DOCX archive at `path`, replacing any existing file.
    /// - Emits `doc_save` logging events with duration and status.
    fn save(&self, document: &Document, path: &Path) -> StoreResult<()> {
        let started_at = Instant::now();
        info!(
            "event=doc_save module=repo status=start paragraphs={}",
            document.paragraph_count()
        );

        match write_docx(document, path) {
            Ok(()) => {
                info!(
                    "event=doc_save module=repo status=ok paragraphs={} duration_ms={}",
                    document.paragraph_count(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=doc_save module=repo status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// # Side effects
    /// - Reads the whole file into memory before parsing.
    /// - Emits `doc_load` logging events with duration and status.
    fn load(&self, path: &Path) -> StoreResult<Document> {
        let started_at = Instant::now();
        info!("event=doc_load module=repo status=start");

        match read_docx_document(path) {
            Ok(document) => {
                info!(
                    "event=doc_load module=repo status=ok paragraphs={} duration_ms={}",
                    document.paragraph_count(),
                    started_at.elapsed().as_millis()
                );
                Ok(document)
            }
            Err(err) => {
                error!(
                    "event=doc_load module=repo status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}

fn write_docx(document: &Document, path: &Path) -> StoreResult<()> {
    let mut docx = Docx::new();

    for paragraph in document.paragraphs() {
        let mut dx_paragraph = Paragraph::new();
        for run in paragraph.runs() {
            dx_paragraph = dx_paragraph.add_run(run.to_docx_run());
        }
        docx = docx.add_paragraph(dx_paragraph);
    }

    let mut file = File::create(path)?;
    docx.build().pack(&mut file).map_err(io::Error::from)?;
    Ok(())
}

fn read_docx_document(path: &Path) -> StoreResult<Document> {
    let mut file = File::open(path)?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;
    let docx = read_docx(&buf)?;

    // DOCX metadata is not mapped back yet; the file stem stands in for a
    // title so loaded documents stay addressable.
    let title = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("untitled");
    let mut document = Document::new(title);

    for child in docx.document.children {
        if let DocumentChild::Paragraph(dx_paragraph) = child {
            let mut paragraph = StyledParagraph::new();
            for dx_child in dx_paragraph.children {
                if let ParagraphChild::Run(run) = dx_child {
                    let mut text = String::new();
                    for run_child in &run.children {
                        if let RunChild::Text(chunk) = run_child {
                            text.push_str(&chunk.text);
                        }
                    }
                    if text.is_empty() {
                        continue;
                    }
                    let style = style_from_run_property(&run.run_property);
                    paragraph.add(StyledText::new(text, style));
                }
            }
            // Empty paragraphs are kept so paragraph indexing round-trips.
            document.push_paragraph(paragraph);
        }
    }

    Ok(document)
}

/// Rebuilds a [`Style`] from DOCX run properties.
///
/// Bold and italic map directly. The remaining properties hide their values
/// behind docx-rs newtypes, so they are recovered through a serde value
/// bridge and applied only when they decode cleanly.
fn style_from_run_property(property: &RunProperty) -> Style {
    let mut style = Style::default();

    if property.bold.is_some() {
        style = style.switch_bold();
    }
    if property.italic.is_some() {
        style = style.switch_italic();
    }
    if let Some(points) = property_val(&property.sz).and_then(|value| value.as_u64()) {
        if let Ok(points) = u8::try_from(points) {
            style = style.change_size(points);
        }
    }
    if let Some(family) = ascii_font_family(&property.fonts) {
        style = style.set_font_unchecked(family);
    }
    if let Some(color) = property_string(&property.color) {
        if let Ok(updated) = style.clone().change_font_color(with_hash(&color)) {
            style = updated;
        }
    }
    if let Some(underline) = property_string(&property.underline)
        .and_then(|value| UnderlineStyle::from_docx_value(&value))
    {
        style = style.set_underline(Some(underline));
    }
    if let Some(color) = property_string(&property.highlight) {
        if let Ok(updated) = style.clone().change_font_highlight(Some(with_hash(&color))) {
            style = updated;
        }
    }

    style
}

/// Recovers a docx-rs run property payload via serde.
///
/// Wrapped properties serialize as `{"val": ...}` and yield the inner
/// value; `sz`, `color`, `underline` and `highlight` serialize as bare
/// scalars and are returned whole.
fn property_val<T: Serialize>(property: &Option<T>) -> Option<serde_json::Value> {
    let value = serde_json::to_value(property.as_ref()?).ok()?;
    match value.get("val") {
        Some(inner) => Some(inner.clone()),
        None => Some(value),
    }
}

fn property_string<T: Serialize>(property: &Option<T>) -> Option<String> {
    property_val(property)?.as_str().map(str::to_string)
}

/// Extracts the ascii font family from serialized `RunFonts`.
fn ascii_font_family(fonts: &Option<RunFonts>) -> Option<String> {
    let value = serde_json::to_value(fonts.as_ref()?).ok()?;
    value
        .get("ascii")
        .or_else(|| value.get("val"))?
        .as_str()
        .map(str::to_string)
}

fn with_hash(value: &str) -> String {
    format!("#{}", value.trim_start_matches('#'))
}
