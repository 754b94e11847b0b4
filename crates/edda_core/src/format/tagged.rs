//! Tagged text format: a plain-text rendering that preserves styling.
//!
//! # Responsibility
//! - Render a paragraph as `[[<header>]]text[[/<header>]]` run sequences.
//! - Parse that form back into styled runs.
//!
//! # Invariants
//! - `parse_paragraph(render_paragraph(p))` preserves run text and styles.
//! - Header tokens are `bold`, `italic`, `underline(<style>)`, `hc(#hex)`,
//!   `pt(<n>)`, `fc(#hex)` and at most one bare font-family token.
//! - Text outside a tag pair is rejected, never silently dropped.

use crate::model::paragraph::StyledParagraph;
use crate::model::style::{Style, UnderlineStyle};
use crate::model::text::StyledText;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter, Write};

static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[/?[^\[\]]*\]\]").expect("valid tag token regex"));
static PT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^pt\((\d{1,3})\)$").expect("valid pt regex"));
static COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(fc|hc)\((#[0-9a-fA-F]{6}|#[0-9a-fA-F]{8})\)$").expect("valid color token regex"));
static UNDERLINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^underline\(([a-z]+)\)$").expect("valid underline token regex"));

pub type TaggedResult<T> = Result<T, TaggedError>;

/// Parse error for the tagged text format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaggedError {
    /// An opening tag was never closed.
    UnclosedTag(String),
    /// A closing tag did not match the open tag's header.
    MismatchedTag { open: String, close: String },
    /// Text appeared outside any tag pair, or a closing tag had no opener.
    StrayText(String),
    /// A tag header token could not be interpreted.
    BadHeader(String),
}

impl Display for TaggedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnclosedTag(header) => write!(f, "tag `[[{header}]]` is never closed"),
            Self::MismatchedTag { open, close } => {
                write!(f, "closing tag `[[/{close}]]` does not match open tag `[[{open}]]`")
            }
            Self::StrayText(text) => write!(f, "text outside tag pair: `{text}`"),
            Self::BadHeader(token) => write!(f, "unrecognized style header token `{token}`"),
        }
    }
}

impl Error for TaggedError {}

/// Renders every run of the paragraph in tagged form.
pub fn render_paragraph(paragraph: &StyledParagraph) -> String {
    let mut buffer = String::new();
    for run in paragraph.runs() {
        let _ = write!(buffer, "{}", run.tagged());
    }
    buffer
}

/// Parses a tagged rendering back into a paragraph.
///
/// The input must be a sequence of `[[header]]text[[/header]]` pairs with
/// nothing in between, not even whitespace.
pub fn parse_paragraph(input: &str) -> TaggedResult<StyledParagraph> {
    let mut paragraph = StyledParagraph::new();
    let mut open: Option<(String, Style)> = None;
    let mut run_start = 0usize;
    let mut cursor = 0usize;

    for token in TAG_RE.find_iter(input) {
        let body = &token.as_str()[2..token.as_str().len() - 2];
        let (closing, header) = match body.strip_prefix('/') {
            Some(rest) => (true, rest.to_string()),
            None => (false, body.to_string()),
        };

        if closing {
            match open.take() {
                Some((open_header, style)) => {
                    if open_header != header {
                        return Err(TaggedError::MismatchedTag {
                            open: open_header,
                            close: header,
                        });
                    }
                    let text = &input[run_start..token.start()];
                    paragraph.add(StyledText::new(text, style));
                }
                None => return Err(TaggedError::StrayText(token.as_str().to_string())),
            }
        } else if open.is_some() {
            // Nested opening tags are not part of the format.
            return Err(TaggedError::StrayText(token.as_str().to_string()));
        } else {
            let between = &input[cursor..token.start()];
            if !between.is_empty() {
                return Err(TaggedError::StrayText(between.to_string()));
            }
            let style = parse_header(&header)?;
            open = Some((header, style));
            run_start = token.end();
        }
        cursor = token.end();
    }

    if let Some((header, _)) = open {
        return Err(TaggedError::UnclosedTag(header));
    }
    let trailing = &input[cursor..];
    if !trailing.is_empty() {
        return Err(TaggedError::StrayText(trailing.to_string()));
    }

    Ok(paragraph)
}

/// Parses one style header (the text between `[[` and `]]`).
fn parse_header(header: &str) -> TaggedResult<Style> {
    let mut style = Style::default();

    for token in header.split(';').filter(|token| !token.is_empty()) {
        if token == "bold" {
            style = style.switch_bold();
        } else if token == "italic" {
            style = style.switch_italic();
        } else if let Some(captures) = UNDERLINE_RE.captures(token) {
            let underline = UnderlineStyle::from_docx_value(&captures[1])
                .ok_or_else(|| TaggedError::BadHeader(token.to_string()))?;
            style = style.set_underline(Some(underline));
        } else if let Some(captures) = PT_RE.captures(token) {
            let points: u16 = captures[1]
                .parse()
                .map_err(|_| TaggedError::BadHeader(token.to_string()))?;
            let points =
                u8::try_from(points).map_err(|_| TaggedError::BadHeader(token.to_string()))?;
            style = style.change_size(points);
        } else if let Some(captures) = COLOR_RE.captures(token) {
            let color = captures[2].to_string();
            style = match &captures[1] {
                "fc" => style
                    .change_font_color(color)
                    .map_err(|_| TaggedError::BadHeader(token.to_string()))?,
                _ => style
                    .change_font_highlight(Some(color))
                    .map_err(|_| TaggedError::BadHeader(token.to_string()))?,
            };
        } else if token.starts_with("fc(") || token.starts_with("hc(") {
            return Err(TaggedError::BadHeader(token.to_string()));
        } else {
            // Bare token: the font family. Documents are authoritative about
            // families this host may not have, so skip the catalog here.
            style = style.set_font_unchecked(token.to_string());
        }
    }

    Ok(style)
}
