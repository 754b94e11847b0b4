//! Paragraph structure: an ordered sequence of styled runs.
//!
//! # Responsibility
//! - Hold runs in display order and keep them minimal (no two adjacent
//!   runs with the same style).
//! - Provide char-addressed editing primitives used by the editor service.
//!
//! # Invariants
//! - All offsets and ranges are char-based, never byte-based.
//! - Range operations affect exactly the requested span; runs are split at
//!   span boundaries when needed.
//! - After any mutation no empty run remains and adjacent runs with equal
//!   styles are merged.

use crate::model::style::{StyleCommand, StyleError};
use crate::model::text::StyledText;
use std::collections::VecDeque;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::Range;

pub type ParagraphResult<T> = Result<T, ParagraphError>;

/// Error for char-addressed paragraph edits.
#[derive(Debug)]
pub enum ParagraphError {
    /// Range start is past its end.
    InvalidRange { start: usize, end: usize },
    /// Offset or range does not fit the paragraph's char length.
    OutOfBounds { len: usize, start: usize, end: usize },
    /// A style command failed validation mid-application.
    Style(StyleError),
}

impl Display for ParagraphError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRange { start, end } => {
                write!(f, "invalid range: start {start} is past end {end}")
            }
            Self::OutOfBounds { len, start, end } => {
                write!(f, "range {start}..{end} is out of bounds for paragraph of {len} chars")
            }
            Self::Style(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ParagraphError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Style(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StyleError> for ParagraphError {
    fn from(value: StyleError) -> Self {
        Self::Style(value)
    }
}

/// Collection of text chunks, each with its own style.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyledParagraph {
    runs: VecDeque<StyledText>,
}

impl StyledParagraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a run at the end of the paragraph.
    pub fn add(&mut self, new: StyledText) {
        if new.text.is_empty() {
            return;
        }
        self.runs.push_back(new);
        self.coalesce();
    }

    /// Inserts a run before the current paragraph content.
    pub fn prepend(&mut self, new: StyledText) {
        if new.text.is_empty() {
            return;
        }
        self.runs.push_front(new);
        self.coalesce();
    }

    pub fn runs(&self) -> impl Iterator<Item = &StyledText> {
        self.runs.iter()
    }

    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Total char length across all runs.
    pub fn char_len(&self) -> usize {
        self.runs.iter().map(StyledText::char_len).sum()
    }

    /// Concatenated text of all runs, without styling.
    pub fn plain_text(&self) -> String {
        let mut buffer = String::with_capacity(self.runs.iter().map(|run| run.text.len()).sum());
        for run in &self.runs {
            buffer.push_str(&run.text);
        }
        buffer
    }

    /// Applies a style command to exactly the chars in `range`.
    ///
    /// Runs straddling a boundary are split so the command touches nothing
    /// outside the span. An empty range is a no-op.
    ///
    /// # Errors
    /// - `InvalidRange` / `OutOfBounds` for a malformed span.
    /// - `Style` when the command itself fails validation; the paragraph is
    ///   left unchanged in that case.
    pub fn apply_to_range(
        &mut self,
        range: Range<usize>,
        command: &StyleCommand,
    ) -> ParagraphResult<()> {
        self.check_range(&range)?;
        if range.is_empty() {
            return Ok(());
        }

        let mut rebuilt: VecDeque<StyledText> = VecDeque::with_capacity(self.runs.len() + 2);
        let mut cursor = 0usize;

        for run in &self.runs {
            let run_len = run.char_len();
            let run_range = cursor..cursor + run_len;
            cursor += run_len;

            let overlap_start = range.start.max(run_range.start);
            let overlap_end = range.end.min(run_range.end);
            if overlap_start >= overlap_end {
                rebuilt.push_back(run.clone());
                continue;
            }

            let local = overlap_start - run_range.start..overlap_end - run_range.start;
            let (before, middle, after) = split_run(run, &local);

            if let Some(before) = before {
                rebuilt.push_back(before);
            }
            let mut middle = middle;
            middle.restyle(command)?;
            rebuilt.push_back(middle);
            if let Some(after) = after {
                rebuilt.push_back(after);
            }
        }

        self.runs = rebuilt;
        self.coalesce();
        Ok(())
    }

    /// Inserts text at a char offset, adopting the style at that position.
    ///
    /// At offset 0 the first run's style is used; elsewhere the style of
    /// the char preceding the offset. An empty paragraph gets a run with
    /// the default style.
    pub fn insert_text(&mut self, char_offset: usize, text: &str) -> ParagraphResult<()> {
        let len = self.char_len();
        if char_offset > len {
            return Err(ParagraphError::OutOfBounds {
                len,
                start: char_offset,
                end: char_offset,
            });
        }
        if text.is_empty() {
            return Ok(());
        }

        if self.runs.is_empty() {
            self.runs.push_back(StyledText::new(text, Default::default()));
            return Ok(());
        }

        // Insertions at a run boundary land at the end of the earlier run,
        // so typed text continues the preceding style.
        let mut cursor = 0usize;
        let mut target = self.runs.len() - 1;
        let mut local = self.runs[target].char_len();
        for (idx, run) in self.runs.iter().enumerate() {
            let run_len = run.char_len();
            if char_offset <= cursor + run_len {
                target = idx;
                local = char_offset - cursor;
                break;
            }
            cursor += run_len;
        }

        let run = &mut self.runs[target];
        let byte = byte_offset(&run.text, local);
        run.text.insert_str(byte, text);
        self.coalesce();
        Ok(())
    }

    /// Removes exactly the chars in `range`.
    pub fn delete_range(&mut self, range: Range<usize>) -> ParagraphResult<()> {
        self.check_range(&range)?;
        if range.is_empty() {
            return Ok(());
        }

        let mut rebuilt: VecDeque<StyledText> = VecDeque::with_capacity(self.runs.len());
        let mut cursor = 0usize;

        for run in &self.runs {
            let run_len = run.char_len();
            let run_range = cursor..cursor + run_len;
            cursor += run_len;

            let overlap_start = range.start.max(run_range.start);
            let overlap_end = range.end.min(run_range.end);
            if overlap_start >= overlap_end {
                rebuilt.push_back(run.clone());
                continue;
            }

            let local = overlap_start - run_range.start..overlap_end - run_range.start;
            let (before, _middle, after) = split_run(run, &local);
            if let Some(before) = before {
                rebuilt.push_back(before);
            }
            if let Some(after) = after {
                rebuilt.push_back(after);
            }
        }

        self.runs = rebuilt;
        self.coalesce();
        Ok(())
    }

    fn check_range(&self, range: &Range<usize>) -> ParagraphResult<()> {
        if range.start > range.end {
            return Err(ParagraphError::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }
        let len = self.char_len();
        if range.end > len {
            return Err(ParagraphError::OutOfBounds {
                len,
                start: range.start,
                end: range.end,
            });
        }
        Ok(())
    }

    /// Merges adjacent runs with equal styles and drops empty runs.
    fn coalesce(&mut self) {
        let mut merged: VecDeque<StyledText> = VecDeque::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            if run.text.is_empty() {
                continue;
            }
            match merged.back_mut() {
                Some(last) if last.style == run.style => last.text.push_str(&run.text),
                _ => merged.push_back(run),
            }
        }
        self.runs = merged;
    }
}

/// Splits a run at local char boundaries into (before, middle, after).
///
/// `local` must be non-empty and within the run.
fn split_run(
    run: &StyledText,
    local: &Range<usize>,
) -> (Option<StyledText>, StyledText, Option<StyledText>) {
    let start_byte = byte_offset(&run.text, local.start);
    let end_byte = byte_offset(&run.text, local.end);

    let before = (local.start > 0).then(|| StyledText {
        text: run.text[..start_byte].to_string(),
        style: run.style.clone(),
    });
    let middle = StyledText {
        text: run.text[start_byte..end_byte].to_string(),
        style: run.style.clone(),
    };
    let after = (end_byte < run.text.len()).then(|| StyledText {
        text: run.text[end_byte..].to_string(),
        style: run.style.clone(),
    });

    (before, middle, after)
}

/// Byte offset of the `char_idx`-th char; text length when past the end.
fn byte_offset(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}
