//! Styled run of text.
//!
//! # Responsibility
//! - Pair a chunk of text with exactly one style.
//! - Apply style commands and map runs onto DOCX run properties.
//!
//! # Invariants
//! - A failed restyle leaves the previous style in place.
//! - `tagged()` output round-trips through `format::tagged` parsing.

use crate::model::style::{Style, StyleCommand, StyleResult};
use docx_rs::{Run, RunFonts};

/// Chunk of text attached to a certain style.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyledText {
    pub text: String,
    pub style: Style,
}

impl StyledText {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Number of chars in this run.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Applies a style command to this run.
    ///
    /// Validation failures (bad color, unknown font) leave the run's style
    /// untouched and surface the underlying [`crate::model::style::StyleError`].
    pub fn restyle(&mut self, command: &StyleCommand) -> StyleResult<()> {
        let updated = match command {
            StyleCommand::Bold => self.style.clone().switch_bold(),
            StyleCommand::Italic => self.style.clone().switch_italic(),
            StyleCommand::Underline(underline) => self.style.clone().set_underline(*underline),
            StyleCommand::Size(points) => self.style.clone().change_size(*points),
            StyleCommand::Font(family) => self.style.clone().change_font(family.clone())?,
            StyleCommand::Color(color) => self.style.clone().change_font_color(color.clone())?,
            StyleCommand::Highlight(color) => {
                self.style.clone().change_font_highlight(color.clone())?
            }
        };
        self.style = updated;
        Ok(())
    }

    /// Builds the DOCX run for this chunk.
    ///
    /// DOCX color values carry no leading `#`; sizes are written in points
    /// as-is, matching what the loader reads back.
    pub fn to_docx_run(&self) -> Run {
        let mut run = Run::new().add_text(&self.text);

        run = run.fonts(RunFonts::new().ascii(self.style.font()));
        run = run.size(usize::from(self.style.size()));
        run = run.color(&self.style.font_color()[1..]);
        if self.style.bold() {
            run = run.bold();
        }
        if self.style.italic() {
            run = run.italic();
        }
        if let Some(underline) = self.style.underline() {
            run = run.underline(format!("{underline}").as_str());
        }
        if let Some(highlight) = self.style.highlight_color() {
            run = run.highlight(&highlight[1..]);
        }

        run
    }

    /// Renders this run in the tagged text form `[[<header>]]text[[/<header>]]`.
    pub fn tagged(&self) -> String {
        format!("[[{}]]{}[[/{}]]", self.style, self.text, self.style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::style::{StyleError, UnderlineStyle};

    #[test]
    fn new_keeps_text_and_style() {
        let style = Style::default().switch_bold();
        let run = StyledText::new("Hello", style);
        assert_eq!(run.text, "Hello");
        assert!(run.style.bold());
        assert!(!run.style.italic());
    }

    #[test]
    fn default_run_is_empty_with_default_style() {
        let run = StyledText::default();
        assert_eq!(run.text, "");
        assert_eq!(run.style, Style::default());
    }

    #[test]
    fn tagged_wraps_text_in_matching_headers() {
        let style = Style::default().switch_bold().change_size(14);
        let run = StyledText::new("World", style);
        let header = "bold;pt(14);Arial;fc(#000000)";
        assert_eq!(run.tagged(), format!("[[{header}]]World[[/{header}]]"));
    }

    #[test]
    fn restyle_toggles_accumulate() {
        let mut run = StyledText::new("Test", Style::default());

        run.restyle(&StyleCommand::Bold).expect("bold toggles");
        assert!(run.style.bold());

        run.restyle(&StyleCommand::Italic).expect("italic toggles");
        assert!(run.style.italic());
        assert!(run.style.bold());

        run.restyle(&StyleCommand::Size(16)).expect("size is set");
        assert_eq!(run.style.size(), 16);

        run.restyle(&StyleCommand::Underline(Some(UnderlineStyle::Double)))
            .expect("underline is set");
        assert_eq!(run.style.underline(), Some(&UnderlineStyle::Double));
    }

    #[test]
    fn restyle_failure_preserves_previous_style() {
        let mut run = StyledText::new("Color", Style::default());
        let original = run.style.clone();

        let error = run
            .restyle(&StyleCommand::Color("InvalidHex".to_string()))
            .expect_err("malformed color must fail");
        assert!(matches!(error, StyleError::InvalidHexColor(_)));
        assert_eq!(run.style, original);

        let error = run
            .restyle(&StyleCommand::Font("DefinitelyNotAFontName123".to_string()))
            .expect_err("unknown font must fail");
        assert!(matches!(error, StyleError::FontNotFound(_)));
        assert_eq!(run.style, original);
    }

    #[test]
    fn char_len_counts_chars_not_bytes() {
        let run = StyledText::new("héllo", Style::default());
        assert_eq!(run.char_len(), 5);
    }
}
