//! Character style definition and style commands.
//!
//! # Responsibility
//! - Define the style attached to every run of document text.
//! - Validate color and font-family inputs before they reach a style.
//!
//! # Invariants
//! - A failed `change_*` call never produces a half-updated style.
//! - Color values are `#` plus 6 or 8 hex digits (8 when an alpha channel
//!   is present).
//! - `Display` output is the canonical tag header used by the tagged text
//!   format; two styles render equal headers iff they are equal.

use crate::model::fonts;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static HEX_COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").expect("valid hex color regex")
});

pub const DEFAULT_FONT_FAMILY: &str = "Arial";
pub const DEFAULT_FONT_SIZE_PT: u8 = 11;
pub const DEFAULT_FONT_COLOR: &str = "#000000";

pub type StyleResult<T> = Result<T, StyleError>;

/// Validation error for style mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    InvalidHexColor(String),
    FontNotFound(String),
}

impl Display for StyleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidHexColor(value) => {
                write!(f, "invalid hex color `{value}`; expected #RRGGBB or #RRGGBBAA")
            }
            Self::FontNotFound(family) => {
                write!(f, "font family `{family}` is not known to the font catalog")
            }
        }
    }
}

impl Error for StyleError {}

/// Underline variants supported by the document format.
///
/// `Display` yields the DOCX underline value expected by run properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnderlineStyle {
    Single,
    Double,
    Dash,
    Dotted,
    Wavy,
}

impl UnderlineStyle {
    /// Parses a DOCX underline value (`single`, `double`, ...).
    pub fn from_docx_value(value: &str) -> Option<Self> {
        match value {
            "single" => Some(Self::Single),
            "double" => Some(Self::Double),
            "dash" => Some(Self::Dash),
            "dotted" => Some(Self::Dotted),
            "wave" | "wavy" => Some(Self::Wavy),
            _ => None,
        }
    }
}

impl Display for UnderlineStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::Dash => "dash",
            Self::Dotted => "dotted",
            Self::Wavy => "wave",
        };
        write!(f, "{value}")
    }
}

/// Style mutation command issued by editing surfaces.
///
/// Toggle commands flip the current value; the rest set it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleCommand {
    Bold,
    Italic,
    Underline(Option<UnderlineStyle>),
    Size(u8),
    Font(String),
    Color(String),
    Highlight(Option<String>),
}

/// A defined style for a chunk of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    bold: bool,
    italic: bool,
    underline: Option<UnderlineStyle>,
    size: u8,
    font: String,
    font_color: String,
    highlight_color: Option<String>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            underline: None,
            size: DEFAULT_FONT_SIZE_PT,
            font: DEFAULT_FONT_FAMILY.to_string(),
            font_color: DEFAULT_FONT_COLOR.to_string(),
            highlight_color: None,
        }
    }
}

impl Style {
    pub fn bold(&self) -> bool {
        self.bold
    }

    pub fn italic(&self) -> bool {
        self.italic
    }

    pub fn underline(&self) -> Option<&UnderlineStyle> {
        self.underline.as_ref()
    }

    /// Font size in points.
    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn font(&self) -> &str {
        &self.font
    }

    /// Hex color including the leading `#`.
    pub fn font_color(&self) -> &str {
        &self.font_color
    }

    pub fn highlight_color(&self) -> Option<&str> {
        self.highlight_color.as_deref()
    }

    pub fn switch_bold(mut self) -> Self {
        self.bold = !self.bold;
        self
    }

    pub fn switch_italic(mut self) -> Self {
        self.italic = !self.italic;
        self
    }

    pub fn set_underline(mut self, underline: Option<UnderlineStyle>) -> Self {
        self.underline = underline;
        self
    }

    pub fn change_size(mut self, new_size: u8) -> Self {
        self.size = new_size;
        self
    }

    pub fn change_font_color(mut self, new_color: String) -> StyleResult<Self> {
        check_hex(&new_color)?;
        self.font_color = new_color;
        Ok(self)
    }

    pub fn change_font_highlight(mut self, new_color: Option<String>) -> StyleResult<Self> {
        if let Some(color) = &new_color {
            check_hex(color)?;
        }
        self.highlight_color = new_color;
        Ok(self)
    }

    /// Changes the font family after checking it against the font catalog.
    pub fn change_font(mut self, new_font: String) -> StyleResult<Self> {
        if !fonts::is_known_family(&new_font) {
            return Err(StyleError::FontNotFound(new_font));
        }
        self.font = new_font;
        Ok(self)
    }

    /// Sets the font family without consulting the catalog.
    ///
    /// Reserved for deserialization paths (tagged text, DOCX import) where
    /// the document is authoritative about families this host may not have.
    pub(crate) fn set_font_unchecked(mut self, new_font: String) -> Self {
        self.font = new_font;
        self
    }
}

impl Display for Style {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.bold {
            write!(f, "bold;")?;
        }
        if self.italic {
            write!(f, "italic;")?;
        }
        if let Some(underline) = &self.underline {
            write!(f, "underline({underline});")?;
        }
        if let Some(highlight) = &self.highlight_color {
            write!(f, "hc({highlight});")?;
        }
        write!(f, "pt({});{};fc({})", self.size, self.font, self.font_color)
    }
}

/// Checks that the string is a valid hex color code: `#` followed by 6 or
/// 8 hex digits depending on alpha channel use.
fn check_hex(value: &str) -> StyleResult<()> {
    if HEX_COLOR_RE.is_match(value) {
        Ok(())
    } else {
        Err(StyleError::InvalidHexColor(value.to_string()))
    }
}
