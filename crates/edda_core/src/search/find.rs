//! Plain-text search over document paragraphs.
//!
//! # Responsibility
//! - Locate query occurrences and return typed hits with char ranges.
//! - Produce short bracketed snippets for result lists.
//!
//! # Invariants
//! - Hits are ordered by (paragraph index, char offset).
//! - Blank queries and a zero limit return no hits.
//! - All offsets are char-based and valid for paragraph editing calls.

use crate::model::document::Document;
use std::ops::Range;

const SNIPPET_CONTEXT_CHARS: usize = 12;

/// Search options for find-in-document behavior.
#[derive(Debug, Clone)]
pub struct FindQuery {
    /// User query text.
    pub text: String,
    /// Whether matching distinguishes letter case.
    pub case_sensitive: bool,
    /// Maximum number of hits to return.
    pub limit: u32,
}

impl FindQuery {
    /// Creates a case-insensitive query with default pagination.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            case_sensitive: false,
            limit: 20,
        }
    }
}

/// Single hit returned by [`find_in_document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindHit {
    /// Index of the paragraph containing the match.
    pub paragraph: usize,
    /// Char range of the match within that paragraph.
    pub range: Range<usize>,
    /// Context excerpt with the match in brackets.
    pub snippet: String,
}

/// Scans the document for query occurrences in display order.
pub fn find_in_document(document: &Document, query: &FindQuery) -> Vec<FindHit> {
    let needle: Vec<char> = query.text.trim().chars().collect();
    if needle.is_empty() || query.limit == 0 {
        return Vec::new();
    }

    let mut hits = Vec::new();
    for (paragraph_idx, paragraph) in document.paragraphs().enumerate() {
        let haystack: Vec<char> = paragraph.plain_text().chars().collect();
        if haystack.len() < needle.len() {
            continue;
        }

        let mut offset = 0usize;
        while offset + needle.len() <= haystack.len() {
            if chars_match(&haystack[offset..offset + needle.len()], &needle, query.case_sensitive)
            {
                let range = offset..offset + needle.len();
                hits.push(FindHit {
                    paragraph: paragraph_idx,
                    snippet: snippet(&haystack, &range),
                    range,
                });
                if hits.len() as u32 >= query.limit {
                    return hits;
                }
                // Overlapping matches are not reported twice.
                offset += needle.len();
            } else {
                offset += 1;
            }
        }
    }

    hits
}

fn chars_match(window: &[char], needle: &[char], case_sensitive: bool) -> bool {
    if case_sensitive {
        return window == needle;
    }
    window
        .iter()
        .zip(needle)
        .all(|(a, b)| a.to_lowercase().eq(b.to_lowercase()))
}

/// Builds `context[match]context` with a bounded context window.
fn snippet(haystack: &[char], range: &Range<usize>) -> String {
    let before_start = range.start.saturating_sub(SNIPPET_CONTEXT_CHARS);
    let after_end = (range.end + SNIPPET_CONTEXT_CHARS).min(haystack.len());

    let mut buffer = String::new();
    buffer.extend(&haystack[before_start..range.start]);
    buffer.push('[');
    buffer.extend(&haystack[range.start..range.end]);
    buffer.push(']');
    buffer.extend(&haystack[range.end..after_end]);
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::paragraph::StyledParagraph;
    use crate::model::style::Style;
    use crate::model::text::StyledText;

    fn document(lines: &[&str]) -> Document {
        let mut doc = Document::new("find fixture");
        for line in lines {
            let mut para = StyledParagraph::new();
            para.add(StyledText::new(*line, Style::default()));
            doc.push_paragraph(para);
        }
        doc
    }

    #[test]
    fn finds_hits_across_paragraphs_in_order() {
        let doc = document(&["alpha beta", "gamma alpha"]);
        let hits = find_in_document(&doc, &FindQuery::new("alpha"));

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].paragraph, 0);
        assert_eq!(hits[0].range, 0..5);
        assert_eq!(hits[1].paragraph, 1);
        assert_eq!(hits[1].range, 6..11);
    }

    #[test]
    fn matching_ignores_case_by_default() {
        let doc = document(&["Alpha ALPHA alpha"]);
        let hits = find_in_document(&doc, &FindQuery::new("alpha"));
        assert_eq!(hits.len(), 3);

        let mut query = FindQuery::new("alpha");
        query.case_sensitive = true;
        let hits = find_in_document(&doc, &query);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].range, 12..17);
    }

    #[test]
    fn blank_query_and_zero_limit_return_nothing() {
        let doc = document(&["anything"]);
        assert!(find_in_document(&doc, &FindQuery::new("   ")).is_empty());

        let mut query = FindQuery::new("anything");
        query.limit = 0;
        assert!(find_in_document(&doc, &query).is_empty());
    }

    #[test]
    fn limit_caps_hit_count() {
        let doc = document(&["x x x x x"]);
        let mut query = FindQuery::new("x");
        query.limit = 3;
        assert_eq!(find_in_document(&doc, &query).len(), 3);
    }

    #[test]
    fn snippet_brackets_the_match_with_context() {
        let doc = document(&["the quick brown fox jumps over the lazy dog"]);
        let hits = find_in_document(&doc, &FindQuery::new("fox"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].snippet, "quick brown [fox] jumps over ");
    }

    #[test]
    fn ranges_are_char_based_for_multibyte_text() {
        let doc = document(&["héllo wörld"]);
        let hits = find_in_document(&doc, &FindQuery::new("wörld"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].range, 6..11);
    }
}
