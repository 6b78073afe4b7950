//! Script filtering and glyph matching.
//!
//! # Functions
//!
//! - [`is_script_char`] / [`normalize`] - keep only Malayalam-block codepoints
//! - [`modified_glyph_at`] - glyph + trailing modifier at the start of a string
//! - [`find_modified_glyphs`] - every glyph + modifier span, left to right

use std::ops::RangeInclusive;

use super::rules::modifier_at;
use super::types::GlyphTable;

/// The Malayalam Unicode block.
pub const SCRIPT_BLOCK: RangeInclusive<char> = '\u{0D00}'..='\u{0D7F}';

/// Check if a codepoint belongs to the Malayalam block.
#[inline]
pub fn is_script_char(c: char) -> bool {
    SCRIPT_BLOCK.contains(&c)
}

/// Drop every codepoint outside the Malayalam block, preserving order.
///
/// The result is trimmed of surrounding whitespace. Input with no
/// qualifying codepoints yields an empty string.
///
/// # Examples
///
/// ```rust
/// use mlphone::phonetic::normalize;
///
/// assert_eq!(normalize(" കേ-ര ളം! "), "കേരളം");
/// assert_eq!(normalize("hello"), "");
/// ```
pub fn normalize(input: &str) -> String {
    let filtered: String = input.chars().filter(|&c| is_script_char(c)).collect();
    filtered.trim().to_string()
}

/// A glyph immediately followed by a modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModifiedGlyph<'a> {
    /// The matched text (glyph followed by modifier)
    pub span: &'a str,
    /// Token of the glyph
    pub token: &'static str,
    /// Standalone value of the modifier
    pub value: &'static str,
}

impl ModifiedGlyph<'_> {
    /// The resolved form of the span: glyph token followed by modifier value.
    pub fn resolved(&self) -> String {
        let mut out = String::with_capacity(self.token.len() + self.value.len());
        out.push_str(self.token);
        out.push_str(self.value);
        out
    }
}

/// Match a glyph from `tables` followed by a modifier at the start of `text`.
///
/// Tables and their entries are tried in order. The first glyph that is both
/// a prefix of `text` and immediately followed by a modifier wins; a glyph
/// that matches without a trailing modifier doesn't stop the search.
///
/// # Examples
///
/// ```rust
/// use mlphone::phonetic::{modified_glyph_at, CONSONANTS};
///
/// let m = modified_glyph_at(&[&CONSONANTS], "കേരളം").unwrap();
/// assert_eq!(m.span, "കേ");
/// assert_eq!(m.resolved(), "K6");
///
/// assert!(modified_glyph_at(&[&CONSONANTS], "രളം").is_none());
/// ```
pub fn modified_glyph_at<'a>(tables: &[&GlyphTable], text: &'a str) -> Option<ModifiedGlyph<'a>> {
    for table in tables {
        for (glyph, token) in table.iter() {
            let Some(rest) = text.strip_prefix(glyph) else {
                continue;
            };
            if let Some((modifier, value)) = modifier_at(rest) {
                return Some(ModifiedGlyph {
                    span: &text[..glyph.len() + modifier.len()],
                    token,
                    value,
                });
            }
        }
    }
    None
}

/// Find every non-overlapping glyph + modifier span in `text`, left to right.
///
/// After a match the scan resumes right after it; otherwise it advances by
/// one codepoint. The same span may be reported more than once.
pub fn find_modified_glyphs<'a>(tables: &[&GlyphTable], text: &'a str) -> Vec<ModifiedGlyph<'a>> {
    let mut matches = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];
        match modified_glyph_at(tables, rest) {
            Some(m) => {
                pos += m.span.len();
                matches.push(m);
            }
            None => {
                pos += rest.chars().next().map_or(1, char::len_utf8);
            }
        }
    }

    matches
}
