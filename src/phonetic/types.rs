//! Type definitions for the Malayalam phonetic pipeline.
//!
//! This module provides the core types shared by every pipeline stage:
//!
//! - [`GlyphTable`] - an immutable, ordered grapheme → token mapping
//! - [`Segment`] - one unit of the intermediate segment stream
//! - [`Stage`] - one substitution pass over the segment stream
//! - [`KeyLevel`] / [`PhoneticKeys`] - the key triple returned by [`compute`](super::compute)
//!
//! # Segment Stream
//!
//! Between normalization and flattening a word is represented as a sequence
//! of segments rather than a single string:
//!
//! ```text
//! "കേരളം"  →  [Pending("കേരളം")]
//!          →  [Resolved("K6"), Pending("ര"), Resolved("L13")]
//!          →  [Resolved("K6"), Resolved("R"), Resolved("L13")]
//! ```
//!
//! Resolved segments are never looked at again by later passes, so a token
//! produced by an early pass can't be re-matched by a later one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Glyph tables
// ============================================================================

/// An ordered mapping from script graphemes to phonetic tokens.
///
/// Entries are `(grapheme, token)` pairs. A grapheme is one or more
/// codepoints; a token is a string over `A-Z` and `0-9` (possibly empty for
/// purely orthographic modifiers). Entry order is the match precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphTable {
    /// Human-readable table name
    pub name: &'static str,
    /// Ordered `(grapheme, token)` pairs
    pub entries: &'static [(&'static str, &'static str)],
}

impl GlyphTable {
    /// Look up the token for an exact grapheme.
    pub fn get(&self, grapheme: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(g, _)| *g == grapheme)
            .map(|(_, token)| *token)
    }

    /// Find the first listed entry whose grapheme is a prefix of `text`.
    ///
    /// Returns the matched grapheme and its token.
    #[inline]
    pub fn match_at(&self, text: &str) -> Option<(&'static str, &'static str)> {
        self.entries
            .iter()
            .find(|(g, _)| text.starts_with(g))
            .copied()
    }

    /// Iterate over the table's `(grapheme, token)` pairs in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Segment stream
// ============================================================================

/// One unit of the intermediate representation.
///
/// # Variants
///
/// - `Pending(String)` - script text no pass has consumed yet
/// - `Resolved(String)` - a token (or token + modifier value) that later
///   passes must leave alone
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Unresolved script text
    Pending(String),
    /// A protected, already-resolved token
    Resolved(String),
}

impl Segment {
    /// Returns the segment's text regardless of its state.
    #[inline]
    pub fn as_str(&self) -> &str {
        match self {
            Segment::Pending(s) | Segment::Resolved(s) => s,
        }
    }

    /// Returns true for segments no pass has consumed yet.
    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, Segment::Pending(_))
    }
}

/// A single substitution pass.
///
/// - `Modified(tables)` - match a glyph from any of `tables` immediately
///   followed by a modifier, and resolve the pair as one span
/// - `Bare(table)` - match a glyph from `table` on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Glyph + trailing modifier pass
    Modified(&'static [&'static GlyphTable]),
    /// Bare glyph pass
    Bare(&'static GlyphTable),
}

impl Stage {
    /// Short label used in traces and the CLI `explain` output.
    pub fn label(&self) -> String {
        match self {
            Stage::Modified(tables) => {
                let names: Vec<&str> = tables.iter().map(|t| t.name).collect();
                format!("{} + modifier", names.join(" | "))
            }
            Stage::Bare(table) => table.name.to_string(),
        }
    }
}

/// Snapshot of the segment stream after one pipeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageTrace {
    /// Name of the step that produced `segments`
    pub stage: String,
    /// Segment stream after the step
    pub segments: Vec<Segment>,
}

// ============================================================================
// Keys
// ============================================================================

/// Which of the three keys to use.
///
/// - `Broad` (key0) - base letters and the anuswaram marker only
/// - `Hard` (key1) - additionally keeps the hard/retroflex marker `1`
/// - `Full` (key2) - every marker, including gemination and vowel quality
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum KeyLevel {
    /// key0
    Broad = 0,
    /// key1
    Hard = 1,
    /// key2
    #[default]
    Full = 2,
}

impl KeyLevel {
    /// All levels, coarsest first.
    pub const ALL: [KeyLevel; 3] = [KeyLevel::Broad, KeyLevel::Hard, KeyLevel::Full];

    /// Digits removed from key2 to obtain this level's key.
    pub fn dropped_digits(&self) -> &'static [char] {
        match self {
            KeyLevel::Broad => &['1', '2', '4', '5', '6', '7', '8', '9'],
            KeyLevel::Hard => &['2', '4', '5', '6', '7', '8', '9'],
            KeyLevel::Full => &[],
        }
    }
}

/// Error returned when parsing a [`KeyLevel`] from text fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyLevelError {
    /// The text is not one of `0`, `1`, `2`, `broad`, `hard`, `full`.
    #[error("Unknown key level '{0}' (expected 0, 1, 2, broad, hard or full)")]
    Unknown(String),
}

impl FromStr for KeyLevel {
    type Err = KeyLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "broad" | "key0" => Ok(KeyLevel::Broad),
            "1" | "hard" | "key1" => Ok(KeyLevel::Hard),
            "2" | "full" | "key2" => Ok(KeyLevel::Full),
            _ => Err(KeyLevelError::Unknown(s.to_string())),
        }
    }
}

/// The three phonetic keys of a word, coarsest first.
///
/// `key1` and `key0` are always derived from `key2` by deleting digits, never
/// recomputed, so `key0 ⊑ key1 ⊑ key2` as subsequences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneticKeys {
    /// Broad key: digits only from {0, 3}
    pub key0: String,
    /// Hard-sound key: digits only from {0, 1, 3}
    pub key1: String,
    /// Full key: every marker digit
    pub key2: String,
}

impl PhoneticKeys {
    /// Returns the key at `level`.
    pub fn key(&self, level: KeyLevel) -> &str {
        match level {
            KeyLevel::Broad => &self.key0,
            KeyLevel::Hard => &self.key1,
            KeyLevel::Full => &self.key2,
        }
    }

    /// Whether every key is empty (the word had no usable script codepoints).
    pub fn is_empty(&self) -> bool {
        self.key2.is_empty()
    }

    /// Consumes the keys, returning `(key0, key1, key2)`.
    pub fn into_tuple(self) -> (String, String, String) {
        (self.key0, self.key1, self.key2)
    }
}

impl From<PhoneticKeys> for (String, String, String) {
    fn from(keys: PhoneticKeys) -> Self {
        keys.into_tuple()
    }
}

// ============================================================================
// Display implementations
// ============================================================================

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Pending(s) => write!(f, "{}", s),
            Segment::Resolved(s) => write!(f, "{{{}}}", s),
        }
    }
}

impl fmt::Display for KeyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyLevel::Broad => write!(f, "broad"),
            KeyLevel::Hard => write!(f, "hard"),
            KeyLevel::Full => write!(f, "full"),
        }
    }
}

impl fmt::Display for PhoneticKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.key0, self.key1, self.key2)
    }
}

impl fmt::Display for StageTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.stage)?;
        for segment in &self.segments {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
