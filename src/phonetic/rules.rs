//! Glyph tables and the ordered substitution stages.
//!
//! # Tables
//!
//! - [`VOWELS`] - independent vowels
//! - [`CONSONANTS`] - simple consonants
//! - [`CHILLUS`] - final dead-consonant forms
//! - [`COMPOUNDS`] - conjunct clusters (and two vowel-length ligatures)
//! - [`MODIFIERS`] - vowel signs, virama, anuswaram and visarga
//!
//! # Token Alphabet
//!
//! Tokens are a base Latin letter optionally followed by marker digits:
//!
//! | Digit | Meaning                                  |
//! |-------|------------------------------------------|
//! | `0`   | dental stop (ത/ഥ/ദ/ധ)                    |
//! | `1`   | hard / retroflex consonant                |
//! | `2`   | gemination                               |
//! | `3`   | anuswaram                                |
//! | `4-9` | vowel length, diphthong and vowel quality |
//!
//! # Stage Order
//!
//! [`substitution_stages()`] returns the passes in the order they must run.
//! Compounds are consumed before the consonants they are built from, so a
//! conjunct such as ക്ക always yields `K2` and never `K` + `K`.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use super::types::{GlyphTable, Stage};

/// Independent vowels.
pub static VOWELS: GlyphTable = GlyphTable {
    name: "vowels",
    entries: &[
        ("അ", "A"), ("ആ", "A"), ("ഇ", "I"), ("ഈ", "I"), ("ഉ", "U"), ("ഊ", "U"), ("ഋ", "R"),
        ("എ", "E"), ("ഏ", "E"), ("ഐ", "AI"), ("ഒ", "O"), ("ഓ", "O"), ("ഔ", "O"),
    ],
};

/// Simple consonants.
pub static CONSONANTS: GlyphTable = GlyphTable {
    name: "consonants",
    entries: &[
        ("ക", "K"), ("ഖ", "K"), ("ഗ", "K"), ("ഘ", "K"), ("ങ", "NG"),
        ("ച", "C"), ("ഛ", "C"), ("ജ", "J"), ("ഝ", "J"), ("ഞ", "NJ"),
        ("ട", "T"), ("ഠ", "T"), ("ഡ", "T"), ("ഢ", "T"), ("ണ", "N1"),
        ("ത", "0"), ("ഥ", "0"), ("ദ", "0"), ("ധ", "0"), ("ന", "N"),
        ("പ", "P"), ("ഫ", "F"), ("ബ", "B"), ("ഭ", "B"), ("മ", "M"),
        ("യ", "Y"), ("ര", "R"), ("ല", "L"), ("വ", "V"),
        ("ശ", "S1"), ("ഷ", "S1"), ("സ", "S"), ("ഹ", "H"),
        ("ള", "L1"), ("ഴ", "Z"), ("റ", "R1"),
    ],
};

/// Chillu (final dead-consonant) forms. Never take a trailing modifier.
pub static CHILLUS: GlyphTable = GlyphTable {
    name: "chillus",
    entries: &[
        ("ൽ", "L"), ("ൾ", "L1"), ("ൺ", "N1"),
        ("ൻ", "N"), ("ർ", "R1"), ("ൿ", "K"),
    ],
};

/// Conjunct consonant clusters.
pub static COMPOUNDS: GlyphTable = GlyphTable {
    name: "compounds",
    entries: &[
        ("ക്ക", "K2"), ("ഗ്ഗ", "K"), ("ങ്ങ", "NG"),
        ("ച്ച", "C2"), ("ജ്ജ", "J"), ("ഞ്ഞ", "NJ"),
        ("ട്ട", "T2"), ("ണ്ണ", "N2"),
        ("ത്ത", "0"), ("ദ്ദ", "D"), ("ദ്ധ", "D"), ("ന്ന", "NN"),
        ("ന്ത", "N0"), ("ങ്ക", "NK"), ("ണ്ട", "N1T"), ("ബ്ബ", "B"),
        ("പ്പ", "P2"), ("മ്മ", "M2"),
        ("യ്യ", "Y"), ("ല്ല", "L2"), ("വ്വ", "V"), ("ശ്ശ", "S1"), ("സ്സ", "S"),
        ("ള്ള", "L12"),
        ("ഞ്ച", "NC"), ("ക്ഷ", "KS1"), ("മ്പ", "MP"),
        ("റ്റ", "T"), ("ന്റ", "NT"),
        ("്രി", "R"),
        ("്രു", "R"),
    ],
};

/// Modifier marks and their standalone values.
///
/// An empty value marks a purely orthographic sign with no phonetic weight.
pub static MODIFIERS: GlyphTable = GlyphTable {
    name: "modifiers",
    entries: &[
        ("ാ", ""), ("ഃ", ""), ("്", ""), ("ൃ", "R"),
        ("ം", "3"), ("ി", "4"), ("ീ", "4"), ("ു", "5"), ("ൂ", "5"), ("െ", "6"),
        ("േ", "6"), ("ൈ", "7"), ("ൊ", "8"), ("ോ", "8"), ("ൌ", "9"), ("ൗ", "9"),
    ],
};

/// Every modifier is a single codepoint; this indexes them by `char`.
static MODIFIER_INDEX: LazyLock<FxHashMap<char, &'static str>> = LazyLock::new(|| {
    MODIFIERS
        .iter()
        .filter_map(|(glyph, value)| {
            let mut chars = glyph.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some((c, value)),
                _ => None,
            }
        })
        .collect()
});

/// Tables consulted by the consonant/vowel + modifier pass, in precedence order.
static CONSONANTS_AND_VOWELS: [&GlyphTable; 2] = [&CONSONANTS, &VOWELS];

/// Tables consulted by the compound + modifier pass.
static COMPOUNDS_ONLY: [&GlyphTable; 1] = [&COMPOUNDS];

/// The six substitution passes, in the order they must run.
static STAGES: [Stage; 6] = [
    Stage::Modified(&COMPOUNDS_ONLY),
    Stage::Bare(&COMPOUNDS),
    Stage::Modified(&CONSONANTS_AND_VOWELS),
    Stage::Bare(&CONSONANTS),
    Stage::Bare(&VOWELS),
    Stage::Bare(&CHILLUS),
];

/// Returns the modifier at the start of `text`, as `(glyph, value)`.
#[inline]
pub fn modifier_at(text: &str) -> Option<(&str, &'static str)> {
    let c = text.chars().next()?;
    let value = *MODIFIER_INDEX.get(&c)?;
    Some((&text[..c.len_utf8()], value))
}

/// Returns the substitution passes in precedence order.
pub fn substitution_stages() -> &'static [Stage] {
    &STAGES
}

/// Returns all five glyph tables.
pub fn glyph_tables() -> [&'static GlyphTable; 5] {
    [&VOWELS, &CONSONANTS, &CHILLUS, &COMPOUNDS, &MODIFIERS]
}
