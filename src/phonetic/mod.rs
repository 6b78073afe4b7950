//! Phonetic keys for Malayalam words.
//!
//! This module turns a Malayalam word into three phonetic keys, in the way
//! Metaphone and Soundex do for English: words that sound alike collapse to
//! the same key, so a search can match them despite spelling variation.
//!
//! # Keys
//!
//! - **key2** - the narrowest key: hard sounds, gemination, vowel length and
//!   vowel quality are all kept as marker digits
//! - **key1** - key2 without the gemination and vowel markers (`2`, `4`-`9`)
//! - **key0** - key1 without the hard-sound marker `1`; comparable to a
//!   Metaphone key
//!
//! The anuswaram marker `3` and the dental marker `0` survive in every key.
//!
//! # Pipeline
//!
//! 1. Drop every codepoint outside U+0D00..U+0D7F
//! 2. Run six substitution passes in precedence order (see
//!    [`substitution_stages`]): compounds with a modifier, bare compounds,
//!    consonants/vowels with a modifier, bare consonants, bare vowels, chillus
//! 3. Give every leftover modifier its standalone value
//! 4. Flatten to ASCII letters and digits (key2)
//! 5. Patch the leading dead-L exception (`ULKAM` → `U0KAM`)
//! 6. Derive key1 and key0 from key2
//!
//! # Usage
//!
//! ```rust
//! use mlphone::phonetic::{compute, KeyLevel};
//!
//! let keys = compute("കേരളം");
//! assert_eq!(keys.key(KeyLevel::Full), "K6RL13");
//! assert_eq!(keys.key(KeyLevel::Hard), "KRL13");
//! assert_eq!(keys.key(KeyLevel::Broad), "KRL3");
//! ```

pub mod application;
pub mod matching;
pub mod rules;
pub mod types;

pub use application::{
    apply_stage, apply_stages, compute, explain, flatten, patch_exceptions, reduce_key,
    resolve_modifiers, segment, sounds_like, Segments,
};
pub use matching::{
    find_modified_glyphs, is_script_char, modified_glyph_at, normalize, ModifiedGlyph,
    SCRIPT_BLOCK,
};
pub use rules::{
    glyph_tables, modifier_at, substitution_stages, CHILLUS, COMPOUNDS, CONSONANTS, MODIFIERS,
    VOWELS,
};
pub use types::{GlyphTable, KeyLevel, KeyLevelError, PhoneticKeys, Segment, Stage, StageTrace};
