//! # mlphone
//!
//! Phonetic hashing for Malayalam, in the spirit of Metaphone and Soundex.
//!
//! Every word maps to three keys of increasing precision. Words written
//! differently but pronounced alike share a key, which makes the keys
//! usable for fuzzy and phonetic search over a word list.
//!
//! ## Example
//!
//! ```rust
//! use mlphone::prelude::*;
//!
//! let keys = compute("കേരളം");
//! assert_eq!(keys.into_tuple(), ("KRL3".into(), "KRL13".into(), "K6RL13".into()));
//!
//! // ulsavam / uthsavam
//! assert!(sounds_like("ഉൽസവം", "ഉത്സവം", KeyLevel::Broad));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod phonetic;

/// CLI interface and utilities
#[cfg(feature = "cli")]
pub mod cli;

pub use phonetic::compute;

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::phonetic::{
        compute, explain, sounds_like, GlyphTable, KeyLevel, PhoneticKeys, Segment, StageTrace,
    };
}
