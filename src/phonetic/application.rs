//! Pipeline application: from a raw word to its three phonetic keys.
//!
//! # Functions
//!
//! - [`segment`] - wrap normalized text as a segment stream
//! - [`apply_stage`] / [`apply_stages`] - run substitution passes
//! - [`resolve_modifiers`] - give leftover modifiers their standalone value
//! - [`flatten`] - drop everything that isn't an ASCII letter or digit
//! - [`patch_exceptions`] - the ulsavam/uthsavam correction
//! - [`reduce_key`] - derive a coarser key from key2
//! - [`compute`] / [`explain`] / [`sounds_like`] - entry points
//!
//! # Pipeline
//!
//! ```text
//! normalize → stages 1..6 → resolve_modifiers → flatten → patch_exceptions
//!           → key2 → key1 → key0
//! ```
//!
//! Every function here is pure. The only shared state is the set of
//! `'static` glyph tables, so [`compute`] can be called from any number of
//! threads at once.

use smallvec::SmallVec;
use tracing::{debug, trace};

use super::matching::{find_modified_glyphs, normalize};
use super::rules::{modifier_at, substitution_stages};
use super::types::{GlyphTable, KeyLevel, PhoneticKeys, Segment, Stage, StageTrace};

/// A segment stream. Most words fit inline.
pub type Segments = SmallVec<[Segment; 8]>;

/// First letters that trigger the dead-L exception.
const EXCEPTION_LEADS: &[u8] = b"AVTSUMO";

// ============================================================================
// Segment stream construction
// ============================================================================

/// Wrap already-normalized text as a single pending segment.
///
/// Empty text yields an empty stream.
pub fn segment(normalized: &str) -> Segments {
    let mut segments = Segments::new();
    if !normalized.is_empty() {
        segments.push(Segment::Pending(normalized.to_string()));
    }
    segments
}

/// Replace every occurrence of `pattern` inside pending segments with a
/// resolved segment holding `replacement`.
///
/// Occurrences are found left to right without overlap. Resolved segments
/// are copied through untouched.
fn replace_pending(segments: Segments, pattern: &str, replacement: &str) -> Segments {
    if !segments
        .iter()
        .any(|s| matches!(s, Segment::Pending(text) if text.contains(pattern)))
    {
        return segments;
    }

    let mut out = Segments::with_capacity(segments.len() + 2);
    for seg in segments {
        match seg {
            Segment::Pending(text) if text.contains(pattern) => {
                let mut rest = text.as_str();
                while let Some(idx) = rest.find(pattern) {
                    if idx > 0 {
                        out.push(Segment::Pending(rest[..idx].to_string()));
                    }
                    out.push(Segment::Resolved(replacement.to_string()));
                    rest = &rest[idx + pattern.len()..];
                }
                if !rest.is_empty() {
                    out.push(Segment::Pending(rest.to_string()));
                }
            }
            other => out.push(other),
        }
    }
    out
}

// ============================================================================
// Substitution passes
// ============================================================================

/// Glyph + modifier pass.
///
/// Collects every glyph + modifier span in the pending segments, then
/// resolves each distinct span everywhere it occurs, in order of first
/// appearance.
fn apply_modified(tables: &[&GlyphTable], segments: Segments) -> Segments {
    let mut distinct: Vec<(String, String)> = Vec::new();
    for seg in &segments {
        let Segment::Pending(text) = seg else {
            continue;
        };
        for m in find_modified_glyphs(tables, text) {
            if !distinct.iter().any(|(span, _)| span == m.span) {
                distinct.push((m.span.to_string(), m.resolved()));
            }
        }
    }

    distinct
        .iter()
        .fold(segments, |acc, (span, resolved)| replace_pending(acc, span, resolved))
}

/// Bare glyph pass: each table entry, in order, replaced everywhere.
fn apply_bare(table: &GlyphTable, segments: Segments) -> Segments {
    table
        .iter()
        .fold(segments, |acc, (glyph, token)| replace_pending(acc, glyph, token))
}

/// Run a single substitution pass over the segment stream.
pub fn apply_stage(stage: &Stage, segments: Segments) -> Segments {
    let out = match stage {
        Stage::Modified(tables) => apply_modified(tables, segments),
        Stage::Bare(table) => apply_bare(table, segments),
    };
    trace!(stage = %stage.label(), segments = ?out, "applied substitution stage");
    out
}

/// Run substitution passes in order, each consuming the previous one's output.
pub fn apply_stages(stages: &[Stage], segments: Segments) -> Segments {
    stages
        .iter()
        .fold(segments, |acc, stage| apply_stage(stage, acc))
}

// ============================================================================
// Post-substitution steps
// ============================================================================

/// Replace modifiers left in pending segments with their standalone value.
///
/// These are modifiers no pass attached to a glyph: at the start of a word,
/// after another modifier, or after an already-resolved span. Values are
/// written in place, unprotected; other pending text is kept as is.
pub fn resolve_modifiers(segments: Segments) -> Segments {
    segments
        .into_iter()
        .map(|seg| match seg {
            Segment::Pending(text) => {
                let mut out = String::with_capacity(text.len());
                let mut rest = text.as_str();
                while let Some(c) = rest.chars().next() {
                    match modifier_at(rest) {
                        Some((glyph, value)) => {
                            out.push_str(value);
                            rest = &rest[glyph.len()..];
                        }
                        None => {
                            out.push(c);
                            rest = &rest[c.len_utf8()..];
                        }
                    }
                }
                Segment::Pending(out)
            }
            resolved => resolved,
        })
        .collect()
}

/// Concatenate the stream, keeping only ASCII letters and digits.
///
/// The result is key2 before exception patching.
pub fn flatten(segments: &[Segment]) -> String {
    segments
        .iter()
        .flat_map(|s| s.as_str().chars())
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Apply the dead-L correction at the start of key2.
///
/// A leading `[AVTSUMO]` followed by `L` and then `K` or `S` has its `L`
/// replaced by `0` (`ULKAM` → `U0KAM`). Applies at most once.
///
/// # Examples
///
/// ```rust
/// use mlphone::phonetic::patch_exceptions;
///
/// assert_eq!(patch_exceptions("ULKAM"), "U0KAM");
/// assert_eq!(patch_exceptions("XLKAM"), "XLKAM");
/// ```
pub fn patch_exceptions(key2: &str) -> String {
    match key2.as_bytes() {
        [lead, b'L', b'K' | b'S', ..] if EXCEPTION_LEADS.contains(lead) => {
            let mut out = String::with_capacity(key2.len());
            out.push(*lead as char);
            out.push('0');
            out.push_str(&key2[2..]);
            out
        }
        _ => key2.to_string(),
    }
}

/// Derive the key at `level` from `key` by deleting that level's digits.
///
/// `reduce_key(key2, KeyLevel::Full)` returns key2 unchanged.
pub fn reduce_key(key: &str, level: KeyLevel) -> String {
    let dropped = level.dropped_digits();
    key.chars().filter(|c| !dropped.contains(c)).collect()
}

// ============================================================================
// Entry points
// ============================================================================

/// Compute the phonetic keys of a word.
///
/// Codepoints outside the Malayalam block are ignored. A word with none
/// yields three empty keys. Never fails.
///
/// # Examples
///
/// ```rust
/// use mlphone::phonetic::compute;
///
/// let keys = compute("കേരളം");
/// assert_eq!(keys.key2, "K6RL13");
/// assert_eq!(keys.key1, "KRL13");
/// assert_eq!(keys.key0, "KRL3");
/// ```
pub fn compute(word: &str) -> PhoneticKeys {
    let normalized = normalize(word);
    let segments = apply_stages(substitution_stages(), segment(&normalized));
    let segments = resolve_modifiers(segments);

    let key2 = patch_exceptions(&flatten(&segments));
    let key1 = reduce_key(&key2, KeyLevel::Hard);
    let key0 = reduce_key(&key1, KeyLevel::Broad);

    let keys = PhoneticKeys { key0, key1, key2 };
    debug!(word, %keys, "computed phonetic keys");
    keys
}

/// Record the segment stream after every pipeline step.
///
/// The first entry is the normalized input, followed by one entry per
/// substitution pass and a final `modifiers` entry. Flattening that last
/// stream and patching it gives the same key2 as [`compute`].
pub fn explain(word: &str) -> Vec<StageTrace> {
    let stages = substitution_stages();
    let mut traces = Vec::with_capacity(stages.len() + 2);

    let mut segments = segment(&normalize(word));
    traces.push(StageTrace {
        stage: "normalize".to_string(),
        segments: segments.to_vec(),
    });

    for stage in stages {
        segments = apply_stage(stage, segments);
        traces.push(StageTrace {
            stage: stage.label(),
            segments: segments.to_vec(),
        });
    }

    segments = resolve_modifiers(segments);
    traces.push(StageTrace {
        stage: "modifiers".to_string(),
        segments: segments.to_vec(),
    });

    traces
}

/// Whether two words share a non-empty key at `level`.
///
/// # Examples
///
/// ```rust
/// use mlphone::phonetic::{sounds_like, KeyLevel};
///
/// // ulsavam / uthsavam
/// assert!(sounds_like("ഉൽസവം", "ഉത്സവം", KeyLevel::Full));
/// assert!(!sounds_like("", "", KeyLevel::Broad));
/// ```
pub fn sounds_like(a: &str, b: &str, level: KeyLevel) -> bool {
    let key_a = compute(a);
    let key_b = compute(b);
    !key_a.key(level).is_empty() && key_a.key(level) == key_b.key(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phonetic::rules::{CHILLUS, COMPOUNDS, CONSONANTS};

    fn pending(s: &str) -> Segment {
        Segment::Pending(s.to_string())
    }

    fn resolved(s: &str) -> Segment {
        Segment::Resolved(s.to_string())
    }

    fn key2(word: &str) -> String {
        compute(word).key2
    }

    // ========================================================================
    // Segment handling
    // ========================================================================

    #[test]
    fn test_segment_empty() {
        assert!(segment("").is_empty());
        assert_eq!(segment("ക").as_slice(), &[pending("ക")]);
    }

    #[test]
    fn test_replace_pending_splits_segments() {
        let out = replace_pending(segment("കരക"), "ക", "K");
        assert_eq!(out.as_slice(), &[resolved("K"), pending("ര"), resolved("K")]);
    }

    #[test]
    fn test_replace_pending_leaves_resolved_alone() {
        let input: Segments = [resolved("ക"), pending("ക")].into_iter().collect();
        let out = replace_pending(input, "ക", "K");
        assert_eq!(out.as_slice(), &[resolved("ക"), resolved("K")]);
    }

    #[test]
    fn test_bare_stage_order_within_table() {
        let out = apply_stage(&Stage::Bare(&COMPOUNDS), segment("ക്കര"));
        assert_eq!(out.as_slice(), &[resolved("K2"), pending("ര")]);
    }

    #[test]
    fn test_modified_stage_resolves_all_occurrences() {
        static TABLES: [&GlyphTable; 1] = [&CONSONANTS];
        let out = apply_stage(&Stage::Modified(&TABLES), segment("കാരകാ"));
        assert_eq!(
            out.as_slice(),
            &[resolved("K"), pending("ര"), resolved("K")]
        );
    }

    #[test]
    fn test_chillu_stage() {
        let out = apply_stage(&Stage::Bare(&CHILLUS), segment("ൻൽ"));
        assert_eq!(out.as_slice(), &[resolved("N"), resolved("L")]);
    }

    #[test]
    fn test_resolve_modifiers_unattached() {
        let input: Segments = [pending("ം"), resolved("K"), pending("ി")].into_iter().collect();
        let out = resolve_modifiers(input);
        assert_eq!(out.as_slice(), &[pending("3"), resolved("K"), pending("4")]);
    }

    #[test]
    fn test_resolve_modifiers_empty_value() {
        let out = resolve_modifiers(segment("്ാ"));
        assert_eq!(out.as_slice(), &[pending("")]);
    }

    #[test]
    fn test_flatten_drops_residue() {
        let input = [resolved("K6"), pending("ഌ"), resolved("R"), pending("3")];
        assert_eq!(flatten(&input), "K6R3");
    }

    // ========================================================================
    // Exception and reduction
    // ========================================================================

    #[test]
    fn test_patch_exceptions_triggers() {
        assert_eq!(patch_exceptions("ULKAM"), "U0KAM");
        assert_eq!(patch_exceptions("ALS"), "A0S");
        assert_eq!(patch_exceptions("OLSV3"), "O0SV3");
    }

    #[test]
    fn test_patch_exceptions_ignored() {
        assert_eq!(patch_exceptions("XLKAM"), "XLKAM");
        assert_eq!(patch_exceptions("ULM"), "ULM");
        assert_eq!(patch_exceptions("UL"), "UL");
        assert_eq!(patch_exceptions("KULKAM"), "KULKAM");
        assert_eq!(patch_exceptions(""), "");
    }

    #[test]
    fn test_patch_exceptions_only_once() {
        assert_eq!(patch_exceptions("ULKULK"), "U0KULK");
    }

    #[test]
    fn test_reduce_key_levels() {
        assert_eq!(reduce_key("K6RL13", KeyLevel::Full), "K6RL13");
        assert_eq!(reduce_key("K6RL13", KeyLevel::Hard), "KRL13");
        assert_eq!(reduce_key("K6RL13", KeyLevel::Broad), "KRL3");
        assert_eq!(reduce_key("0N1T2456789", KeyLevel::Broad), "0NT");
    }

    // ========================================================================
    // Whole pipeline
    // ========================================================================

    #[test]
    fn test_compute_keralam() {
        let keys = compute("കേരളം");
        assert_eq!(keys.key2, "K6RL13");
        assert_eq!(keys.key1, "KRL13");
        assert_eq!(keys.key0, "KRL3");
    }

    #[test]
    fn test_compute_empty_and_foreign() {
        assert_eq!(compute(""), PhoneticKeys::default());
        assert_eq!(compute("hello, world"), PhoneticKeys::default());
    }

    #[test]
    fn test_compound_never_decomposes() {
        assert_eq!(key2("ക്ക"), "K2");
        assert_eq!(key2("അക്കാ"), "AK2");
        assert_ne!(key2("ക്ക"), "KK");
    }

    #[test]
    fn test_malayalam() {
        let keys = compute("മലയാളം");
        assert_eq!(keys.key2, "MLYL13");
        assert_eq!(keys.key1, "MLYL13");
        assert_eq!(keys.key0, "MLYL3");
    }

    #[test]
    fn test_leading_modifier_resolves_standalone() {
        assert_eq!(key2("ംക"), "3K");
    }

    #[test]
    fn test_repeated_modified_glyphs() {
        assert_eq!(key2("കാകി"), "KK4");
    }

    #[test]
    fn test_chillu_word() {
        assert_eq!(key2("അവൻ"), "AVN");
    }

    #[test]
    fn test_ligature_compound_blocks_modifier_pass() {
        // ്രി resolves first, leaving ക with no modifier to pair with
        assert_eq!(key2("ക്രിസ്തു"), "KRS05");
    }

    #[test]
    fn test_ulsavam_uthsavam() {
        assert_eq!(key2("ഉൽസവം"), "U0SV3");
        assert_eq!(key2("ഉത്സവം"), "U0SV3");
    }

    #[test]
    fn test_foreign_codepoints_ignored() {
        assert_eq!(compute("ക-േ"), compute("കേ"));
        assert_eq!(compute("x കേരളം y"), compute("കേരളം"));
    }

    #[test]
    fn test_explain_matches_compute() {
        let word = "കേരളം";
        let traces = explain(word);
        assert_eq!(traces.len(), substitution_stages().len() + 2);
        assert_eq!(traces[0].stage, "normalize");
        assert_eq!(traces[0].segments, vec![pending(word)]);

        let last = traces.last().unwrap();
        assert_eq!(last.stage, "modifiers");
        assert_eq!(patch_exceptions(&flatten(&last.segments)), compute(word).key2);
    }

    #[test]
    fn test_explain_after_consonant_vowel_modifier_pass() {
        let traces = explain("കേരളം");
        assert_eq!(
            traces[3].segments,
            vec![resolved("K6"), pending("ര"), resolved("L13")]
        );
    }

    #[test]
    fn test_sounds_like() {
        assert!(sounds_like("ഉൽസവം", "ഉത്സവം", KeyLevel::Broad));
        assert!(sounds_like("കേരളം", "കെരളം", KeyLevel::Full));
        assert!(!sounds_like("കേരളം", "കരളം", KeyLevel::Full));
        assert!(sounds_like("കേരളം", "കരളം", KeyLevel::Hard));
        assert!(!sounds_like("abc", "xyz", KeyLevel::Broad));
    }
}
