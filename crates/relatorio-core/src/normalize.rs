//! Label normalisation for alias matching.
//!
//! Template revisions disagree on casing, accents, and whitespace
//! ("Juízo" vs "Juizo", "N.º  processo" with a non-breaking space, ...).
//! Every label comparison in the crate goes through [`normalize_label`],
//! so accent and spacing variants collapse to a single alias key.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalise a label into its alias-table key.
///
/// Steps, in order:
///
/// 1. Replace non-breaking spaces (U+00A0) with ordinary spaces
/// 2. Trim leading/trailing whitespace
/// 3. Collapse internal whitespace runs to a single space
/// 4. NFD-decompose and drop combining marks ("ç" → "c", "é" → "e")
/// 5. Lowercase
///
/// Empty input normalises to the empty string. The function is pure and
/// idempotent: `normalize_label(normalize_label(s)) == normalize_label(s)`.
pub fn normalize_label(text: &str) -> String {
    let collapsed = text
        .replace('\u{a0}', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    collapsed
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// True when a cell's text normalises to the empty string.
///
/// This is the blank-guard test: whitespace-only cells count as blank.
pub fn is_blank(text: &str) -> bool {
    text.replace('\u{a0}', " ").trim().is_empty()
}
