//! Text folding used for every comparison between human-entered strings.
//!
//! Display values are never altered; callers compare the folded form and keep
//! the unfolded value for output.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

static SHORT_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{1,4}").expect("valid number regex"));

/// Fold a string into its comparison form.
///
/// Decomposes (NFKD), drops combining marks, case-folds and trims, so that
/// `"  Èco "` and `"eco"` compare equal, as do `"Straße"` and `"STRASSE"`.
/// Idempotent.
pub fn normalize(s: &str) -> String {
    let stripped: String = s.nfkd().filter(|c| !is_combining_mark(*c)).collect();
    fold_case(&stripped).trim().to_string()
}

/// Lowercase plus the full case foldings that lowercasing alone misses.
fn fold_case(s: &str) -> String {
    let mut folded = String::with_capacity(s.len());
    for c in s.to_lowercase().chars() {
        match c {
            'ß' => folded.push_str("ss"),
            'ς' => folded.push('σ'),
            _ => folded.push(c),
        }
    }
    folded
}

/// Like [`normalize`], with a missing value folding to the empty string.
pub fn normalize_opt(s: Option<&str>) -> String {
    s.map(normalize).unwrap_or_default()
}

/// Extract a year from free text: the first run of 1 to 4 ASCII digits.
///
/// `"c. 1990 (ristampa)"` yields `Some(1990)`; text without digits yields
/// `None`. A longer run such as `"19901"` yields its first four digits.
pub fn extract_year(s: &str) -> Option<u16> {
    SHORT_NUMBER_RE.find(s).and_then(|m| m.as_str().parse().ok())
}

/// The first run of 1 to 4 ASCII digits in `s`, scanned like a year.
///
/// Used for stored volume cells, so `"12"` and `"vol 12"` both load as 12.
pub fn first_number(s: &str) -> Option<u32> {
    SHORT_NUMBER_RE.find(s).and_then(|m| m.as_str().parse().ok())
}
