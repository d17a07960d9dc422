//! Volume/part number extraction from titles and series names.
//!
//! A designator word (`vol`, `vol.`, `volume`, `tomo`, `parte`) followed by a
//! value token marks the volume. The token may be written as digits
//! (`vol. 12`), as a Roman numeral (`Volume XIV`) or as an Italian ordinal
//! word in either gender (`tomo quinta`, `parte ventesimo`).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::normalize::normalize;

/// Italian ordinal words from 1 to 20, masculine and feminine.
const ITALIAN_ORDINALS: &[(&str, &str, u32)] = &[
    ("primo", "prima", 1),
    ("secondo", "seconda", 2),
    ("terzo", "terza", 3),
    ("quarto", "quarta", 4),
    ("quinto", "quinta", 5),
    ("sesto", "sesta", 6),
    ("settimo", "settima", 7),
    ("ottavo", "ottava", 8),
    ("nono", "nona", 9),
    ("decimo", "decima", 10),
    ("undicesimo", "undicesima", 11),
    ("dodicesimo", "dodicesima", 12),
    ("tredicesimo", "tredicesima", 13),
    ("quattordicesimo", "quattordicesima", 14),
    ("quindicesimo", "quindicesima", 15),
    ("sedicesimo", "sedicesima", 16),
    ("diciassettesimo", "diciassettesima", 17),
    ("diciottesimo", "diciottesima", 18),
    ("diciannovesimo", "diciannovesima", 19),
    ("ventesimo", "ventesima", 20),
];

static VOLUME_RE: Lazy<Regex> = Lazy::new(|| {
    let ordinals = ITALIAN_ORDINALS
        .iter()
        .flat_map(|(masculine, feminine, _)| [*masculine, *feminine])
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(
        r"(?i)\b(?:vol\.\s*|(?:vol|volume|tomo|parte)\s+)(?P<v>[0-9]+|[ivxlcdm]+|{ordinals})\b"
    ))
    .expect("valid volume regex")
});

/// A designator value, classified once before resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VolumeToken<'a> {
    Digits(&'a str),
    Ordinal(u32),
    Roman(&'a str),
}

impl<'a> VolumeToken<'a> {
    fn classify(token: &'a str) -> Self {
        if token.bytes().all(|b| b.is_ascii_digit()) {
            return Self::Digits(token);
        }
        match ordinal_value(token) {
            Some(n) => Self::Ordinal(n),
            None => Self::Roman(token),
        }
    }

    fn resolve(self) -> Option<u32> {
        match self {
            Self::Digits(digits) => digits.parse().ok(),
            Self::Ordinal(n) => Some(n),
            Self::Roman(numeral) => roman_to_int(numeral),
        }
    }
}

/// Find a volume designator in `text` and resolve its value.
///
/// Returns `None` when no designator is present or its value cannot be
/// resolved; never `Some(0)` for a missing designator.
pub fn extract_volume(text: &str) -> Option<u32> {
    let caps = VOLUME_RE.captures(text)?;
    let token = caps.name("v")?.as_str();
    let volume = VolumeToken::classify(token).resolve();
    log::trace!("volume token {token:?} in {text:?} resolved to {volume:?}");
    volume
}

/// Map an Italian ordinal word (either gender, any case or accents) to 1..=20.
pub fn ordinal_value(word: &str) -> Option<u32> {
    let folded = normalize(word);
    ITALIAN_ORDINALS
        .iter()
        .find(|(masculine, feminine, _)| *masculine == folded || *feminine == folded)
        .map(|(_, _, n)| *n)
}

/// Convert a Roman numeral to an integer.
///
/// Reads right to left: a symbol smaller than the largest one seen so far is
/// subtracted, otherwise it is added and becomes the new largest. Returns
/// `None` for unknown symbols or a non-positive total.
pub fn roman_to_int(numeral: &str) -> Option<u32> {
    let mut total: i64 = 0;
    let mut largest: i64 = 0;
    for ch in numeral.chars().rev() {
        let value = match ch.to_ascii_lowercase() {
            'i' => 1,
            'v' => 5,
            'x' => 10,
            'l' => 50,
            'c' => 100,
            'd' => 500,
            'm' => 1000,
            _ => return None,
        };
        if value < largest {
            total -= value;
        } else {
            total += value;
            largest = value;
        }
    }
    u32::try_from(total).ok().filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits() {
        assert_eq!(extract_volume("vol. 12"), Some(12));
        assert_eq!(extract_volume("Vol.3"), Some(3));
        assert_eq!(extract_volume("Storia d'Italia, volume 7"), Some(7));
        assert_eq!(extract_volume("Tomo 2 di 3"), Some(2));
    }

    #[test]
    fn test_roman_numerals() {
        assert_eq!(extract_volume("Volume IV"), Some(4));
        assert_eq!(extract_volume("Volume IX"), Some(9));
        assert_eq!(extract_volume("Volume XIV"), Some(14));
        assert_eq!(extract_volume("Il Signore degli Anelli Volume II"), Some(2));
        assert_eq!(extract_volume("parte mcmxc"), Some(1990));
    }

    #[test]
    fn test_ordinal_words_both_genders() {
        for (masculine, feminine, n) in ITALIAN_ORDINALS {
            assert_eq!(extract_volume(&format!("tomo {masculine}")), Some(*n));
            assert_eq!(extract_volume(&format!("Parte {feminine}")), Some(*n));
        }
        assert_eq!(extract_volume("tomo quinta"), Some(5));
        assert_eq!(extract_volume("parte ventesimo"), Some(20));
    }

    #[test]
    fn test_same_value_three_spellings() {
        assert_eq!(extract_volume("Volume 3"), Some(3));
        assert_eq!(extract_volume("Volume III"), Some(3));
        assert_eq!(extract_volume("Volume terzo"), Some(3));
    }

    #[test]
    fn test_not_found() {
        assert_eq!(extract_volume("Iliade"), None);
        assert_eq!(extract_volume(""), None);
        assert_eq!(extract_volume("Il volume perduto"), None);
        assert_eq!(extract_volume("Partecipazione"), None);
        assert_eq!(extract_volume("Volcano 3"), None);
    }

    #[test]
    fn test_designator_needs_whole_value_token() {
        assert_eq!(extract_volume("volume 3a"), None);
        assert_eq!(extract_volume("tomo primordiale"), None);
    }

    #[test]
    fn test_roman_to_int() {
        assert_eq!(roman_to_int("XLII"), Some(42));
        assert_eq!(roman_to_int("mmxxiv"), Some(2024));
        assert_eq!(roman_to_int("IIII"), Some(4));
        assert_eq!(roman_to_int("XZ"), None);
        assert_eq!(roman_to_int(""), None);
    }

    #[test]
    fn test_ordinal_value_folds_case() {
        assert_eq!(ordinal_value("Dodicesima"), Some(12));
        assert_eq!(ordinal_value("TERZO"), Some(3));
        assert_eq!(ordinal_value("ventunesimo"), None);
    }
}
