//! `Accept-Language` header parsing.
//!
//! Quality weights are kept as integer thousandths (q=0.85 → 850) so the
//! parser stays off floating point entirely.

use vitrine_shared::Locale;

/// One language range from an `Accept-Language` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageRange {
    /// The parsed locale tag.
    pub locale: Locale,
    /// Quality weight in thousandths, 0..=1000.
    pub quality: u16,
}

/// Parses an `Accept-Language` header into ranges sorted by descending
/// quality. Malformed entries, wildcards, and `q=0` entries are skipped;
/// header order is preserved among equal weights.
#[must_use]
pub fn parse_accept_language(header: &str) -> Vec<LanguageRange> {
    let mut ranges: Vec<LanguageRange> = header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let tag = parts.next()?.trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }
            let locale = Locale::parse(tag).ok()?;

            let mut quality = 1000;
            for param in parts {
                let (key, value) = param.split_once('=')?;
                if key.trim() == "q" {
                    quality = parse_quality(value.trim())?;
                }
            }

            (quality > 0).then_some(LanguageRange { locale, quality })
        })
        .collect();

    ranges.sort_by(|a, b| b.quality.cmp(&a.quality));
    ranges
}

/// Parses a quality value (`1`, `1.0`, `0.85`) into thousandths.
/// Returns `None` for anything outside 0..=1.
fn parse_quality(value: &str) -> Option<u16> {
    let (integer, fraction) = match value.split_once('.') {
        Some((i, f)) => (i, f),
        None => (value, ""),
    };

    let integer: u16 = integer.parse().ok()?;
    if integer > 1 || fraction.len() > 3 || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let mut millis = integer * 1000;
    if !fraction.is_empty() {
        let padded = format!("{fraction:0<3}");
        millis += padded.parse::<u16>().ok()?;
    }

    (millis <= 1000).then_some(millis)
}
