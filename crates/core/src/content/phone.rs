//! Phone-number detection against country calling codes.
//!
//! Accepts international forms only (`+33…` or `0033…`). The calling-code
//! table is matched longest-prefix-first; the first match wins.

/// Country calling codes, longest first so prefix matching never picks a
/// shorter code that shadows a longer one.
const CALLING_CODES: &[&str] = &[
    "352", "351", "353", "212", "216", "221", "213", "590", "596", "594", "262", "508",
    "33", "32", "41", "44", "49", "34", "39", "31", "30", "43", "45", "46", "47", "48",
    "55", "52", "81", "86", "61", "64", "65", "82", "90", "91", "20", "27",
    "1", "7",
];

/// Tries to read `raw` as an international phone number. Returns the
/// normalized `+<code><national>` form on success.
#[must_use]
pub fn parse(raw: &str) -> Option<String> {
    let compact: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '.' | '-' | '(' | ')'))
        .collect();

    let digits = compact
        .strip_prefix('+')
        .or_else(|| compact.strip_prefix("00"))?;

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let code = CALLING_CODES
        .iter()
        .filter(|code| digits.starts_with(**code))
        .max_by_key(|code| code.len())?;

    let national = &digits[code.len()..];
    if !(4..=12).contains(&national.len()) {
        return None;
    }

    Some(format!("+{code}{national}"))
}
