//! XSS heuristic screening.
//!
//! Scalar request values and the raw URI are matched against a small
//! pattern set: script tags, inline event handlers, script-scheme URLs,
//! and embeddable tags. Admin-area and framework-internal paths are
//! exempted by the HTTP layer, not here.

use once_cell::sync::Lazy;
use regex::RegexSet;

use super::SecurityError;

static XSS_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"(?i)<\s*script",
        r"(?i)\bon[a-z]+\s*=",
        r"(?i)javascript\s*:",
        r"(?i)vbscript\s*:",
        r"(?i)<\s*(iframe|object|embed|applet)",
        r"(?i)expression\s*\(",
    ])
    .expect("XSS pattern set is well-formed")
});

/// Returns true when a single value trips the heuristics.
#[must_use]
pub fn screen_value(value: &str) -> bool {
    XSS_PATTERNS.is_match(value)
}

/// Screens the raw request URI and every scalar GET/POST value.
///
/// # Errors
///
/// Returns `SecurityError::XssDetected` naming the first offending field.
pub fn screen_request<'a, I>(uri: &str, values: I) -> Result<(), SecurityError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    if screen_value(uri) {
        return Err(SecurityError::XssDetected {
            field: "uri".to_string(),
        });
    }

    for (field, value) in values {
        if screen_value(value) {
            return Err(SecurityError::XssDetected {
                field: field.to_string(),
            });
        }
    }

    Ok(())
}
