//! Hyperlink target resolution.

use serde::{Deserialize, Serialize};

use super::phone;

/// A resolved hyperlink target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum LinkTarget {
    /// Internal route path.
    Internal(String),
    /// Absolute external URL.
    External(String),
    /// `mailto:` address.
    Email(String),
    /// `tel:` number in normalized international form.
    Phone(String),
}

/// Resolves a raw link field into a target.
///
/// Detection order: explicit schemes, then e-mail shapes, then phone
/// numbers against the country calling-code table, then internal routes.
#[must_use]
pub fn resolve_link(raw: &str) -> LinkTarget {
    let raw = raw.trim();

    if let Some(address) = raw.strip_prefix("mailto:") {
        return LinkTarget::Email(address.to_string());
    }
    if let Some(number) = raw.strip_prefix("tel:") {
        return match phone::parse(number) {
            Some(normalized) => LinkTarget::Phone(normalized),
            None => LinkTarget::Phone(number.to_string()),
        };
    }

    let lower = raw.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") || raw.starts_with("//") {
        return LinkTarget::External(raw.to_string());
    }

    if raw.contains('@') && !raw.contains('/') && !raw.contains(' ') {
        return LinkTarget::Email(raw.to_string());
    }

    if let Some(normalized) = phone::parse(raw) {
        return LinkTarget::Phone(normalized);
    }

    // Internal routes are absolute paths.
    if raw.starts_with('/') {
        LinkTarget::Internal(raw.to_string())
    } else {
        LinkTarget::Internal(format!("/{raw}"))
    }
}
