//! Locale tag type.
//!
//! A `Locale` is a lowercase language subtag with an optional uppercase
//! region subtag: `fr`, `en`, `pt-BR`. Both `-` and `_` separators are
//! accepted on parse; the canonical form uses `-`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when parsing a locale tag.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocaleError {
    /// The tag is empty or structurally invalid.
    #[error("invalid locale tag: {0:?}")]
    Invalid(String),
}

/// A validated locale tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    /// Parses and validates a locale tag.
    ///
    /// # Errors
    ///
    /// Returns `LocaleError::Invalid` if the tag is not a 2-3 letter
    /// language subtag optionally followed by a 2 letter region subtag.
    pub fn parse(tag: &str) -> Result<Self, LocaleError> {
        let mut parts = tag.split(['-', '_']);

        let language = parts.next().unwrap_or_default();
        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(LocaleError::Invalid(tag.to_string()));
        }

        let region = match parts.next() {
            None => None,
            Some(r) if r.len() == 2 && r.chars().all(|c| c.is_ascii_alphabetic()) => {
                Some(r.to_ascii_uppercase())
            }
            Some(_) => return Err(LocaleError::Invalid(tag.to_string())),
        };

        if parts.next().is_some() {
            return Err(LocaleError::Invalid(tag.to_string()));
        }

        Ok(Self {
            language: language.to_ascii_lowercase(),
            region,
        })
    }

    /// Returns the lowercase language subtag (`fr` in `fr-BE`).
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Returns the uppercase region subtag, if any (`BE` in `fr-BE`).
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Returns true when both tags share the same language subtag.
    #[must_use]
    pub fn same_language(&self, other: &Self) -> bool {
        self.language == other.language
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{}", self.language, region),
            None => write!(f, "{}", self.language),
        }
    }
}

impl std::str::FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = LocaleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.to_string()
    }
}
