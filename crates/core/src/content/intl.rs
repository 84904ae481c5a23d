//! Intl (translation) records and the `Localized` accessor trait.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vitrine_shared::types::MediaId;
use vitrine_shared::Locale;

/// A locale-specific translation record attached to a content entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intl {
    /// Locale this record translates for.
    pub locale: Locale,
    /// Title text.
    pub title: Option<String>,
    /// Introduction text.
    pub introduction: Option<String>,
    /// Body markup.
    pub body: Option<String>,
    /// Raw link field; resolved to a `LinkTarget` at projection time.
    pub link: Option<String>,
}

impl Intl {
    /// Creates an empty record for a locale.
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            title: None,
            introduction: None,
            body: None,
            link: None,
        }
    }

    /// Creates a record for `locale` inheriting metadata (link fields)
    /// from the default locale's record. Text is never inherited: the new
    /// locale starts untranslated.
    #[must_use]
    pub fn inherit_from(default: &Self, locale: Locale) -> Self {
        Self {
            locale,
            title: None,
            introduction: None,
            body: None,
            link: default.link.clone(),
        }
    }
}

/// The Intl records of one entity, at most one per locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntlSet {
    records: Vec<Intl>,
}

impl IntlSet {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record for an exact locale, if present.
    #[must_use]
    pub fn get(&self, locale: &Locale) -> Option<&Intl> {
        self.records.iter().find(|i| &i.locale == locale)
    }

    /// Mutable variant of [`IntlSet::get`].
    pub fn get_mut(&mut self, locale: &Locale) -> Option<&mut Intl> {
        self.records.iter_mut().find(|i| &i.locale == locale)
    }

    /// Inserts a record, replacing any existing one for the same locale.
    pub fn upsert(&mut self, intl: Intl) {
        match self.records.iter().position(|i| i.locale == intl.locale) {
            Some(index) => self.records[index] = intl,
            None => self.records.push(intl),
        }
    }

    /// Returns the record for `locale`, lazily creating it on first
    /// access by inheriting metadata from the default locale's record
    /// (copy-on-first-access).
    pub fn ensure(&mut self, locale: &Locale, default_locale: &Locale) -> &mut Intl {
        let index = match self.records.iter().position(|i| &i.locale == locale) {
            Some(index) => index,
            None => {
                let created = match self.get(default_locale) {
                    Some(default) => Intl::inherit_from(default, locale.clone()),
                    None => Intl::new(locale.clone()),
                };
                self.records.push(created);
                self.records.len() - 1
            }
        };
        &mut self.records[index]
    }

    /// Iterates over all records.
    pub fn iter(&self) -> impl Iterator<Item = &Intl> {
        self.records.iter()
    }
}

/// A media reference attached to a content entity for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    /// Unique identifier.
    pub id: MediaId,
    /// Locale this media belongs to.
    pub locale: Locale,
    /// Path under the website's upload namespace.
    pub path: String,
    /// Alternative text.
    pub alt: Option<String>,
}

/// Kind discriminant for projection cache keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// A front-office page.
    Page,
    /// A layout block.
    Block,
    /// A newscast entry.
    News,
}

/// Explicit field access for translatable entities.
///
/// Every projectable entity implements this instead of exposing its
/// fields through reflection-style lookups.
pub trait Localized {
    /// Persisted id, or `None` for unsaved entities. Unsaved entities are
    /// never cached.
    fn content_id(&self) -> Option<Uuid>;

    /// Kind discriminant used in cache keys.
    fn content_kind(&self) -> ContentKind;

    /// Exact-locale Intl lookup. No fallback to other locales.
    fn intl(&self, locale: &Locale) -> Option<&Intl>;

    /// Media references filtered to the locale.
    fn media(&self, locale: &Locale) -> Vec<MediaRef>;
}
