//! Projection of a localized entity into a view model.

use serde::Serialize;
use vitrine_shared::Locale;

use super::intl::{Localized, MediaRef};
use super::link::{resolve_link, LinkTarget};

/// A read-only, locale-resolved projection of a content entity.
///
/// Exact-locale only: a missing Intl record yields `None` fields, never
/// another locale's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentView {
    /// Locale the projection was assembled for.
    pub locale: Locale,
    /// Title text, if translated.
    pub title: Option<String>,
    /// Introduction text, if translated.
    pub introduction: Option<String>,
    /// Body markup, if translated.
    pub body: Option<String>,
    /// Resolved hyperlink target, if the record carries a link.
    pub link: Option<LinkTarget>,
    /// Media references for this locale.
    pub media: Vec<MediaRef>,
}

/// Assembles the projection of `entity` for `locale`.
#[must_use]
pub fn project(entity: &dyn Localized, locale: &Locale) -> ContentView {
    let intl = entity.intl(locale);

    ContentView {
        locale: locale.clone(),
        title: intl.and_then(|i| i.title.clone()),
        introduction: intl.and_then(|i| i.introduction.clone()),
        body: intl.and_then(|i| i.body.clone()),
        link: intl
            .and_then(|i| i.link.as_deref())
            .map(resolve_link),
        media: entity.media(locale),
    }
}
