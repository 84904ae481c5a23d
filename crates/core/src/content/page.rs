//! Front-office page entity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vitrine_shared::types::PageId;
use vitrine_shared::Locale;

use super::intl::{ContentKind, Intl, IntlSet, Localized, MediaRef};

/// A front-office content page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Persisted id. `None` until the page is saved; unsaved pages are
    /// never cached by the view context.
    pub id: Option<PageId>,
    /// Slug under the locale prefix.
    pub slug: String,
    /// Translation records.
    pub intls: IntlSet,
    /// Media references, all locales mixed.
    pub media: Vec<MediaRef>,
}

impl Page {
    /// Creates an unsaved page.
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            id: None,
            slug: slug.into(),
            intls: IntlSet::new(),
            media: Vec::new(),
        }
    }

    /// Marks the page as persisted under a fresh id.
    #[must_use]
    pub fn persisted(mut self) -> Self {
        self.id = Some(PageId::new());
        self
    }
}

impl Localized for Page {
    fn content_id(&self) -> Option<Uuid> {
        self.id.map(PageId::into_inner)
    }

    fn content_kind(&self) -> ContentKind {
        ContentKind::Page
    }

    fn intl(&self, locale: &Locale) -> Option<&Intl> {
        self.intls.get(locale)
    }

    fn media(&self, locale: &Locale) -> Vec<MediaRef> {
        self.media
            .iter()
            .filter(|m| &m.locale == locale)
            .cloned()
            .collect()
    }
}
