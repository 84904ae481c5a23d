//! In-memory front-office content.
//!
//! Pages and their layouts per website, keyed by slug. Stands in for the
//! persistence layer, which is out of scope; handlers read it the same
//! way they would read a repository.

use dashmap::DashMap;
use vitrine_core::content::Page;
use vitrine_core::layout::Layout;
use vitrine_shared::types::WebsiteId;

/// A page plus its optional composition tree.
#[derive(Debug, Clone)]
pub struct PageEntry {
    /// The content entity.
    pub page: Page,
    /// Composition tree, if the page has one.
    pub layout: Option<Layout>,
}

/// Content lookup per (website, slug).
#[derive(Debug, Default)]
pub struct ContentCatalog {
    entries: DashMap<(WebsiteId, String), PageEntry>,
}

impl ContentCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a page under a slug.
    pub fn insert(&self, website_id: WebsiteId, slug: &str, page: Page, layout: Option<Layout>) {
        self.entries
            .insert((website_id, slug.to_string()), PageEntry { page, layout });
    }

    /// Returns a copy of the entry for a slug, if present.
    #[must_use]
    pub fn get(&self, website_id: WebsiteId, slug: &str) -> Option<PageEntry> {
        self.entries
            .get(&(website_id, slug.to_string()))
            .map(|entry| entry.value().clone())
    }
}
