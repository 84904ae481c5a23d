//! Request-scoped projection cache.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;
use vitrine_shared::Locale;

use super::intl::{ContentKind, Localized};
use super::projection::{project, ContentView};

/// Request-scoped view-model cache.
///
/// One context lives for exactly one request and is dropped with it; there
/// is no hidden process-wide state. Entries are never invalidated within a
/// request — callers must not mutate an entity after its first projection.
#[derive(Debug, Default)]
pub struct ViewContext {
    cache: HashMap<(ContentKind, Uuid, Locale), Arc<ContentView>>,
}

impl ViewContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the projection of `entity` for `locale`.
    ///
    /// Idempotent for persisted entities: the same (kind, id, locale)
    /// yields the identical `Arc` for the lifetime of the context.
    /// Entities without a persisted id are recomputed on every call so
    /// speculative/unsaved data is never cached.
    pub fn view(&mut self, entity: &dyn Localized, locale: &Locale) -> Arc<ContentView> {
        let Some(id) = entity.content_id() else {
            return Arc::new(project(entity, locale));
        };

        self.cache
            .entry((entity.content_kind(), id, locale.clone()))
            .or_insert_with(|| Arc::new(project(entity, locale)))
            .clone()
    }

    /// Number of cached projections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// True when nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
