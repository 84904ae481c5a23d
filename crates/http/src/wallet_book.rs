//! Per-website wallet state.

use dashmap::DashMap;
use serde::Serialize;
use vitrine_core::wallet::{CategoryType, Wallet};
use vitrine_shared::types::WebsiteId;

/// The wallet classification tree and wallets of one website.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WalletBook {
    /// Ordered category types.
    pub category_types: Vec<CategoryType>,
    /// Wallets holding operations.
    pub wallets: Vec<Wallet>,
}

/// Wallet state per website.
#[derive(Debug, Default)]
pub struct WalletBooks {
    books: DashMap<WebsiteId, WalletBook>,
}

impl WalletBooks {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` with mutable access to the website's book, creating an
    /// empty book on first access.
    pub fn with_book<R>(&self, website_id: WebsiteId, f: impl FnOnce(&mut WalletBook) -> R) -> R {
        let mut book = self.books.entry(website_id).or_default();
        f(&mut book)
    }

    /// Returns a copy of the website's book, if it has one.
    #[must_use]
    pub fn read_book(&self, website_id: WebsiteId) -> Option<WalletBook> {
        self.books.get(&website_id).map(|book| book.value().clone())
    }
}
