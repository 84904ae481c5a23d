//! Cache-store layer for Vitrine.
//!
//! Implements the lookup traits the core pipeline depends on:
//! - [`TenantCatalog`] — in-memory tenant/domain directories, rebuilt
//!   wholesale from the domain snapshot file
//! - [`MemoryRedirectStore`] — the legacy-redirect lookup, moka-backed
//! - [`FileCache`] — reads and rewrites the persisted cache files
//!   (`domains.cache.json`, `redirections.cache`) through OpenDAL
//!
//! Stores are read-mostly: the only write path is a wholesale `rebuild`
//! performed by the warmer binary or the admin cache-rebuild action.

mod error;
mod file;
mod memory;

pub use error::StoreError;
pub use file::{CacheSnapshot, FileCache, RedirectEntry};
pub use memory::{MemoryRedirectStore, TenantCatalog};
