//! Localized content and view-model assembly.
//!
//! Every translatable entity owns at most one [`Intl`] record per locale.
//! The assembler projects an entity + locale into an immutable
//! [`ContentView`], cached per request by the [`ViewContext`]. Projections
//! never borrow another locale's text: a missing Intl yields empty fields.

mod context;
mod intl;
mod link;
mod page;
mod phone;
mod projection;

pub use context::ViewContext;
pub use intl::{ContentKind, Intl, IntlSet, Localized, MediaRef};
pub use link::{resolve_link, LinkTarget};
pub use page::Page;
pub use projection::{project, ContentView};
