//! Wallet classification hierarchy.
//!
//! CategoryType → Category → SubCategory form a three-level,
//! position-ordered classification tree; Wallets hold Operations that
//! reference subcategories. Deletion cascades down the tree and reflows
//! sibling positions to stay contiguous from 1.

mod service;
mod types;

pub use service::WalletService;
pub use types::{Category, CategoryType, Operation, SubCategory, Wallet};
