//! Core business logic for Vitrine.
//!
//! This crate contains pure business logic with ZERO web or store dependencies.
//! All domain types, negotiation rules, and projections live here.
//!
//! # Modules
//!
//! - `tenant` - Website, Configuration, Domain, and SecurityPolicy records
//! - `host` - Host/domain to tenant resolution
//! - `locale` - Locale negotiation strategies and the timezone heuristic
//! - `redirect` - Redirect decision engine
//! - `content` - Intl records, link resolution, and view-model assembly
//! - `layout` - Layout/Zone/Col/Block page-composition tree
//! - `wallet` - Wallet classification hierarchy and balances
//! - `security` - XSS screening and security header assembly
//! - `ordering` - Position-ordered sibling helpers

pub mod content;
pub mod host;
pub mod layout;
pub mod locale;
pub mod ordering;
pub mod redirect;
pub mod security;
pub mod tenant;
pub mod wallet;
