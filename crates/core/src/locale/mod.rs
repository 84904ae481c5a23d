//! Locale negotiation.
//!
//! Two named strategies resolve the active locale for a request:
//! [`FrontStrategy`] (route, then fresh browser negotiation, then session,
//! then tenant default) and [`AdminStrategy`] (route, then session, then
//! operator profile, then tenant default — never browser headers). The
//! negotiated locale also yields a per-request IANA timezone.

mod accept;
mod strategy;
mod timezone;

pub use accept::{parse_accept_language, LanguageRange};
pub use strategy::{AdminStrategy, FrontStrategy, LocaleRequest, LocaleStrategy, Negotiation};
pub use timezone::timezone_for;
