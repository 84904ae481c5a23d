//! Redirect decision engine.
//!
//! Decides, per request, whether to answer with a domain-canonicalization
//! redirect, a legacy-URL redirect, or nothing — and independently whether
//! the requesting IP is banned. The ban signal is separate from the URL
//! redirect and callers must check it first.

mod engine;
mod types;

pub use engine::RedirectEngine;
pub use types::{
    Decision, Redirect, RedirectKind, RedirectKey, RedirectLookup, RequestFacts, RequestMethod,
};
