//! Request screening and response header assembly.

mod headers;
mod xss;

use thiserror::Error;

pub use headers::{assemble_headers, build_csp, nonce, STRIPPED_HEADERS};
pub use xss::{screen_request, screen_value};

/// Security screening errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SecurityError {
    /// A request value matched an XSS heuristic.
    #[error("suspicious content in {field}")]
    XssDetected {
        /// Offending field name, or `uri`.
        field: String,
    },
}
