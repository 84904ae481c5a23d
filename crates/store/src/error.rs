//! Store errors.

use thiserror::Error;

/// Errors from the cache-store layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backing storage failure.
    #[error("storage backend error: {0}")]
    Backend(#[from] opendal::Error),

    /// A cache file did not parse.
    #[error("malformed cache file {file}: {source}")]
    Format {
        /// Offending file name.
        file: String,
        /// Parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// A cache file could not be serialized.
    #[error("failed to encode cache file {file}: {source}")]
    Encode {
        /// Offending file name.
        file: String,
        /// Encode failure.
        #[source]
        source: serde_json::Error,
    },
}
