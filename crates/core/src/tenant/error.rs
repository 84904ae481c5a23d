//! Tenant validation errors.

use thiserror::Error;
use vitrine_shared::types::DomainId;
use vitrine_shared::Locale;

/// Errors produced by tenant configuration validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TenantError {
    /// The default locale is not part of the configured locale set.
    #[error("default locale {0} is not in the configured locale set")]
    DefaultLocaleNotSupported(Locale),

    /// An online locale is not part of the configured locale set.
    #[error("online locale {0} is not in the configured locale set")]
    OnlineLocaleNotSupported(Locale),

    /// More than one domain is flagged default for the same locale.
    #[error("more than one default domain for locale {0}")]
    DuplicateDefaultDomain(Locale),

    /// Two domain records share the same hostname.
    #[error("duplicate domain name {0:?}")]
    DuplicateDomainName(String),

    /// Referenced domain does not belong to this configuration.
    #[error("unknown domain {0}")]
    UnknownDomain(DomainId),
}
