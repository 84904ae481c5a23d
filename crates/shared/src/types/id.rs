//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `DomainId` where a
//! `WebsiteId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(WebsiteId, "Unique identifier for a website (tenant).");
typed_id!(DomainId, "Unique identifier for a domain record.");
typed_id!(PageId, "Unique identifier for a content page.");
typed_id!(LayoutId, "Unique identifier for a page layout.");
typed_id!(BlockId, "Unique identifier for a layout block.");
typed_id!(MediaId, "Unique identifier for a media reference.");
typed_id!(CategoryTypeId, "Unique identifier for a wallet category type.");
typed_id!(CategoryId, "Unique identifier for a wallet category.");
typed_id!(SubCategoryId, "Unique identifier for a wallet subcategory.");
typed_id!(WalletId, "Unique identifier for a wallet.");
typed_id!(OperationId, "Unique identifier for a wallet operation.");
