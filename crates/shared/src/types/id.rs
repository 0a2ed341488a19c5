//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `CreditorId` where a
//! `CustomerId` is expected.

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

typed_id!(OwnerId, "Unique identifier for the owning user (tenant).");
typed_id!(EntryId, "Unique identifier for a cash or bank ledger entry.");
typed_id!(ProductId, "Unique identifier for a product.");
typed_id!(CreditorId, "Unique identifier for a creditor.");
typed_id!(CustomerId, "Unique identifier for a customer.");
typed_id!(PurchaseId, "Unique identifier for a purchase.");
typed_id!(SaleId, "Unique identifier for a sale.");
typed_id!(PurchaseReturnId, "Unique identifier for a purchase return.");
typed_id!(SalesReturnId, "Unique identifier for a sales return.");
typed_id!(AssetId, "Unique identifier for an asset.");
typed_id!(LiabilityId, "Unique identifier for a liability.");
typed_id!(ExpenseId, "Unique identifier for an expense.");
typed_id!(CategoryId, "Unique identifier for an expense category.");
typed_id!(DrawingId, "Unique identifier for an owner drawing.");
