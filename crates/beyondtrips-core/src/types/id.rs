//! Typed identifiers for every domain entity.
//!
//! Each entity gets its own UUID newtype so a `DriverId` cannot be handed
//! to a query expecting a `MagazineId`. The `sqlx` feature adds Postgres
//! `Type`/`Encode`/`Decode` impls that delegate to the inner [`Uuid`], so
//! the ids bind and decode exactly like `UUID` columns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_ids {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(pub Uuid);

            impl $name {
                /// Mint a fresh random (v4) identifier.
                pub fn new() -> Self {
                    Self(Uuid::new_v4())
                }

                /// Wrap an existing UUID.
                pub fn from_uuid(uuid: Uuid) -> Self {
                    Self(uuid)
                }

                /// Unwrap into the raw UUID.
                pub fn into_uuid(self) -> Uuid {
                    self.0
                }

                /// Borrow the raw UUID.
                pub fn as_uuid(&self) -> &Uuid {
                    &self.0
                }
            }

            // A default id is a freshly minted one, never the nil UUID.
            impl Default for $name {
                fn default() -> Self {
                    Self::new()
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Display::fmt(&self.0, f)
                }
            }

            impl FromStr for $name {
                type Err = uuid::Error;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    s.parse::<Uuid>().map(Self)
                }
            }

            impl From<Uuid> for $name {
                fn from(uuid: Uuid) -> Self {
                    Self(uuid)
                }
            }

            impl From<$name> for Uuid {
                fn from(id: $name) -> Uuid {
                    id.0
                }
            }

            #[cfg(feature = "sqlx")]
            impl sqlx::Type<sqlx::Postgres> for $name {
                fn type_info() -> sqlx::postgres::PgTypeInfo {
                    <Uuid as sqlx::Type<sqlx::Postgres>>::type_info()
                }
            }

            #[cfg(feature = "sqlx")]
            impl<'q> sqlx::Encode<'q, sqlx::Postgres> for $name {
                fn encode_by_ref(
                    &self,
                    buf: &mut sqlx::postgres::PgArgumentBuffer,
                ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                    <Uuid as sqlx::Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
                }
            }

            #[cfg(feature = "sqlx")]
            impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
                fn decode(
                    value: sqlx::postgres::PgValueRef<'r>,
                ) -> Result<Self, sqlx::error::BoxDynError> {
                    <Uuid as sqlx::Decode<'r, sqlx::Postgres>>::decode(value).map(Self)
                }
            }
        )+
    };
}

define_ids! {
    /// Identifies a driver account.
    DriverId,
    /// Identifies an admin operator (token subject only; admins have no
    /// row in this service).
    AdminId,
    /// Identifies a magazine edition.
    MagazineId,
    /// Identifies a magazine pickup.
    PickupId,
    /// Identifies a rider rating.
    RatingId,
    /// Identifies a BTL coin award.
    AwardId,
    /// Identifies an earnings ledger entry.
    EarningId,
    /// Identifies a barcode scan event.
    ScanId,
    /// Identifies a driver notification.
    NotificationId,
    /// Identifies an audit event.
    AuditLogId,
    /// Identifies a queued background job.
    JobId,
}
