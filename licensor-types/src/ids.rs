//! Identifier types for the license/machine graph.
//!
//! Uses UUID v7 for time-ordered, globally unique identifiers. Each record
//! kind gets its own newtype so a license id can never be passed where a
//! machine id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new identifier with the current timestamp.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an identifier from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> Uuid {
                self.0
            }

            /// Parses an identifier from a string.
            pub fn parse(s: &str) -> crate::Result<Self> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = crate::Error;

            fn from_str(s: &str) -> crate::Result<Self> {
                Self::parse(s)
            }
        }
    };
}

record_id!(
    /// Identifier of the account that owns licenses and signing keys.
    AccountId
);
record_id!(
    /// Identifier of an isolated environment within an account.
    EnvironmentId
);
record_id!(
    /// Identifier of a license.
    LicenseId
);
record_id!(
    /// Identifier of a machine (a checked-out endpoint).
    MachineId
);
record_id!(ProductId);
record_id!(PolicyId);
record_id!(UserId);
record_id!(EntitlementId);
record_id!(ComponentId);
record_id!(GroupId);
