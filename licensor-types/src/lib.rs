//! Core type definitions for Licensor.
//!
//! This crate defines the records the checkout pipeline reads:
//! - Typed identifiers for every record (UUID v7)
//! - The license/machine graph (accounts, environments, products, policies,
//!   users, entitlements, components, groups)
//! - [`LicenseScheme`], the cryptographic scheme a license is configured with
//! - [`Ttl`], a calendar-aware duration used for certificate expiry
//!
//! Persistence of these records lives outside this workspace; everything here
//! is plain data with serde support.

mod ids;
mod license;
mod machine;
mod scheme;
mod ttl;

pub use ids::{
    AccountId, ComponentId, EntitlementId, EnvironmentId, GroupId, LicenseId, MachineId,
    PolicyId, ProductId, UserId,
};
pub use license::{Entitlement, License, Policy, Product, User};
pub use machine::{Component, Environment, Group, Machine};
pub use scheme::LicenseScheme;
pub use ttl::{
    Ttl, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE, SECONDS_PER_MONTH,
    SECONDS_PER_WEEK, SECONDS_PER_YEAR,
};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("ttl out of range: {0}")]
    TtlOutOfRange(String),
}
