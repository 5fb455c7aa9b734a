//! License records and the records a license relates to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::{AccountId, EntitlementId, LicenseId, PolicyId, ProductId, UserId};
use crate::scheme::LicenseScheme;

/// A product licenses are issued for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
}

/// The policy a license was created under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub id: PolicyId,
    pub name: String,
    /// Whether the policy allows more than one machine per license.
    #[serde(default)]
    pub floating: bool,
}

/// A user that owns or is attached to a license or machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// A named feature flag granted by a license.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlement {
    pub id: EntitlementId,
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// A license and the relations the checkout pipeline may embed.
///
/// `key` is the license's secret key material. It is used to derive the
/// encryption key for machine files and is never rendered into a payload.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub id: LicenseId,
    pub account_id: AccountId,
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
    /// The configured cryptographic scheme, if any.
    #[serde(default)]
    pub scheme: Option<LicenseScheme>,
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
    #[serde(default)]
    pub product: Option<Product>,
    #[serde(default)]
    pub policy: Option<Policy>,
    #[serde(default)]
    pub owner: Option<User>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub entitlements: Vec<Entitlement>,
}

impl fmt::Debug for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("License")
            .field("id", &self.id)
            .field("account_id", &self.account_id)
            .field("key", &"[REDACTED]")
            .field("name", &self.name)
            .field("scheme", &self.scheme)
            .field("expiry", &self.expiry)
            .field("product", &self.product)
            .field("policy", &self.policy)
            .field("owner", &self.owner)
            .field("users", &self.users)
            .field("entitlements", &self.entitlements)
            .finish()
    }
}
