//! Include filtering.
//!
//! Callers may ask for related records to be embedded in the machine file.
//! Only a closed set of relations exists; the configured allow-list narrows
//! it further. A request naming anything outside the allow-list is rejected
//! as a whole, no matter how many valid includes it also names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CheckoutError, CheckoutResult};

/// A relation that can be embedded in a machine file payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Include {
    #[serde(rename = "license.entitlements")]
    LicenseEntitlements,
    #[serde(rename = "license.product")]
    LicenseProduct,
    #[serde(rename = "license.policy")]
    LicensePolicy,
    #[serde(rename = "license.owner")]
    LicenseOwner,
    #[serde(rename = "license.users")]
    LicenseUsers,
    #[serde(rename = "license")]
    License,
    #[serde(rename = "components")]
    Components,
    #[serde(rename = "environment")]
    Environment,
    #[serde(rename = "group")]
    Group,
    #[serde(rename = "owner")]
    Owner,
}

impl Include {
    /// Every include, in allow-list order.
    pub const ALL: [Include; 10] = [
        Self::LicenseEntitlements,
        Self::LicenseProduct,
        Self::LicensePolicy,
        Self::LicenseOwner,
        Self::LicenseUsers,
        Self::License,
        Self::Components,
        Self::Environment,
        Self::Group,
        Self::Owner,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LicenseEntitlements => "license.entitlements",
            Self::LicenseProduct => "license.product",
            Self::LicensePolicy => "license.policy",
            Self::LicenseOwner => "license.owner",
            Self::LicenseUsers => "license.users",
            Self::License => "license",
            Self::Components => "components",
            Self::Environment => "environment",
            Self::Group => "group",
            Self::Owner => "owner",
        }
    }
}

impl fmt::Display for Include {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Include {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|i| i.as_str() == s).ok_or(())
    }
}

/// The includes a checkout will embed: the intersection of what was
/// requested and what is allowed, in request order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncludeSet(Vec<Include>);

impl IncludeSet {
    /// Filters `requested` against `allowed`.
    ///
    /// Fails with [`CheckoutError::InvalidInclude`] listing every requested
    /// name that is unknown or not in `allowed`.
    pub fn resolve<S: AsRef<str>>(requested: &[S], allowed: &[Include]) -> CheckoutResult<Self> {
        let rejected: Vec<String> = requested
            .iter()
            .map(|name| name.as_ref())
            .filter(|name| {
                name.parse::<Include>()
                    .map_or(true, |include| !allowed.contains(&include))
            })
            .map(str::to_string)
            .collect();

        if !rejected.is_empty() {
            return Err(CheckoutError::InvalidInclude { rejected });
        }

        let mut resolved: Vec<Include> = Vec::new();
        for include in requested.iter().filter_map(|name| name.as_ref().parse::<Include>().ok()) {
            if allowed.contains(&include) && !resolved.contains(&include) {
                resolved.push(include);
            }
        }

        Ok(Self(resolved))
    }

    #[must_use]
    pub fn contains(&self, include: Include) -> bool {
        self.0.contains(&include)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Include> + '_ {
        self.0.iter().copied()
    }

    /// The include names, in order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(|i| i.as_str().to_string()).collect()
    }
}
