//! Checkout configuration.
//!
//! Bound once when a [`MachineCheckout`](crate::MachineCheckout) is built and
//! read-only afterwards. Deserializable so a deployment can narrow the
//! include allow-list or adjust TTL bounds from a config file.

use licensor_types::{Ttl, SECONDS_PER_HOUR, SECONDS_PER_YEAR};
use serde::{Deserialize, Serialize};

use crate::error::{CheckoutError, CheckoutResult};
use crate::include::Include;

/// Inclusive bounds on a machine file TTL, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TtlBounds {
    /// Shortest allowed TTL, or `None` for no lower bound.
    pub min_secs: Option<u64>,
    /// Longest allowed TTL, or `None` for no upper bound.
    pub max_secs: Option<u64>,
}

impl Default for TtlBounds {
    fn default() -> Self {
        Self {
            min_secs: Some(SECONDS_PER_HOUR),
            max_secs: Some(SECONDS_PER_YEAR),
        }
    }
}

impl TtlBounds {
    /// No bounds at all.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            min_secs: None,
            max_secs: None,
        }
    }

    /// Checks a non-empty TTL against the bounds.
    pub fn check(&self, ttl: &Ttl) -> CheckoutResult<()> {
        let secs = ttl.as_secs();
        if let Some(min) = self.min_secs {
            if secs < min {
                return Err(CheckoutError::InvalidTtl(format!(
                    "must be greater than or equal to {min} seconds"
                )));
            }
        }
        if let Some(max) = self.max_secs {
            if secs > max {
                return Err(CheckoutError::InvalidTtl(format!(
                    "must be less than or equal to {max} seconds"
                )));
            }
        }
        Ok(())
    }
}

/// Configuration for machine file issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    /// Includes a caller may request. Defaults to every include.
    pub allowed_includes: Vec<Include>,
    /// Bounds on the requested TTL.
    pub ttl: TtlBounds,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            allowed_includes: Include::ALL.to_vec(),
            ttl: TtlBounds::default(),
        }
    }
}
