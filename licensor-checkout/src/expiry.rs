//! Expiry calculation.

use chrono::{DateTime, Utc};
use licensor_types::Ttl;

use crate::error::{CheckoutError, CheckoutResult};

/// Derives the expiry of a machine file issued at `issued_at`.
///
/// Pure in its inputs: no clock is read here. An absent or empty TTL means
/// the file never expires.
pub fn expires_at(
    issued_at: DateTime<Utc>,
    ttl: Option<&Ttl>,
) -> CheckoutResult<Option<DateTime<Utc>>> {
    match ttl {
        Some(ttl) if !ttl.is_empty() => ttl
            .add_to(issued_at)
            .map(Some)
            .map_err(|e| CheckoutError::InvalidTtl(e.to_string())),
        _ => Ok(None),
    }
}
