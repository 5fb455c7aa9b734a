//! Error types for machine file issuance.

use licensor_crypto::CryptoError;
use thiserror::Error;

use crate::render::RenderError;

/// Result type for checkout operations.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

/// Errors that abort a checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The request named no machine.
    #[error("machine must be present")]
    InvalidMachine,

    /// The machine has no license.
    #[error("license must be present")]
    InvalidLicense,

    /// One or more requested includes are not allowed.
    #[error("invalid includes: {}", rejected.join(", "))]
    InvalidInclude { rejected: Vec<String> },

    /// The TTL is outside the configured bounds or cannot be applied.
    #[error("invalid ttl: {0}")]
    InvalidTtl(String),

    /// Encoding, encryption or signing failed.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// The payload renderer failed.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CheckoutError {
    /// Returns true for errors caused by the shape of the request rather
    /// than by key material or a collaborator.
    #[must_use]
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidMachine
                | Self::InvalidLicense
                | Self::InvalidInclude { .. }
                | Self::InvalidTtl(_)
        )
    }
}
