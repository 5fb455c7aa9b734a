//! Error types for the crypto layer.

use thiserror::Error;

use crate::algorithm::SigningAlgorithm;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in cryptographic operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Encryption failed.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Decryption failed (wrong key or tampered data).
    #[error("decryption failed: {0}")]
    Decryption(String),

    /// Input was not strict base64.
    #[error("invalid encoding: {0}")]
    Encoding(String),

    /// Key material could not be parsed.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// The algorithm name is not one this crate can produce.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The keyring holds no key for the requested algorithm.
    #[error("no keypair available for {0}")]
    MissingKeypair(SigningAlgorithm),

    /// The signing primitive failed.
    #[error("signing failed: {0}")]
    Signing(String),
}
