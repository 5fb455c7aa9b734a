//! Abstract encryption interface used by the checkout pipeline.
//!
//! The pipeline depends on `Arc<dyn Encryptor>` and hands it key material;
//! it never picks a cipher or a nonce itself. Tests swap in an encryptor with
//! a [`FixedNonce`](crate::FixedNonce) to get byte-identical output.

use crate::algorithm::EncryptionAlgorithm;
use crate::cipher::{self, NonceSource, OsNonce};
use crate::error::CryptoResult;
use crate::key::KeyMaterial;

/// Trait for encrypting a payload into a text-safe string.
pub trait Encryptor: Send + Sync {
    /// The algorithm recorded on the machine file when this encryptor is used.
    fn algorithm(&self) -> EncryptionAlgorithm;

    /// Encrypts `plaintext` under a key derived from `material`.
    fn encrypt(&self, plaintext: &[u8], material: &KeyMaterial) -> CryptoResult<String>;
}

/// ChaCha20-Poly1305 under `SHA-256(material)`, nonce embedded in the output.
pub struct ChaChaEncryptor {
    nonces: Box<dyn NonceSource>,
}

impl ChaChaEncryptor {
    /// Creates an encryptor with random nonces.
    #[must_use]
    pub fn new() -> Self {
        Self::with_nonce_source(OsNonce)
    }

    /// Creates an encryptor drawing nonces from `nonces`.
    #[must_use]
    pub fn with_nonce_source(nonces: impl NonceSource + 'static) -> Self {
        Self {
            nonces: Box::new(nonces),
        }
    }
}

impl Default for ChaChaEncryptor {
    fn default() -> Self {
        Self::new()
    }
}

impl Encryptor for ChaChaEncryptor {
    fn algorithm(&self) -> EncryptionAlgorithm {
        EncryptionAlgorithm::ChaCha20Poly1305
    }

    fn encrypt(&self, plaintext: &[u8], material: &KeyMaterial) -> CryptoResult<String> {
        let key = material.cipher_key();
        let encrypted = cipher::encrypt(&key, self.nonces.next_nonce(), plaintext)?;
        Ok(encrypted.to_text())
    }
}
