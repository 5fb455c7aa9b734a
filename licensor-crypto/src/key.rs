//! Key material and key derivation.
//!
//! A machine file is encrypted under key material that both the issuer and
//! the licensee can reproduce: the license key followed by the machine
//! fingerprint. There is no salt. The same license and machine always yield
//! the same key, which is what lets an offline verifier decrypt the file.

use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of encryption keys in bytes (256 bits for ChaCha20).
pub const KEY_SIZE: usize = 32;

/// The raw secret a machine file key is derived from.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    bytes: Vec<u8>,
}

impl KeyMaterial {
    /// Concatenates the license secret and the machine fingerprint, in that order.
    #[must_use]
    pub fn derive(license_key: &str, fingerprint: &str) -> Self {
        let mut bytes = Vec::with_capacity(license_key.len() + fingerprint.len());
        bytes.extend_from_slice(license_key.as_bytes());
        bytes.extend_from_slice(fingerprint.as_bytes());
        Self { bytes }
    }

    /// Returns the raw material.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Hashes the material down to a cipher key: `SHA-256(material)`.
    #[must_use]
    pub fn cipher_key(&self) -> DerivedKey {
        let digest = Sha256::digest(&self.bytes);
        let mut bytes = [0u8; KEY_SIZE];
        bytes.copy_from_slice(&digest);
        DerivedKey::from_bytes(bytes)
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// A derived encryption key with automatic zeroization on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// Creates a derived key from raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Returns the key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
