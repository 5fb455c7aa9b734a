//! Cryptographic capabilities for machine file issuance.
//!
//! The checkout pipeline never touches a primitive directly. It is handed
//! two capabilities:
//! - [`Encryptor`]: symmetric encryption of the rendered payload under a key
//!   derived from the license secret and the machine fingerprint
//! - [`Signer`]: a detached signature over the (encrypted or encoded) payload,
//!   bound to a context prefix
//!
//! plus the strict base64 [`encoding`] used for every text-safe value.
//!
//! # Formats
//!
//! - Encoding: standard base64 alphabet, padding required, no line breaks.
//!   Malformed input is rejected, never truncated.
//! - Ciphertext: `base64(ciphertext).base64(nonce).base64(tag)` using
//!   ChaCha20-Poly1305 under `SHA-256(license key || fingerprint)`.
//! - Signatures: base64 over `"<prefix>/<message>"`.

mod algorithm;
mod cipher;
pub mod encoding;
mod encryptor;
mod error;
mod key;
mod signing;

pub use algorithm::{
    AlgorithmChoice, CertificateAlgorithm, EncryptionAlgorithm, SigningAlgorithm,
    DEFAULT_SIGNING_ALGORITHM,
};
pub use cipher::{
    decrypt, decrypt_text, encrypt, EncryptedData, FixedNonce, NonceSource, OsNonce, NONCE_SIZE,
    TAG_SIZE,
};
pub use encryptor::{ChaChaEncryptor, Encryptor};
pub use error::{CryptoError, CryptoResult};
pub use key::{DerivedKey, KeyMaterial, KEY_SIZE};
pub use signing::{context_message, AccountKeyring, Signed, Signer};
