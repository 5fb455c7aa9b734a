//! Payload encryption using ChaCha20-Poly1305.
//!
//! Provides authenticated encryption with a detached tag so the text form can
//! carry ciphertext, nonce and tag as three separate base64 fields.

use chacha20poly1305::{
    aead::{AeadInPlace, KeyInit},
    ChaCha20Poly1305, Nonce, Tag,
};
use rand::RngCore;

use crate::encoding;
use crate::error::{CryptoError, CryptoResult};
use crate::key::DerivedKey;

/// Size of nonce in bytes (96 bits for ChaCha20-Poly1305).
pub const NONCE_SIZE: usize = 12;

/// Size of authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// Supplies nonces for encryption.
pub trait NonceSource: Send + Sync {
    fn next_nonce(&self) -> [u8; NONCE_SIZE];
}

/// Random nonces from the operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsNonce;

impl NonceSource for OsNonce {
    fn next_nonce(&self) -> [u8; NONCE_SIZE] {
        let mut nonce = [0u8; NONCE_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut nonce);
        nonce
    }
}

/// Always returns the same nonce.
///
/// Only for reproducible fixtures: reusing a nonce under one key leaks the
/// XOR of the plaintexts.
#[derive(Debug, Clone, Copy)]
pub struct FixedNonce(pub [u8; NONCE_SIZE]);

impl NonceSource for FixedNonce {
    fn next_nonce(&self) -> [u8; NONCE_SIZE] {
        self.0
    }
}

/// Encrypted data with everything needed for decryption except the key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptedData {
    /// The encrypted payload, without the tag.
    pub ciphertext: Vec<u8>,
    /// The nonce used for encryption.
    pub nonce: [u8; NONCE_SIZE],
    /// The Poly1305 authentication tag.
    pub tag: [u8; TAG_SIZE],
}

impl EncryptedData {
    /// Encodes as `base64(ciphertext).base64(nonce).base64(tag)`.
    pub fn to_text(&self) -> String {
        format!(
            "{}.{}.{}",
            encoding::encode(&self.ciphertext),
            encoding::encode(self.nonce),
            encoding::encode(self.tag)
        )
    }

    /// Parses the dotted text form.
    pub fn from_text(text: &str) -> CryptoResult<Self> {
        let mut parts = text.split('.');
        let (Some(ct), Some(nonce), Some(tag), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(CryptoError::Decryption(
                "expected ciphertext.nonce.tag".to_string(),
            ));
        };

        let ciphertext = encoding::decode(ct)?;
        let nonce: [u8; NONCE_SIZE] = encoding::decode(nonce)?
            .try_into()
            .map_err(|_| CryptoError::Decryption("invalid nonce length".to_string()))?;
        let tag: [u8; TAG_SIZE] = encoding::decode(tag)?
            .try_into()
            .map_err(|_| CryptoError::Decryption("invalid tag length".to_string()))?;

        Ok(Self {
            ciphertext,
            nonce,
            tag,
        })
    }
}

/// Encrypts plaintext using ChaCha20-Poly1305 with the given nonce.
pub fn encrypt(
    key: &DerivedKey,
    nonce: [u8; NONCE_SIZE],
    plaintext: &[u8],
) -> CryptoResult<EncryptedData> {
    let cipher = ChaCha20Poly1305::new(key.as_bytes().into());

    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(&nonce), b"", &mut buffer)
        .map_err(|e| CryptoError::Encryption(e.to_string()))?;

    let mut tag_bytes = [0u8; TAG_SIZE];
    tag_bytes.copy_from_slice(&tag);

    Ok(EncryptedData {
        ciphertext: buffer,
        nonce,
        tag: tag_bytes,
    })
}

/// Decrypts ciphertext using ChaCha20-Poly1305.
///
/// Fails if the key is wrong or any of ciphertext, nonce or tag was altered.
pub fn decrypt(key: &DerivedKey, encrypted: &EncryptedData) -> CryptoResult<Vec<u8>> {
    let cipher = ChaCha20Poly1305::new(key.as_bytes().into());

    let mut buffer = encrypted.ciphertext.clone();
    cipher
        .decrypt_in_place_detached(
            Nonce::from_slice(&encrypted.nonce),
            b"",
            &mut buffer,
            Tag::from_slice(&encrypted.tag),
        )
        .map_err(|_| {
            CryptoError::Decryption("decryption failed (wrong key or tampered data)".to_string())
        })?;

    Ok(buffer)
}

/// Decrypts the dotted text form.
pub fn decrypt_text(key: &DerivedKey, text: &str) -> CryptoResult<Vec<u8>> {
    let encrypted = EncryptedData::from_text(text)?;
    decrypt(key, &encrypted)
}
