//! Account keyring and detached signatures.
//!
//! Every signature covers `"<prefix>/<message>"`. The prefix names the
//! certificate family (`machine` for machine files), so a signature issued
//! for one family does not verify as a different family signed by the same
//! account key.

use ed25519_dalek::{SigningKey as Ed25519SigningKey, VerifyingKey as Ed25519VerifyingKey};
use rand::rngs::OsRng;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::signature::{RandomizedSigner, SignatureEncoding, Signer as _};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};

use crate::algorithm::{AlgorithmChoice, SigningAlgorithm, DEFAULT_SIGNING_ALGORITHM};
use crate::encoding;
use crate::error::{CryptoError, CryptoResult};

/// A detached signature and the algorithm that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signed {
    /// Strict base64 of the raw signature bytes.
    pub signature: String,
    /// The concrete algorithm used. Never the "signer default" sentinel.
    pub algorithm: SigningAlgorithm,
}

/// Capability to sign a message for a certificate family.
pub trait Signer: Send + Sync {
    /// Signs `"<prefix>/<message>"` with the chosen algorithm.
    ///
    /// [`AlgorithmChoice::SignerDefault`] is resolved by the signer and the
    /// returned [`Signed::algorithm`] reports what was actually used.
    fn sign(&self, message: &[u8], choice: AlgorithmChoice, prefix: &str) -> CryptoResult<Signed>;
}

/// Builds the context-bound message that is actually signed.
#[must_use]
pub fn context_message(prefix: &str, message: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(prefix.len() + 1 + message.len());
    out.extend_from_slice(prefix.as_bytes());
    out.push(b'/');
    out.extend_from_slice(message);
    out
}

/// The signing keys belonging to an account.
///
/// An account may hold an Ed25519 key, an RSA key, or both. Requests for an
/// algorithm whose key is absent fail with [`CryptoError::MissingKeypair`].
#[derive(Clone, Default)]
pub struct AccountKeyring {
    ed25519: Option<Ed25519SigningKey>,
    rsa: Option<RsaPrivateKey>,
}

impl AccountKeyring {
    /// Creates an empty keyring.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an Ed25519 key from a raw 32-byte seed.
    #[must_use]
    pub fn with_ed25519_seed(mut self, seed: &[u8; 32]) -> Self {
        self.ed25519 = Some(Ed25519SigningKey::from_bytes(seed));
        self
    }

    /// Adds an Ed25519 key from a PKCS#8 PEM document.
    pub fn with_ed25519_pem(mut self, pem: &str) -> CryptoResult<Self> {
        let key = Ed25519SigningKey::from_pkcs8_pem(pem)
            .map_err(|e| CryptoError::InvalidKey(format!("ed25519 pkcs8: {e}")))?;
        self.ed25519 = Some(key);
        Ok(self)
    }

    /// Adds an RSA key.
    #[must_use]
    pub fn with_rsa_key(mut self, key: RsaPrivateKey) -> Self {
        self.rsa = Some(key);
        self
    }

    /// Adds an RSA key from a PKCS#8 or PKCS#1 PEM document.
    pub fn with_rsa_pem(self, pem: &str) -> CryptoResult<Self> {
        let key = RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
            .map_err(|e| CryptoError::InvalidKey(format!("rsa pem: {e}")))?;
        Ok(self.with_rsa_key(key))
    }

    /// Returns the Ed25519 public key, if the keyring holds one.
    #[must_use]
    pub fn ed25519_verifying_key(&self) -> Option<Ed25519VerifyingKey> {
        self.ed25519.as_ref().map(Ed25519SigningKey::verifying_key)
    }

    /// Returns the RSA public key, if the keyring holds one.
    #[must_use]
    pub fn rsa_public_key(&self) -> Option<RsaPublicKey> {
        self.rsa.as_ref().map(RsaPublicKey::from)
    }

    fn rsa(&self, algorithm: SigningAlgorithm) -> CryptoResult<&RsaPrivateKey> {
        self.rsa
            .as_ref()
            .ok_or(CryptoError::MissingKeypair(algorithm))
    }

    fn sign_raw(&self, algorithm: SigningAlgorithm, message: &[u8]) -> CryptoResult<Vec<u8>> {
        match algorithm {
            SigningAlgorithm::Ed25519 => {
                let key = self
                    .ed25519
                    .as_ref()
                    .ok_or(CryptoError::MissingKeypair(algorithm))?;
                Ok(ed25519_dalek::Signer::sign(key, message).to_bytes().to_vec())
            }
            SigningAlgorithm::RsaPssSha256 => {
                let key = self.rsa(algorithm)?;
                let salt_len = key
                    .size()
                    .checked_sub(Sha256::output_size() + 2)
                    .ok_or_else(|| CryptoError::InvalidKey("rsa modulus too small".into()))?;
                let signer =
                    rsa::pss::BlindedSigningKey::<Sha256>::new_with_salt_len(key.clone(), salt_len);
                let signature = signer
                    .try_sign_with_rng(&mut OsRng, message)
                    .map_err(|e| CryptoError::Signing(e.to_string()))?;
                Ok(signature.to_vec())
            }
            SigningAlgorithm::RsaSha256 => {
                let key = self.rsa(algorithm)?;
                let signer = rsa::pkcs1v15::SigningKey::<Sha256>::new(key.clone());
                let signature = signer
                    .try_sign(message)
                    .map_err(|e| CryptoError::Signing(e.to_string()))?;
                Ok(signature.to_vec())
            }
        }
    }
}

impl Signer for AccountKeyring {
    fn sign(&self, message: &[u8], choice: AlgorithmChoice, prefix: &str) -> CryptoResult<Signed> {
        let algorithm = choice.resolve(DEFAULT_SIGNING_ALGORITHM);
        let raw = self.sign_raw(algorithm, &context_message(prefix, message))?;

        Ok(Signed {
            signature: encoding::encode(raw),
            algorithm,
        })
    }
}

impl std::fmt::Debug for AccountKeyring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountKeyring")
            .field("ed25519", &self.ed25519.as_ref().map(|_| "[REDACTED]"))
            .field("rsa", &self.rsa.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
