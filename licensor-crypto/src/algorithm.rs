//! Algorithm identifiers.
//!
//! A machine file names the algorithms it was produced with as
//! `<encryption>+<signing>`, e.g. `base64+ed25519` for a plain signed file
//! or `chacha20-poly1305+rsa-pss-sha256` for an encrypted one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CryptoError;

/// Signature algorithms a keyring can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SigningAlgorithm {
    /// RSASSA-PSS, SHA-256, MGF1-SHA-256, maximum salt length.
    #[serde(rename = "rsa-pss-sha256")]
    RsaPssSha256,
    /// RSASSA-PKCS1-v1_5 with SHA-256.
    #[serde(rename = "rsa-sha256")]
    RsaSha256,
    /// Ed25519 (RFC 8032).
    #[serde(rename = "ed25519")]
    Ed25519,
}

/// The algorithm a signer uses when the caller does not pick one.
///
/// Verifiers rely on this value.
pub const DEFAULT_SIGNING_ALGORITHM: SigningAlgorithm = SigningAlgorithm::Ed25519;

impl SigningAlgorithm {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RsaPssSha256 => "rsa-pss-sha256",
            Self::RsaSha256 => "rsa-sha256",
            Self::Ed25519 => "ed25519",
        }
    }
}

impl fmt::Display for SigningAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SigningAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rsa-pss-sha256" => Ok(Self::RsaPssSha256),
            "rsa-sha256" => Ok(Self::RsaSha256),
            "ed25519" => Ok(Self::Ed25519),
            other => Err(CryptoError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// A signing algorithm as requested, before the signer has resolved it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlgorithmChoice {
    /// Sign with exactly this algorithm.
    Explicit(SigningAlgorithm),
    /// No algorithm was named; the signer applies its own default.
    #[default]
    SignerDefault,
}

impl AlgorithmChoice {
    /// Returns the concrete algorithm, substituting `default` for the sentinel.
    #[must_use]
    pub const fn resolve(self, default: SigningAlgorithm) -> SigningAlgorithm {
        match self {
            Self::Explicit(alg) => alg,
            Self::SignerDefault => default,
        }
    }
}

impl From<SigningAlgorithm> for AlgorithmChoice {
    fn from(alg: SigningAlgorithm) -> Self {
        Self::Explicit(alg)
    }
}

/// How the payload is concealed before signing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncryptionAlgorithm {
    /// Strict base64 only; the payload is readable by anyone.
    #[serde(rename = "base64")]
    Base64,
    /// ChaCha20-Poly1305 under the license/fingerprint derived key.
    #[serde(rename = "chacha20-poly1305")]
    ChaCha20Poly1305,
}

impl EncryptionAlgorithm {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Base64 => "base64",
            Self::ChaCha20Poly1305 => "chacha20-poly1305",
        }
    }
}

impl fmt::Display for EncryptionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncryptionAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "base64" => Ok(Self::Base64),
            "chacha20-poly1305" => Ok(Self::ChaCha20Poly1305),
            other => Err(CryptoError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// The combined `<encryption>+<signing>` identifier recorded on a machine file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CertificateAlgorithm {
    pub encryption: EncryptionAlgorithm,
    pub signing: SigningAlgorithm,
}

impl CertificateAlgorithm {
    #[must_use]
    pub const fn new(encryption: EncryptionAlgorithm, signing: SigningAlgorithm) -> Self {
        Self { encryption, signing }
    }
}

impl fmt::Display for CertificateAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.encryption, self.signing)
    }
}

impl FromStr for CertificateAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (enc, sig) = s
            .split_once('+')
            .ok_or_else(|| CryptoError::UnsupportedAlgorithm(s.to_string()))?;
        Ok(Self::new(enc.parse()?, sig.parse()?))
    }
}

impl TryFrom<String> for CertificateAlgorithm {
    type Error = CryptoError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CertificateAlgorithm> for String {
    fn from(alg: CertificateAlgorithm) -> Self {
        alg.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signing_names_roundtrip() {
        for alg in [
            SigningAlgorithm::RsaPssSha256,
            SigningAlgorithm::RsaSha256,
            SigningAlgorithm::Ed25519,
        ] {
            assert_eq!(alg.as_str().parse::<SigningAlgorithm>().unwrap(), alg);
        }
    }

    #[test]
    fn unknown_signing_name() {
        let err = "rsa-md5".parse::<SigningAlgorithm>().unwrap_err();
        assert!(matches!(err, CryptoError::UnsupportedAlgorithm(ref s) if s == "rsa-md5"));
    }

    #[test]
    fn sentinel_resolves_to_default() {
        assert_eq!(
            AlgorithmChoice::SignerDefault.resolve(DEFAULT_SIGNING_ALGORITHM),
            SigningAlgorithm::Ed25519
        );
        assert_eq!(
            AlgorithmChoice::Explicit(SigningAlgorithm::RsaSha256)
                .resolve(DEFAULT_SIGNING_ALGORITHM),
            SigningAlgorithm::RsaSha256
        );
    }

    #[test]
    fn combined_identifier() {
        let alg = CertificateAlgorithm::new(
            EncryptionAlgorithm::ChaCha20Poly1305,
            SigningAlgorithm::RsaPssSha256,
        );
        assert_eq!(alg.to_string(), "chacha20-poly1305+rsa-pss-sha256");
        let parsed: CertificateAlgorithm = "chacha20-poly1305+rsa-pss-sha256".parse().unwrap();
        assert_eq!(parsed, alg);
        assert!("ed25519".parse::<CertificateAlgorithm>().is_err());
    }

    #[test]
    fn combined_identifier_serde() {
        let alg = CertificateAlgorithm::new(EncryptionAlgorithm::Base64, SigningAlgorithm::Ed25519);
        assert_eq!(serde_json::to_string(&alg).unwrap(), r#""base64+ed25519""#);
    }
}
