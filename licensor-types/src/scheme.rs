//! License cryptographic schemes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The cryptographic scheme a license is configured with.
///
/// Serialized as the scheme's identifier string (e.g. `ED25519_SIGN`).
/// Identifiers this crate does not know are kept verbatim in
/// [`LicenseScheme::Other`] rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LicenseScheme {
    RsaPkcs1PssSignV2,
    RsaPkcs1PssSign,
    RsaPkcs1SignV2,
    RsaPkcs1Sign,
    RsaPkcs1Encrypt,
    RsaJwtRs256,
    Ed25519Sign,
    /// An identifier with no known meaning.
    Other(String),
}

impl LicenseScheme {
    /// Returns the scheme identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::RsaPkcs1PssSignV2 => "RSA_2048_PKCS1_PSS_SIGN_V2",
            Self::RsaPkcs1PssSign => "RSA_2048_PKCS1_PSS_SIGN",
            Self::RsaPkcs1SignV2 => "RSA_2048_PKCS1_SIGN_V2",
            Self::RsaPkcs1Sign => "RSA_2048_PKCS1_SIGN",
            Self::RsaPkcs1Encrypt => "RSA_2048_PKCS1_ENCRYPT",
            Self::RsaJwtRs256 => "RSA_2048_JWT_RS256",
            Self::Ed25519Sign => "ED25519_SIGN",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for LicenseScheme {
    fn from(s: String) -> Self {
        match s.as_str() {
            "RSA_2048_PKCS1_PSS_SIGN_V2" => Self::RsaPkcs1PssSignV2,
            "RSA_2048_PKCS1_PSS_SIGN" => Self::RsaPkcs1PssSign,
            "RSA_2048_PKCS1_SIGN_V2" => Self::RsaPkcs1SignV2,
            "RSA_2048_PKCS1_SIGN" => Self::RsaPkcs1Sign,
            "RSA_2048_PKCS1_ENCRYPT" => Self::RsaPkcs1Encrypt,
            "RSA_2048_JWT_RS256" => Self::RsaJwtRs256,
            "ED25519_SIGN" => Self::Ed25519Sign,
            _ => Self::Other(s),
        }
    }
}

impl From<LicenseScheme> for String {
    fn from(scheme: LicenseScheme) -> Self {
        match scheme {
            LicenseScheme::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for LicenseScheme {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl fmt::Display for LicenseScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
