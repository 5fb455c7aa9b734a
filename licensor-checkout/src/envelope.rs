//! Envelope assembly and armoring.

use licensor_crypto::encoding;
use serde::{Deserialize, Serialize};

use crate::error::CheckoutResult;

pub const MACHINE_FILE_BEGIN: &str = "-----BEGIN MACHINE FILE-----";
pub const MACHINE_FILE_END: &str = "-----END MACHINE FILE-----";

/// The signed document inside the armor.
///
/// Serialized with keys in declaration order: `enc`, `sig`, `alg`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Ciphertext, or the strictly encoded payload.
    pub enc: String,
    /// Signature over `enc`.
    pub sig: String,
    /// The `<encryption>+<signing>` algorithm identifier.
    pub alg: String,
}

impl Envelope {
    /// Serializes to JSON and applies strict base64.
    pub fn encode(&self) -> CheckoutResult<String> {
        let json = serde_json::to_vec(self)?;
        Ok(encoding::encode(json))
    }

    /// Encodes and wraps the envelope in machine file armor.
    pub fn armor(&self) -> CheckoutResult<String> {
        Ok(armor(&self.encode()?))
    }
}

/// Wraps an encoded block between the machine file markers.
#[must_use]
pub fn armor(encoded: &str) -> String {
    format!("{MACHINE_FILE_BEGIN}\n{encoded}\n{MACHINE_FILE_END}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Envelope {
        Envelope {
            enc: "AAA".into(),
            sig: "BBB".into(),
            alg: "ed25519".into(),
        }
    }

    #[test]
    fn serializes_in_field_order() {
        let json = serde_json::to_string(&fixture()).unwrap();
        assert_eq!(json, r#"{"enc":"AAA","sig":"BBB","alg":"ed25519"}"#);
    }

    #[test]
    fn armored_fixture_is_exact() {
        let cert = fixture().armor().unwrap();
        assert_eq!(
            cert,
            "-----BEGIN MACHINE FILE-----\n\
             eyJlbmMiOiJBQUEiLCJzaWciOiJCQkIiLCJhbGciOiJlZDI1NTE5In0=\n\
             -----END MACHINE FILE-----\n"
        );
    }

    #[test]
    fn armor_shape() {
        let cert = fixture().armor().unwrap();
        assert!(cert.starts_with("-----BEGIN MACHINE FILE-----\n"));
        assert!(cert.ends_with("-----END MACHINE FILE-----\n"));
        assert_eq!(cert.lines().count(), 3);
    }
}
