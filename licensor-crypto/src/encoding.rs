//! Strict base64.
//!
//! Standard alphabet with required padding. Decoding rejects whitespace,
//! line breaks, non-canonical padding and trailing bits.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::{CryptoError, CryptoResult};

/// Encodes bytes as strict base64.
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    STANDARD.encode(bytes)
}

/// Decodes strict base64.
pub fn decode(text: &str) -> CryptoResult<Vec<u8>> {
    STANDARD
        .decode(text)
        .map_err(|e| CryptoError::Encoding(e.to_string()))
}
