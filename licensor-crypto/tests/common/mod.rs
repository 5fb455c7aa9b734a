//! Shared test helpers for crypto tests.

#![allow(dead_code)]

use licensor_crypto::AccountKeyring;
use rsa::RsaPrivateKey;
use std::sync::OnceLock;

/// Fixed Ed25519 seed so signatures are reproducible across runs.
pub const ED25519_SEED: [u8; 32] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26,
    27, 28, 29, 30, 31, 32,
];

/// A 1024-bit RSA key generated once per test binary.
pub fn rsa_key() -> RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| {
        RsaPrivateKey::new(&mut rand::rngs::OsRng, 1024).expect("rsa key generation")
    })
    .clone()
}

/// Keyring holding both an Ed25519 and an RSA key.
pub fn full_keyring() -> AccountKeyring {
    AccountKeyring::new()
        .with_ed25519_seed(&ED25519_SEED)
        .with_rsa_key(rsa_key())
}

/// Keyring holding only the Ed25519 key.
pub fn ed25519_keyring() -> AccountKeyring {
    AccountKeyring::new().with_ed25519_seed(&ED25519_SEED)
}
