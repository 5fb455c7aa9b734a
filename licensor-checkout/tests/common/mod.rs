//! Shared fixtures for checkout tests.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use licensor_checkout::{
    Clock, Envelope, FixedClock, MachineCheckout, MACHINE_FILE_BEGIN, MACHINE_FILE_END,
};
use licensor_crypto::{
    encoding, AccountKeyring, AlgorithmChoice, CryptoResult, Signed, Signer, SigningAlgorithm,
};
use licensor_types::{
    AccountId, Component, ComponentId, Entitlement, EntitlementId, Environment, EnvironmentId,
    Group, GroupId, License, LicenseId, LicenseScheme, Machine, Policy, PolicyId, Product,
    ProductId, User, UserId,
};
use rsa::RsaPrivateKey;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

pub const LICENSE_KEY: &str = "C1B6DE-39A6E3-DE1529-8559A0-4AF593-V3";
pub const FINGERPRINT: &str = "4d:Eq:UV:D3:XZ:tL:WN:Bz:mA:Eg:E6:Mk:YX:dK:NC";

pub const ED25519_SEED: [u8; 32] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26,
    27, 28, 29, 30, 31, 32,
];

pub fn issued_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

pub fn rsa_key() -> RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| {
        RsaPrivateKey::new(&mut rand::rngs::OsRng, 1024).expect("rsa key generation")
    })
    .clone()
}

pub fn keyring() -> AccountKeyring {
    AccountKeyring::new()
        .with_ed25519_seed(&ED25519_SEED)
        .with_rsa_key(rsa_key())
}

pub fn user(email: &str) -> User {
    User {
        id: UserId::new(),
        email: email.into(),
        first_name: None,
        last_name: None,
    }
}

pub fn license(scheme: Option<LicenseScheme>) -> License {
    let owner = user("owner@example.com");
    License {
        id: LicenseId::new(),
        account_id: AccountId::new(),
        key: LICENSE_KEY.into(),
        name: Some("Pro".into()),
        scheme,
        expiry: None,
        product: Some(Product {
            id: ProductId::new(),
            name: "Desktop".into(),
        }),
        policy: Some(Policy {
            id: PolicyId::new(),
            name: "Node-locked".into(),
            floating: false,
        }),
        owner: Some(owner.clone()),
        users: vec![owner, user("second@example.com")],
        entitlements: vec![Entitlement {
            id: EntitlementId::new(),
            code: "FEATURE_A".into(),
            name: None,
        }],
    }
}

pub fn machine(scheme: Option<LicenseScheme>) -> Machine {
    let mut machine = Machine::new(FINGERPRINT).with_license(license(scheme));
    machine.name = Some("build-01".into());
    machine.components = vec![Component {
        id: ComponentId::new(),
        fingerprint: "cpu-0".into(),
        name: "CPU".into(),
    }];
    machine.group = Some(Group {
        id: GroupId::new(),
        name: "CI".into(),
    });
    machine
}

pub fn environment() -> Environment {
    Environment {
        id: EnvironmentId::new(),
        code: "production".into(),
        name: None,
    }
}

/// Service with real keys and a fixed clock.
pub fn service() -> MachineCheckout {
    MachineCheckout::new(Arc::new(keyring())).with_clock(Arc::new(FixedClock(issued_at())))
}

/// Counts how often the issuance instant is read.
#[derive(Default)]
pub struct CountingClock(pub AtomicUsize);

impl Clock for CountingClock {
    fn now(&self) -> DateTime<Utc> {
        self.0.fetch_add(1, Ordering::SeqCst);
        issued_at()
    }
}

/// Signer that needs no key material and always reports one algorithm.
pub struct FakeSigner {
    pub default: SigningAlgorithm,
}

impl Signer for FakeSigner {
    fn sign(&self, message: &[u8], choice: AlgorithmChoice, prefix: &str) -> CryptoResult<Signed> {
        let algorithm = choice.resolve(self.default);
        Ok(Signed {
            signature: encoding::encode(format!("{prefix}:{}", message.len())),
            algorithm,
        })
    }
}

/// Strips the armor and decodes the envelope.
pub fn open(certificate: &str) -> Envelope {
    let body = certificate
        .strip_prefix(&format!("{MACHINE_FILE_BEGIN}\n"))
        .and_then(|s| s.strip_suffix(&format!("\n{MACHINE_FILE_END}\n")))
        .expect("armored certificate");
    let json = encoding::decode(body).expect("base64 envelope");
    serde_json::from_slice(&json).expect("envelope json")
}

/// Decodes the payload of an unencrypted machine file.
pub fn payload(envelope: &Envelope) -> serde_json::Value {
    let json = encoding::decode(&envelope.enc).expect("base64 payload");
    serde_json::from_slice(&json).expect("payload json")
}
