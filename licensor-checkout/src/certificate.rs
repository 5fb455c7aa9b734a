//! The machine file record.

use chrono::{DateTime, Utc};
use licensor_crypto::CertificateAlgorithm;
use licensor_types::{AccountId, EnvironmentId, LicenseId, MachineId};
use serde::{Deserialize, Serialize};

/// An issued machine file.
///
/// Immutable once built: there are no setters, and any change means issuing
/// a new file. Serializable so an external store can persist it in one write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineFile {
    environment_id: Option<EnvironmentId>,
    account_id: AccountId,
    license_id: LicenseId,
    machine_id: MachineId,
    certificate: String,
    issued_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    ttl: Option<u64>,
    includes: Vec<String>,
    algorithm: CertificateAlgorithm,
}

impl MachineFile {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        environment_id: Option<EnvironmentId>,
        account_id: AccountId,
        license_id: LicenseId,
        machine_id: MachineId,
        certificate: String,
        issued_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
        ttl: Option<u64>,
        includes: Vec<String>,
        algorithm: CertificateAlgorithm,
    ) -> Self {
        Self {
            environment_id,
            account_id,
            license_id,
            machine_id,
            certificate,
            issued_at,
            expires_at,
            ttl,
            includes,
            algorithm,
        }
    }

    #[must_use]
    pub fn environment_id(&self) -> Option<EnvironmentId> {
        self.environment_id
    }

    #[must_use]
    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    #[must_use]
    pub fn license_id(&self) -> LicenseId {
        self.license_id
    }

    #[must_use]
    pub fn machine_id(&self) -> MachineId {
        self.machine_id
    }

    /// The armored certificate text.
    #[must_use]
    pub fn certificate(&self) -> &str {
        &self.certificate
    }

    #[must_use]
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// When the file stops being valid, or `None` if it never expires.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// The requested TTL in seconds.
    #[must_use]
    pub fn ttl(&self) -> Option<u64> {
        self.ttl
    }

    /// The resolved include names.
    #[must_use]
    pub fn includes(&self) -> &[String] {
        &self.includes
    }

    #[must_use]
    pub fn algorithm(&self) -> CertificateAlgorithm {
        self.algorithm
    }
}
