//! Checkout requests and the issuance pipeline.

use std::sync::Arc;

use licensor_crypto::{
    encoding, AlgorithmChoice, CertificateAlgorithm, ChaChaEncryptor, EncryptionAlgorithm,
    Encryptor, KeyMaterial, Signer, SigningAlgorithm,
};
use licensor_types::{Environment, License, Machine, Ttl};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::certificate::MachineFile;
use crate::clock::{Clock, SystemClock};
use crate::config::CheckoutConfig;
use crate::envelope::Envelope;
use crate::error::{CheckoutError, CheckoutResult};
use crate::expiry::expires_at;
use crate::include::IncludeSet;
use crate::render::{IssuanceMeta, JsonApiRenderer, PayloadRenderer, RenderContext};
use crate::scheme::resolve_algorithm;

/// Signature context prefix for machine files.
pub const MACHINE_CONTEXT: &str = "machine";

/// A caller's request to check out a machine.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CheckoutRequest {
    pub machine: Option<Machine>,
    pub environment: Option<Environment>,
    /// Overrides the algorithm inferred from the license scheme.
    pub algorithm: Option<SigningAlgorithm>,
    /// Absent or empty means the file never expires.
    pub ttl: Option<Ttl>,
    /// Relation names to embed in the payload.
    pub includes: Vec<String>,
    /// Encrypt the payload instead of only encoding it.
    pub encrypt: bool,
}

impl CheckoutRequest {
    #[must_use]
    pub fn new(machine: Machine) -> Self {
        Self {
            machine: Some(machine),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    #[must_use]
    pub fn algorithm(mut self, algorithm: SigningAlgorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    #[must_use]
    pub fn ttl(mut self, ttl: Ttl) -> Self {
        self.ttl = Some(ttl);
        self
    }

    #[must_use]
    pub fn include<I, S>(mut self, includes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.includes.extend(includes.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn encrypted(mut self) -> Self {
        self.encrypt = true;
        self
    }
}

/// A validated checkout with its algorithm resolved.
///
/// Construction performs every request-shape check, so holding a `Checkout`
/// means issuance can only fail on crypto or collaborator errors.
#[derive(Debug, Clone)]
pub struct Checkout {
    machine: Machine,
    license: License,
    environment: Option<Environment>,
    includes: IncludeSet,
    ttl: Option<Ttl>,
    algorithm: AlgorithmChoice,
    encrypt: bool,
}

impl Checkout {
    /// Validates a request against `config`.
    ///
    /// Checks run in order: machine, license, includes, TTL bounds.
    pub fn new(request: CheckoutRequest, config: &CheckoutConfig) -> CheckoutResult<Self> {
        let machine = request.machine.ok_or(CheckoutError::InvalidMachine)?;
        let license = machine
            .license
            .clone()
            .ok_or(CheckoutError::InvalidLicense)?;
        let includes = IncludeSet::resolve(&request.includes, &config.allowed_includes)?;

        let ttl = request.ttl.filter(|ttl| !ttl.is_empty());
        if let Some(ttl) = &ttl {
            config.ttl.check(ttl)?;
        }

        let algorithm = resolve_algorithm(license.scheme.as_ref(), request.algorithm);

        Ok(Self {
            machine,
            license,
            environment: request.environment,
            includes,
            ttl,
            algorithm,
            encrypt: request.encrypt,
        })
    }

    #[must_use]
    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    #[must_use]
    pub fn license(&self) -> &License {
        &self.license
    }

    #[must_use]
    pub fn includes(&self) -> &IncludeSet {
        &self.includes
    }

    #[must_use]
    pub fn ttl(&self) -> Option<&Ttl> {
        self.ttl.as_ref()
    }

    /// The requested signing algorithm; may be the signer-default sentinel.
    #[must_use]
    pub fn algorithm(&self) -> AlgorithmChoice {
        self.algorithm
    }

    #[must_use]
    pub fn is_encrypted(&self) -> bool {
        self.encrypt
    }
}

/// Issues machine files.
///
/// Holds only read-only collaborators, so one instance can serve concurrent
/// checkouts.
pub struct MachineCheckout {
    config: CheckoutConfig,
    signer: Arc<dyn Signer>,
    encryptor: Arc<dyn Encryptor>,
    renderer: Arc<dyn PayloadRenderer>,
    clock: Arc<dyn Clock>,
}

impl MachineCheckout {
    /// Creates a checkout service with default config, ChaCha20-Poly1305
    /// encryption, the JSON:API renderer and the system clock.
    pub fn new(signer: Arc<dyn Signer>) -> Self {
        Self {
            config: CheckoutConfig::default(),
            signer,
            encryptor: Arc::new(ChaChaEncryptor::new()),
            renderer: Arc::new(JsonApiRenderer),
            clock: Arc::new(SystemClock),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: CheckoutConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_encryptor(mut self, encryptor: Arc<dyn Encryptor>) -> Self {
        self.encryptor = encryptor;
        self
    }

    #[must_use]
    pub fn with_renderer(mut self, renderer: Arc<dyn PayloadRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    /// Validates `request` and issues a machine file for it.
    pub fn checkout(&self, request: CheckoutRequest) -> CheckoutResult<MachineFile> {
        let checkout = Checkout::new(request, &self.config).inspect_err(|e| {
            warn!("Rejected machine checkout: {}", e);
        })?;
        self.issue(&checkout)
    }

    /// Issues a machine file for an already validated checkout.
    pub fn issue(&self, checkout: &Checkout) -> CheckoutResult<MachineFile> {
        let machine = &checkout.machine;
        let license = &checkout.license;

        let issued_at = self.clock.now();
        let expires_at = expires_at(issued_at, checkout.ttl.as_ref())?;
        let ttl = checkout.ttl.as_ref().map(Ttl::as_secs);

        let meta = IssuanceMeta {
            issued: issued_at,
            expiry: expires_at,
            ttl,
        };
        let payload = self.renderer.render(&RenderContext {
            machine,
            license,
            environment: checkout.environment.as_ref(),
            meta: &meta,
            includes: &checkout.includes,
        })?;
        let data = serde_json::to_vec(&payload)?;

        let (enc, encryption) = if checkout.encrypt {
            let material = KeyMaterial::derive(&license.key, &machine.fingerprint);
            (self.encryptor.encrypt(&data, &material)?, self.encryptor.algorithm())
        } else {
            (encoding::encode(&data), EncryptionAlgorithm::Base64)
        };

        let signed = self
            .signer
            .sign(enc.as_bytes(), checkout.algorithm, MACHINE_CONTEXT)?;
        debug!(
            "Signed machine file for {} with {} (requested {:?})",
            machine.id, signed.algorithm, checkout.algorithm
        );

        let algorithm = CertificateAlgorithm::new(encryption, signed.algorithm);
        let certificate = Envelope {
            enc,
            sig: signed.signature,
            alg: algorithm.to_string(),
        }
        .armor()?;

        info!(
            "Issued machine file for machine {} (license {}, alg {}, expires {:?})",
            machine.id, license.id, algorithm, expires_at
        );

        Ok(MachineFile::new(
            checkout.environment.as_ref().map(|e| e.id),
            license.account_id,
            license.id,
            machine.id,
            certificate,
            issued_at,
            expires_at,
            ttl,
            checkout.includes.names(),
            algorithm,
        ))
    }
}
