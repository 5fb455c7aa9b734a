//! Command-line surface for machine file issuance.
//!
//! Loads a checkout request, an account keyring and an optional config file,
//! then runs the checkout pipeline. The binary in `main.rs` only parses
//! arguments, installs logging and writes the output.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use licensor_checkout::{CheckoutConfig, CheckoutRequest, MachineCheckout, MachineFile};
use licensor_crypto::{AccountKeyring, SigningAlgorithm};
use licensor_types::Ttl;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "licensor")]
#[command(about = "Issue signed machine files")]
pub struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check out a machine and print its machine file
    Checkout(CheckoutArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct CheckoutArgs {
    /// Path to the checkout request JSON
    #[arg(long)]
    pub request: PathBuf,

    /// Ed25519 signing key: PKCS#8 PEM or a raw 32-byte seed
    #[arg(long)]
    pub ed25519_key: Option<PathBuf>,

    /// RSA signing key: PKCS#8 or PKCS#1 PEM
    #[arg(long)]
    pub rsa_key: Option<PathBuf>,

    /// Path to a TOML checkout config
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Encrypt the payload with the license key and machine fingerprint
    #[arg(long)]
    pub encrypt: bool,

    /// Time to live in seconds
    #[arg(long)]
    pub ttl: Option<u64>,

    /// Signing algorithm override (ed25519, rsa-pss-sha256, rsa-sha256)
    #[arg(long)]
    pub algorithm: Option<SigningAlgorithm>,

    /// Relations to embed, comma separated
    #[arg(long, value_delimiter = ',')]
    pub include: Vec<String>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Print the machine file record as JSON instead of the certificate
    #[arg(long)]
    pub record: bool,
}

/// Loads the checkout config, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<CheckoutConfig> {
    let Some(path) = path else {
        debug!("No config file given, using defaults");
        return Ok(CheckoutConfig::default());
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    info!("Loaded checkout config from {:?}", path);
    Ok(config)
}

/// Builds a keyring from whichever key files were given.
pub fn load_keyring(ed25519: Option<&Path>, rsa: Option<&Path>) -> Result<AccountKeyring> {
    if ed25519.is_none() && rsa.is_none() {
        bail!("At least one of --ed25519-key or --rsa-key is required");
    }

    let mut keyring = AccountKeyring::new();

    if let Some(path) = ed25519 {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read Ed25519 key {}", path.display()))?;
        keyring = match <[u8; 32]>::try_from(bytes.as_slice()) {
            Ok(seed) => keyring.with_ed25519_seed(&seed),
            Err(_) => {
                let pem = String::from_utf8(bytes)
                    .context("Ed25519 key is neither a 32-byte seed nor PEM text")?;
                keyring
                    .with_ed25519_pem(&pem)
                    .with_context(|| format!("Invalid Ed25519 key {}", path.display()))?
            }
        };
    }

    if let Some(path) = rsa {
        let pem = fs::read_to_string(path)
            .with_context(|| format!("Failed to read RSA key {}", path.display()))?;
        keyring = keyring
            .with_rsa_pem(&pem)
            .with_context(|| format!("Invalid RSA key {}", path.display()))?;
    }

    Ok(keyring)
}

/// Reads the request file and applies command-line overrides.
pub fn load_request(args: &CheckoutArgs) -> Result<CheckoutRequest> {
    let contents = fs::read_to_string(&args.request)
        .with_context(|| format!("Failed to read request {}", args.request.display()))?;
    let mut request: CheckoutRequest = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse request {}", args.request.display()))?;

    if args.encrypt {
        request = request.encrypted();
    }
    if let Some(secs) = args.ttl {
        request = request.ttl(Ttl::from_secs(secs));
    }
    if let Some(algorithm) = args.algorithm {
        request = request.algorithm(algorithm);
    }
    Ok(request.include(args.include.iter().cloned()))
}

/// Runs a checkout and returns the issued machine file.
pub fn checkout(args: &CheckoutArgs) -> Result<MachineFile> {
    let config = load_config(args.config.as_deref())?;
    let keyring = load_keyring(args.ed25519_key.as_deref(), args.rsa_key.as_deref())?;
    let request = load_request(args)?;

    let service = MachineCheckout::new(Arc::new(keyring)).with_config(config);
    let file = service.checkout(request).context("Machine checkout failed")?;
    Ok(file)
}

/// Renders the output text for a checkout: the certificate, or the record.
pub fn render_output(file: &MachineFile, record: bool) -> Result<String> {
    if record {
        let mut json = serde_json::to_string_pretty(file)?;
        json.push('\n');
        Ok(json)
    } else {
        Ok(file.certificate().to_string())
    }
}
