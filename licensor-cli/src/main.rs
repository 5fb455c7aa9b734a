//! Licensor machine file issuer
//!
//! Usage:
//!   licensor checkout --request request.json --ed25519-key account.pem
//!   licensor checkout --request request.json --rsa-key account.pem --encrypt --ttl 2592000
//!
//! Logs go to stderr so the certificate can be piped.

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use licensor_cli::{checkout, render_output, Cli, Command};
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Checkout(args) => {
            let file = checkout(&args)?;
            let output = render_output(&file, args.record)?;

            match &args.out {
                Some(path) => {
                    fs::write(path, output)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("Wrote machine file for {} to {:?}", file.machine_id(), path);
                }
                None => print!("{output}"),
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let builder = FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    match EnvFilter::try_from_default_env() {
        Ok(filter) => builder.with_env_filter(filter).init(),
        Err(_) => {
            let level = if verbose { Level::DEBUG } else { Level::INFO };
            builder.with_max_level(level).init();
        }
    }
}
