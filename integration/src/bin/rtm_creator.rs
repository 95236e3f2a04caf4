//! Manifest Generation Binary
//!
//! This binary resets the local simulator, creates the test accounts, publishes
//! and instantiates the PaymentSplitter package, and writes the transaction
//! manifests that exercise it.
//!
//! # Usage
//! ```bash
//! cargo run --bin rtm_creator
//! ```
//!
//! With no arguments the package in the current directory is published and the
//! manifests land in `./transactions`. Run them afterwards with
//! `resim run transactions/<name>.rtm`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use splitter_integration::{run_harness, HarnessConfig, ShellExecutor, Simulator};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(about = "Generate PaymentSplitter transaction manifests against resim", long_about = None)]
struct Cli {
    /// TOML file with harness settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory of the package to publish
    #[arg(long)]
    package_dir: Option<PathBuf>,

    /// Directory that receives the manifests (default: <package-dir>/transactions)
    #[arg(long)]
    manifest_dir: Option<PathBuf>,

    /// Simulator binary to invoke
    #[arg(long)]
    simulator: Option<String>,

    /// Number of accounts to create
    #[arg(long)]
    accounts: Option<usize>,

    /// Random seed for the share amounts
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn harness_config(&self) -> Result<HarnessConfig> {
        let mut config = match &self.config {
            Some(path) => HarnessConfig::from_toml_file(path)?,
            None => HarnessConfig::default(),
        };

        if let Some(package_dir) = &self.package_dir {
            config.package_dir = package_dir.clone();
        }
        if let Some(manifest_dir) = &self.manifest_dir {
            config.manifest_dir = Some(manifest_dir.clone());
        }
        if let Some(simulator) = &self.simulator {
            config.simulator = simulator.clone();
        }
        if let Some(accounts) = self.accounts {
            config.account_count = accounts;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.harness_config().context("Invalid harness configuration")?;

    println!("=== Payment Splitter Manifest Generation ===\n");

    let simulator = Simulator::with_program(ShellExecutor, config.simulator.clone());
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let report = run_harness(&simulator, &config, &mut rng)
        .await
        .with_context(|| format!("Failed to set up the {} package", config.blueprint))?;

    println!("Created {} accounts:", report.accounts.len());
    for account in &report.accounts {
        println!("  {account}");
    }

    println!("\nPublished the package: {}", report.package);

    println!("\nInstantiated the component:");
    println!("  Component: {}", report.instance.component);
    println!("  Admin Badge: {}", report.instance.admin_badge);
    println!("  Internal Admin Badge: {}", report.instance.internal_admin_badge);
    println!("  Shareholders Badge: {}", report.instance.shareholders_badge);

    println!("\nShares:");
    for (account, share) in report.accounts.iter().zip(&report.shares) {
        println!("  {}: {share}", account.address());
    }

    println!("\n=== Manifests Written ===");
    for path in &report.manifests {
        println!("  ✓ {}", path.display());
    }

    Ok(())
}
