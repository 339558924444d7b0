//! MedLedger Healthcare Consortium: Demo CLI
//!
//! Runs the reference scenarios against an in-memory proof-of-authority
//! ledger, or exports the chain as one organization sees it.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- tamper-detection
//!   cargo run -p demo -- export --viewer Lab
//!   cargo run -p demo -- --directory consortium.toml access-matrix

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use medledger_contracts::error::{LedgerError, LedgerResult};
use medledger_directory::StaticDirectory;
use medledger_ref_healthcare::{
    mock_data::{care_episode, ledger_for, preload},
    scenarios::{access_matrix, care_episode as episode, tamper_detection},
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// MedLedger: encrypted, hash-chained message sharing for a healthcare
/// consortium.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "MedLedger healthcare consortium demo",
    long_about = "Runs MedLedger scenarios showing validator-gated appends,\n\
                  per-message encryption, viewer-scoped redaction, and tamper detection."
)]
struct Cli {
    /// Organization directory TOML. Defaults to the built-in consortium.
    #[arg(long, global = true)]
    directory: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all three scenarios in sequence.
    RunAll,
    /// Scenario 1: replay a care episode and show each member's view.
    CareEpisode,
    /// Scenario 2: refused intrusion and a corrupted block.
    TamperDetection,
    /// Scenario 3: per-block, per-organization disclosure.
    AccessMatrix,
    /// Preload the care episode and print the chain as JSON for one viewer.
    Export {
        /// Organization whose view to export.
        #[arg(long)]
        viewer: String,
        /// Corrupt this block before exporting.
        #[arg(long)]
        tamper: Option<u64>,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> LedgerResult<()> {
    let load = || load_directory(cli.directory.as_deref());

    match cli.command {
        Command::RunAll => {
            print_banner();
            episode::run_scenario(load()?)?;
            tamper_detection::run_scenario(load()?)?;
            access_matrix::run_scenario(load()?)?;
            println!("All selected scenarios completed successfully.");
        }
        Command::CareEpisode => {
            print_banner();
            episode::run_scenario(load()?)?;
        }
        Command::TamperDetection => {
            print_banner();
            tamper_detection::run_scenario(load()?)?;
        }
        Command::AccessMatrix => {
            print_banner();
            access_matrix::run_scenario(load()?)?;
        }
        Command::Export { viewer, tamper } => export(load()?, &viewer, tamper)?,
    }
    Ok(())
}

fn load_directory(path: Option<&Path>) -> LedgerResult<Option<StaticDirectory>> {
    path.map(StaticDirectory::from_file).transpose()
}

fn export(
    directory: Option<StaticDirectory>,
    viewer: &str,
    tamper: Option<u64>,
) -> LedgerResult<()> {
    let (ledger, _) = ledger_for(directory)?;
    preload(&ledger, &care_episode())?;
    if let Some(index) = tamper {
        ledger.corrupt_block(index, "tampered-data")?;
    }

    let view = ledger.get_chain(viewer);
    info!(viewer = %viewer, valid = view.valid, blocks = view.entries.len(), "chain exported");

    let json = serde_json::to_string_pretty(&view).map_err(|e| LedgerError::Serialization {
        reason: e.to_string(),
    })?;
    println!("{}", json);
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("MedLedger: Proof-of-Authority Healthcare Ledger");
    println!("Consortium Demo");
    println!("================================================");
    println!();
    println!("Append pipeline per message:");
    println!("  [1] Directory check: author must be a validator");
    println!("  [2] Key resolution: shared key, else the author's key");
    println!("  [3] AES-256-GCM encryption with a fresh nonce");
    println!("  [4] Block linked to the tail and sealed with SHA-256");
    println!();
    println!("Reads decrypt per viewer: only sender and recipient see content.");
    println!();
}
