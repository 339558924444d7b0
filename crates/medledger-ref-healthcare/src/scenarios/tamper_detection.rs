//! Scenario 2: Tamper Detection
//!
//! 1. Three validators each append one record.
//! 2. An organization outside the validator set tries to append and is
//!    refused; the chain length does not change.
//! 3. Block 1's ciphertext is overwritten without rehashing.
//! 4. The integrity check fails at block 1, and block 1 reads back as
//!    corrupted while the rest of the chain stays readable.

use tracing::info;

use medledger_contracts::{
    error::{LedgerError, LedgerResult},
    view::Disclosure,
};
use medledger_core::{ChainReport, Ledger};
use medledger_directory::StaticDirectory;

use crate::mock_data::{diagnosis_records, ledger_for, preload};

/// The organization that attempts an unauthorized append.
pub const INTRUDER: &str = "Hacker";

/// The block the scenario corrupts.
pub const TAMPERED_INDEX: u64 = 1;

/// Everything the scenario observed, for printing or assertions.
#[derive(Debug)]
pub struct TamperOutcome {
    pub length_before_intrusion: usize,
    pub length_after_intrusion: usize,
    pub intrusion_refused: bool,
    pub valid_before_tamper: bool,
    pub report_after_tamper: ChainReport,
    /// What the original author of the tampered block now reads.
    pub tampered_read: Disclosure,
}

/// Run steps 1–4 against `ledger` and report what happened.
pub fn simulate(ledger: &Ledger) -> LedgerResult<TamperOutcome> {
    let records = diagnosis_records();
    preload(ledger, &records)?;

    let length_before_intrusion = ledger.len();
    let (_, fake) = &records[0];
    let intrusion_refused = match ledger.add_block(fake, INTRUDER) {
        Err(LedgerError::Unauthorized { .. }) => true,
        Err(e) => return Err(e),
        Ok(_) => false,
    };
    let length_after_intrusion = ledger.len();

    let valid_before_tamper = ledger.is_chain_valid();
    ledger.corrupt_block(TAMPERED_INDEX, "tampered:data")?;
    let report_after_tamper = ledger.verify();

    let author = ledger.block(TAMPERED_INDEX)?.added_by().to_string();
    let tampered_read = ledger.decrypt_message(TAMPERED_INDEX, &author)?;

    info!(
        ledger_id = %ledger.id(),
        first_invalid = ?report_after_tamper.first_invalid,
        "tamper simulation finished"
    );

    Ok(TamperOutcome {
        length_before_intrusion,
        length_after_intrusion,
        intrusion_refused,
        valid_before_tamper,
        report_after_tamper,
        tampered_read,
    })
}

/// Run Scenario 2 against `directory` (or the reference consortium).
pub fn run_scenario(directory: Option<StaticDirectory>) -> LedgerResult<()> {
    println!("=== Scenario 2: Tamper Detection ===");
    println!();

    let (ledger, _) = ledger_for(directory)?;
    let outcome = simulate(&ledger)?;

    println!("  Records appended:       {}", outcome.length_before_intrusion - 1);
    println!(
        "  '{}' append attempt:  {} (chain length {} -> {})",
        INTRUDER,
        if outcome.intrusion_refused { "REFUSED" } else { "ACCEPTED" },
        outcome.length_before_intrusion,
        outcome.length_after_intrusion
    );
    println!(
        "  Integrity before:       {}",
        if outcome.valid_before_tamper { "VERIFIED" } else { "FAILED" }
    );
    println!("  Corrupting block {} ciphertext (hash left untouched)...", TAMPERED_INDEX);
    println!(
        "  Integrity after:        {}",
        if outcome.report_after_tamper.valid { "VERIFIED" } else { "FAILED" }
    );
    if let Some(index) = outcome.report_after_tamper.first_invalid {
        println!("  First invalid block:    #{}", index);
    }
    for fault in &outcome.report_after_tamper.faults {
        println!("  Fault:                  {:?}", fault);
    }
    println!(
        "  Block {} as read by its author: {}",
        TAMPERED_INDEX,
        outcome.tampered_read.display_content()
    );
    println!();

    println!("  Scenario 2 complete.");
    println!();
    Ok(())
}
