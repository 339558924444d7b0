//! Scenario 3: Access Matrix
//!
//! For every message block and every organization the directory knows,
//! show what that organization is allowed to read. Demonstrates that
//! redaction depends only on who sent and who received each message.

use medledger_contracts::{error::LedgerResult, view::Disclosure};
use medledger_core::{Directory, Ledger};
use medledger_directory::StaticDirectory;

use crate::mock_data::{care_episode, ledger_for, preload};

/// One block as seen by every organization, in directory order.
#[derive(Debug)]
pub struct MatrixRow {
    pub index: u64,
    pub added_by: String,
    pub cells: Vec<(String, Disclosure)>,
}

/// Decrypt every non-genesis block for every organization in `directory`.
pub fn build_matrix(ledger: &Ledger, directory: &dyn Directory) -> LedgerResult<Vec<MatrixRow>> {
    let orgs = directory.all_org_ids();
    let mut rows = Vec::new();

    for block in ledger.blocks().iter().filter(|b| !b.is_genesis()) {
        let mut cells = Vec::with_capacity(orgs.len());
        for org in &orgs {
            cells.push((org.clone(), ledger.decrypt_message(block.index(), org)?));
        }
        rows.push(MatrixRow {
            index: block.index(),
            added_by: block.added_by().to_string(),
            cells,
        });
    }

    Ok(rows)
}

/// Run Scenario 3 against `directory` (or the reference consortium).
pub fn run_scenario(directory: Option<StaticDirectory>) -> LedgerResult<()> {
    println!("=== Scenario 3: Access Matrix ===");
    println!();

    let (ledger, directory) = ledger_for(directory)?;
    preload(&ledger, &care_episode())?;

    for row in build_matrix(&ledger, directory.as_ref())? {
        println!("  Block {} (added by {}):", row.index, row.added_by);
        for (org, disclosure) in &row.cells {
            let marker = if disclosure.is_visible() { "READ " } else { "DENY " };
            println!("    {} {:<10} {}", marker, org, disclosure.display_content());
        }
    }
    println!();

    println!("  Scenario 3 complete.");
    println!();
    Ok(())
}
