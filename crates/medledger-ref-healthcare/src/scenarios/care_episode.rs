//! Scenario 1: Care Episode
//!
//! Replays a five-message pneumonia admission between Hospital, Lab, and
//! Insurance, then prints the chain as each consortium member sees it and as
//! an outside viewer sees it. Content is visible only to the sender and the
//! recipient of each message.

use medledger_contracts::{error::LedgerResult, view::ChainView};
use medledger_core::Directory;
use medledger_directory::StaticDirectory;

use crate::mock_data::{care_episode, ledger_for, preload};

/// Viewer used to show what a non-member gets.
pub const OUTSIDE_VIEWER: &str = "Public";

/// Run Scenario 1 against `directory` (or the reference consortium).
pub fn run_scenario(directory: Option<StaticDirectory>) -> LedgerResult<()> {
    println!("=== Scenario 1: Care Episode ===");
    println!();

    let (ledger, directory) = ledger_for(directory)?;
    preload(&ledger, &care_episode())?;

    println!("  Ledger:          {}", ledger.id());
    println!("  Blocks:          {} (genesis + {} messages)", ledger.len(), ledger.len() - 1);
    println!(
        "  Chain integrity: {}",
        if ledger.is_chain_valid() { "VERIFIED" } else { "FAILED" }
    );
    println!();

    let mut viewers = directory.all_org_ids();
    viewers.push(OUTSIDE_VIEWER.to_string());

    for viewer in &viewers {
        print_view(&ledger.get_chain(viewer));
    }

    println!("  Scenario 1 complete.");
    println!();
    Ok(())
}

/// Print one viewer's chain export.
pub fn print_view(view: &ChainView) {
    println!("  Viewer: {}", view.viewer);
    for entry in &view.entries {
        println!(
            "    #{} {:<10} {:<18} {}  {}",
            entry.index,
            entry.added_by,
            entry.payload.message_type().unwrap_or("UNKNOWN"),
            entry.short_hash(),
            entry.payload.display_content()
        );
    }
    println!();
}
