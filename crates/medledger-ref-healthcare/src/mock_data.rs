//! Simulated consortium and clinical traffic for the reference scenarios.
//!
//! All identifiers, secrets, and clinical content are fictional.

use std::sync::Arc;

use chrono::{Duration, Utc};

use medledger_contracts::{error::LedgerResult, message::HealthMessage};
use medledger_core::Ledger;
use medledger_directory::StaticDirectory;

/// The reference consortium: Hospital, Lab, Insurance, plus a shared secret.
pub const CONSORTIUM_TOML: &str = include_str!("../directories/consortium.toml");

/// Patient every reference message concerns.
pub const PATIENT_ID: &str = "P101";

/// Load the reference consortium directory.
pub fn reference_directory() -> LedgerResult<StaticDirectory> {
    StaticDirectory::from_toml_str(CONSORTIUM_TOML)
}

/// A ledger bound to `directory` (or the reference consortium).
pub fn ledger_for(
    directory: Option<StaticDirectory>,
) -> LedgerResult<(Ledger, Arc<StaticDirectory>)> {
    let directory = match directory {
        Some(d) => Arc::new(d),
        None => Arc::new(reference_directory()?),
    };
    let ledger = Ledger::new(directory.clone())?;
    Ok((ledger, directory))
}

/// A five-message pneumonia admission, in the order it happened.
///
/// Returns `(author, message)` pairs; the author is always the sender.
pub fn care_episode() -> Vec<(&'static str, HealthMessage)> {
    let start = Utc::now() - Duration::hours(6);
    let at = |minutes: i64| start + Duration::minutes(minutes);

    let entries = [
        ("PATIENT_ADMISSION", "Hospital", "Hospital", "Admitted for pneumonia", 0),
        ("LAB_REQUEST", "Hospital", "Lab", "Run CBC, CRP, Chest X-ray", 20),
        ("LAB_RESULT", "Lab", "Hospital", "WBC=15k, CRP=120, X-ray: infiltrate", 140),
        ("CLAIM_SUBMISSION", "Hospital", "Insurance", "Request coverage for 5-day stay", 200),
        ("CLAIM_APPROVAL", "Insurance", "Hospital", "Approved up to $5,000", 330),
    ];

    entries
        .into_iter()
        .map(|(kind, from, to, content, minute)| {
            let mut message = HealthMessage::new(kind, from, to, content).with_patient(PATIENT_ID);
            message.timestamp = at(minute);
            (from, message)
        })
        .collect()
}

/// Three standalone records used by the tamper scenario, one per validator.
pub fn diagnosis_records() -> Vec<(&'static str, HealthMessage)> {
    vec![
        (
            "Hospital",
            HealthMessage::new("DIAGNOSIS", "Hospital", "Insurance", "Diagnosed with pneumonia")
                .with_patient(PATIENT_ID),
        ),
        (
            "Lab",
            HealthMessage::new("LAB_RESULT", "Lab", "Hospital", "WBC = 15k, CRP elevated")
                .with_patient(PATIENT_ID),
        ),
        (
            "Insurance",
            HealthMessage::new("CLAIM_APPROVAL", "Insurance", "Hospital", "Approved for antibiotics")
                .with_patient(PATIENT_ID),
        ),
    ]
}

/// Append every `(author, message)` pair to `ledger`.
pub fn preload(ledger: &Ledger, messages: &[(&str, HealthMessage)]) -> LedgerResult<()> {
    for (author, message) in messages {
        ledger.add_block(message, author)?;
    }
    Ok(())
}
