//! # medledger-ref-healthcare
//!
//! Healthcare reference consortium for the MedLedger ledger.
//!
//! Demonstrates three properties of the chain using mock data:
//!
//! 1. **Care Episode**: a realistic message exchange and how each member
//!    (and an outsider) sees it.
//! 2. **Tamper Detection**: unauthorized appends are refused, and a
//!    corrupted block is caught by the integrity check.
//! 3. **Access Matrix**: per-block, per-organization disclosure.
//!
//! All data is hardcoded and fictional.

pub mod mock_data;
pub mod scenarios;
