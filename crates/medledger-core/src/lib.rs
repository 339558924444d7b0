//! # medledger-core
//!
//! The ledger engine for the MedLedger proof-of-authority chain.
//!
//! This crate provides:
//! - The `Directory` capability trait the ledger consults for authorization
//!   and key material
//! - The `Ledger`, which owns the block sequence, the append protocol, the
//!   integrity check, and viewer-scoped decryption
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use medledger_core::Ledger;
//!
//! let ledger = Ledger::new(Arc::new(directory))?;
//! ledger.add_block(&message, "Hospital")?;
//! assert!(ledger.is_chain_valid());
//! let view = ledger.get_chain("Lab");
//! ```

pub mod disclosure;
pub mod ledger;
pub mod traits;

pub use ledger::{ChainReport, Ledger, GENESIS_MESSAGE};
pub use traits::Directory;
