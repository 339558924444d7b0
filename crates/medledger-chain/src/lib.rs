//! # medledger-chain
//!
//! Immutable, hash-linked blocks and SHA-256 chain integrity checks for the
//! MedLedger ledger.
//!
//! ## Overview
//!
//! Each `Block` commits to its index, timestamp, ciphertext, author, and the
//! hash of the block before it. Tampering with any field of any block breaks
//! its seal, which `inspect_chain` reports.
//!
//! ```rust,ignore
//! use medledger_chain::{Block, verify_chain};
//!
//! let genesis = Block::new(0, envelope, Block::GENESIS_PREVIOUS_HASH, "System");
//! let next = Block::new(1, other_envelope, genesis.hash(), "Hospital");
//! assert!(verify_chain(&[genesis, next]));
//! ```

pub mod block;
pub mod chain;

pub use block::Block;
pub use chain::{first_invalid_index, hash_block, inspect_chain, verify_chain, ChainFault};

// ── Tests ─────────────────────────────────────────────────────────────────────
