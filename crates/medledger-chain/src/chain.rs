//! Hash-chain primitives: block hashing and chain inspection.
//!
//! Hash input layout (bytes, in order):
//!   1. index as 8-byte little-endian
//!   2. timestamp as RFC 3339, nanosecond precision, `Z` suffix
//!   3. ciphertext envelope as UTF-8 bytes
//!   4. previous_hash as UTF-8 bytes (64 ASCII hex chars)
//!   5. added_by as UTF-8 bytes
//!
//! Fields 2-5 are each preceded by their byte length as an 8-byte
//! little-endian integer, so no two distinct field tuples share an input.
//!
//! The layout must never change for the life of a chain: tamper detection
//! is exactly the comparison between the stored hash and this function.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::block::Block;

/// Compute the SHA-256 hash of a block's fields.
///
/// Returns a lowercase 64-character hex string.
pub fn hash_block(
    index: u64,
    timestamp: &DateTime<Utc>,
    ciphertext: &str,
    previous_hash: &str,
    added_by: &str,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(index.to_le_bytes());
    let timestamp = timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true);
    for field in [timestamp.as_str(), ciphertext, previous_hash, added_by] {
        hasher.update((field.len() as u64).to_le_bytes());
        hasher.update(field.as_bytes());
    }

    hex::encode(hasher.finalize())
}

/// One integrity violation found while inspecting a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChainFault {
    /// Block 0 does not carry the genesis sentinel as its previous hash.
    BadGenesis,
    /// The block's stored hash differs from the hash of its fields.
    HashMismatch { index: u64 },
    /// The block's previous_hash differs from the prior block's stored hash.
    BrokenLink { index: u64 },
    /// The block's index is not its position in the chain.
    IndexGap { index: u64 },
}

impl ChainFault {
    /// Position of the block the fault was found on.
    pub fn index(&self) -> u64 {
        match self {
            ChainFault::BadGenesis => 0,
            ChainFault::HashMismatch { index }
            | ChainFault::BrokenLink { index }
            | ChainFault::IndexGap { index } => *index,
        }
    }
}

/// Inspect every block and report every fault, in chain order.
///
/// Rules per block at position `i`:
///
/// 1. **Position**: `index == i`.
/// 2. **Linkage**: `previous_hash` equals the stored hash of block `i-1`,
///    or `Block::GENESIS_PREVIOUS_HASH` for block 0.
/// 3. **Seal**: the stored hash matches the recomputed hash.
///
/// Linkage compares against the prior block's *stored* hash, so tampering
/// with one block's ciphertext yields a single `HashMismatch` on that block
/// and leaves its successors consistent with each other.
pub fn inspect_chain(blocks: &[Block]) -> Vec<ChainFault> {
    let mut faults = Vec::new();
    let mut expected_prev: &str = Block::GENESIS_PREVIOUS_HASH;

    for (position, block) in blocks.iter().enumerate() {
        let position = position as u64;

        if block.index() != position {
            faults.push(ChainFault::IndexGap { index: position });
        }

        if block.previous_hash() != expected_prev {
            if position == 0 {
                faults.push(ChainFault::BadGenesis);
            } else {
                faults.push(ChainFault::BrokenLink { index: position });
            }
        }

        if !block.is_sealed() {
            faults.push(ChainFault::HashMismatch { index: position });
        }

        expected_prev = block.hash();
    }

    for fault in &faults {
        warn!(fault = ?fault, "chain integrity fault");
    }

    faults
}

/// Index of the first faulty block, or `None` for an intact chain.
pub fn first_invalid_index(blocks: &[Block]) -> Option<u64> {
    inspect_chain(blocks).first().map(ChainFault::index)
}

/// True when the chain has no faults. An empty chain is valid.
pub fn verify_chain(blocks: &[Block]) -> bool {
    inspect_chain(blocks).is_empty()
}
