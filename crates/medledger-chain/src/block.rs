//! The block type.
//!
//! A `Block` pairs one ciphertext envelope with its position in the chain,
//! its author, and a SHA-256 commitment to all of those. Fields are private:
//! the timestamp and hash are assigned once by `Block::new` and only ever
//! read afterwards.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::chain::hash_block;

/// One immutable, hash-linked record in the ledger.
///
/// Changing any field after construction makes `hash()` disagree with
/// `compute_hash()`, which the chain inspection detects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    index: u64,
    timestamp: DateTime<Utc>,
    ciphertext: String,
    previous_hash: String,
    added_by: String,
    hash: String,
}

impl Block {
    /// The `previous_hash` sentinel carried by the genesis block.
    ///
    /// 64 hex zeros, so it has the same shape as a real digest.
    pub const GENESIS_PREVIOUS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";

    /// Build a block stamped with the current time and hash it.
    pub fn new(
        index: u64,
        ciphertext: impl Into<String>,
        previous_hash: impl Into<String>,
        added_by: impl Into<String>,
    ) -> Self {
        let mut block = Self {
            index,
            timestamp: Utc::now(),
            ciphertext: ciphertext.into(),
            previous_hash: previous_hash.into(),
            added_by: added_by.into(),
            hash: String::new(),
        };
        block.hash = block.compute_hash();
        block
    }

    /// Recompute the hash from the block's current field values.
    pub fn compute_hash(&self) -> String {
        hash_block(
            self.index,
            &self.timestamp,
            &self.ciphertext,
            &self.previous_hash,
            &self.added_by,
        )
    }

    /// True if the stored hash still matches the fields.
    pub fn is_sealed(&self) -> bool {
        self.hash == self.compute_hash()
    }

    /// A copy of this block with `ciphertext` overwritten and the stored
    /// hash left as it was.
    ///
    /// Fault injection for exercising tamper detection. The result never
    /// passes `is_sealed` unless `ciphertext` is unchanged.
    pub fn tampered(&self, ciphertext: impl Into<String>) -> Self {
        Self {
            ciphertext: ciphertext.into(),
            ..self.clone()
        }
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn ciphertext(&self) -> &str {
        &self.ciphertext
    }

    pub fn previous_hash(&self) -> &str {
        &self.previous_hash
    }

    pub fn added_by(&self) -> &str {
        &self.added_by
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn is_genesis(&self) -> bool {
        self.index == 0
    }
}
