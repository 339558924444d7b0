//! The MedLedger engine: an authorization-gated, append-only block chain.
//!
//! The append path enforces a fixed order:
//!
//!   Directory attached → Validator check → Key resolution → Encrypt → Link → Push
//!
//! Nothing touches the chain until every check has passed, so a refused
//! append leaves the ledger exactly as it was. Linking and pushing happen in
//! one write-lock critical section: concurrent appends are serialized, and
//! readers only ever see fully hashed, fully linked blocks.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use medledger_chain::{inspect_chain, Block, ChainFault};
use medledger_contracts::{
    error::{LedgerError, LedgerResult},
    message::{HealthMessage, MessageRequest},
    org::{KeyMaterial, LedgerId, SHARED_KEY_ID, SYSTEM_ORG_ID},
    view::{BlockSummary, ChainEntry, ChainView, Disclosure, Redaction},
};

use crate::{disclosure::disclose, traits::Directory};

/// Plaintext sealed into the genesis block.
pub const GENESIS_MESSAGE: &str = "System: Blockchain initialized for secure sharing";

/// Secret used for the genesis block when no directory key resolves.
const DEFAULT_GENESIS_SECRET: &str = "medledger-default-genesis-secret";

/// Result of a full integrity check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainReport {
    pub valid: bool,
    pub first_invalid: Option<u64>,
    pub faults: Vec<ChainFault>,
}

impl ChainReport {
    fn from_faults(faults: Vec<ChainFault>) -> Self {
        Self {
            valid: faults.is_empty(),
            first_invalid: faults.first().map(ChainFault::index),
            faults,
        }
    }
}

/// The in-memory proof-of-authority ledger.
///
/// Construct with [`Ledger::new`] for normal use. [`Ledger::detached`]
/// builds a ledger with only its genesis block and no directory; appends on
/// it fail with `DirectoryNotConfigured` until [`Ledger::attach_directory`]
/// is called.
pub struct Ledger {
    id: LedgerId,
    directory: RwLock<Option<Arc<dyn Directory>>>,
    blocks: RwLock<Vec<Block>>,
}

impl Ledger {
    /// Create a ledger bound to `directory` and seal its genesis block.
    pub fn new(directory: Arc<dyn Directory>) -> LedgerResult<Self> {
        Self::with_directory(Some(directory))
    }

    /// Create a ledger with no directory attached.
    pub fn detached() -> LedgerResult<Self> {
        Self::with_directory(None)
    }

    fn with_directory(directory: Option<Arc<dyn Directory>>) -> LedgerResult<Self> {
        let id = LedgerId::new();
        let genesis = create_genesis_block(directory.as_deref())?;

        info!(
            ledger_id = %id,
            genesis_hash = %genesis.hash(),
            directory_attached = directory.is_some(),
            "ledger initialized"
        );

        Ok(Self {
            id,
            directory: RwLock::new(directory),
            blocks: RwLock::new(vec![genesis]),
        })
    }

    /// Attach (or replace) the organization directory.
    pub fn attach_directory(&self, directory: Arc<dyn Directory>) {
        let mut slot = self
            .directory
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *slot = Some(directory);
        info!(ledger_id = %self.id, "organization directory attached");
    }

    pub fn id(&self) -> LedgerId {
        self.id
    }

    pub fn has_directory(&self) -> bool {
        self.directory().is_some()
    }

    /// Number of blocks, genesis included. Never zero.
    pub fn len(&self) -> usize {
        self.read_blocks().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_blocks().is_empty()
    }

    /// Hash of the current last block.
    pub fn tail_hash(&self) -> String {
        self.read_blocks()
            .last()
            .map(|b| b.hash().to_string())
            .unwrap_or_default()
    }

    /// A snapshot copy of every block.
    pub fn blocks(&self) -> Vec<Block> {
        self.read_blocks().clone()
    }

    /// A copy of the block at `index`.
    pub fn block(&self, index: u64) -> LedgerResult<Block> {
        let blocks = self.read_blocks();
        lookup(&blocks, index).cloned()
    }

    // ── Append ───────────────────────────────────────────────────────────────

    /// Encrypt `message` and append it as a new block authored by `org_id`.
    ///
    /// # Errors
    ///
    /// - `DirectoryNotConfigured` if no directory is attached
    /// - `Unauthorized` if `org_id` is not a validator
    /// - `NoKeyAvailable` if neither the shared key nor `org_id`'s key resolves
    ///
    /// On any error the chain is unchanged.
    pub fn add_block(&self, message: &HealthMessage, org_id: &str) -> LedgerResult<Block> {
        let directory = self.directory().ok_or_else(|| {
            warn!(ledger_id = %self.id, org_id = %org_id, "append refused: no directory");
            LedgerError::DirectoryNotConfigured
        })?;

        if !directory.is_validator(org_id) {
            warn!(
                ledger_id = %self.id,
                org_id = %org_id,
                "append refused: organization is not a validator"
            );
            return Err(LedgerError::Unauthorized {
                org_id: org_id.to_string(),
            });
        }

        let key = resolve_key(directory.as_ref(), org_id)?;
        let plaintext = message.to_canonical_json()?;
        let envelope = medledger_crypto::encrypt(&plaintext, &key)?.to_string();

        // Read-tail, link, hash and push under one write lock.
        let mut blocks = self.blocks.write().map_err(|e| LedgerError::StatePoisoned {
            reason: format!("block list lock poisoned: {}", e),
        })?;
        let (index, previous_hash) = match blocks.last() {
            Some(tail) => (tail.index() + 1, tail.hash().to_string()),
            None => (0, Block::GENESIS_PREVIOUS_HASH.to_string()),
        };
        let block = Block::new(index, envelope, previous_hash, org_id);
        blocks.push(block.clone());
        drop(blocks);

        info!(
            ledger_id = %self.id,
            index = block.index(),
            added_by = %org_id,
            message_type = %message.kind,
            hash = %block.hash(),
            "block appended"
        );

        Ok(block)
    }

    /// Validate a raw submission and append it on behalf of its sender.
    ///
    /// Both `from` and `to` must be validators. The timestamp is assigned
    /// here, not taken from the caller.
    pub fn submit(&self, request: MessageRequest) -> LedgerResult<BlockSummary> {
        request.require_fields()?;

        let directory = self
            .directory()
            .ok_or(LedgerError::DirectoryNotConfigured)?;
        for org_id in [&request.from, &request.to] {
            if !directory.is_validator(org_id) {
                warn!(
                    ledger_id = %self.id,
                    org_id = %org_id,
                    "submission refused: unknown organization"
                );
                return Err(LedgerError::UnknownOrg {
                    org_id: org_id.clone(),
                });
            }
        }

        let sender = request.from.clone();
        let message = request.into_message(Utc::now());
        let block = self.add_block(&message, &sender)?;

        Ok(BlockSummary {
            index: block.index(),
            added_by: block.added_by().to_string(),
            timestamp: block.timestamp(),
            hash: block.hash().to_string(),
        })
    }

    // ── Integrity ────────────────────────────────────────────────────────────

    /// True if every block is sealed and correctly linked.
    pub fn is_chain_valid(&self) -> bool {
        self.verify().valid
    }

    /// Inspect the chain and report every fault found.
    pub fn verify(&self) -> ChainReport {
        let blocks = self.read_blocks();
        let report = ChainReport::from_faults(inspect_chain(&blocks));
        debug!(
            ledger_id = %self.id,
            length = blocks.len(),
            valid = report.valid,
            "chain verified"
        );
        report
    }

    // ── Reads ────────────────────────────────────────────────────────────────

    /// Decrypt block `index` as seen by `viewer_org_id`.
    ///
    /// Decrypt or parse failures come back as `Withheld(Corrupted)`; only
    /// range, directory, and key-resolution problems are errors.
    pub fn decrypt_message(&self, index: u64, viewer_org_id: &str) -> LedgerResult<Disclosure> {
        let block = self.block(index)?;
        let directory = self.directory();

        if block.is_genesis() {
            return Ok(open_genesis(&block, directory.as_deref()));
        }

        let directory = directory.ok_or(LedgerError::DirectoryNotConfigured)?;
        let key = resolve_key(directory.as_ref(), block.added_by())?;
        Ok(disclose(&block, &key, viewer_org_id, directory.as_ref()))
    }

    /// Export the whole chain as seen by `viewer_org_id`.
    ///
    /// Validity and entries come from the same snapshot. Per-block failures
    /// are folded into each entry's `Disclosure`; this never fails.
    pub fn get_chain(&self, viewer_org_id: &str) -> ChainView {
        let blocks = self.blocks();
        let report = ChainReport::from_faults(inspect_chain(&blocks));
        let directory = self.directory();

        let entries = blocks
            .iter()
            .map(|block| ChainEntry {
                index: block.index(),
                added_by: block.added_by().to_string(),
                timestamp: block.timestamp(),
                hash: block.hash().to_string(),
                previous_hash: block.previous_hash().to_string(),
                payload: self.disclose_for_export(block, directory.as_deref(), viewer_org_id),
            })
            .collect();

        ChainView {
            ledger_id: self.id,
            viewer: viewer_org_id.to_string(),
            valid: report.valid,
            first_invalid: report.first_invalid,
            entries,
        }
    }

    fn disclose_for_export(
        &self,
        block: &Block,
        directory: Option<&dyn Directory>,
        viewer: &str,
    ) -> Disclosure {
        if block.is_genesis() {
            return open_genesis(block, directory);
        }
        let Some(directory) = directory else {
            return Disclosure::Withheld(Redaction::KeyUnavailable);
        };
        match resolve_key(directory, block.added_by()) {
            Ok(key) => disclose(block, &key, viewer, directory),
            Err(e) => {
                debug!(
                    ledger_id = %self.id,
                    index = block.index(),
                    error = %e,
                    "no key for block during export"
                );
                Disclosure::Withheld(Redaction::KeyUnavailable)
            }
        }
    }

    // ── Fault injection ──────────────────────────────────────────────────────

    /// Overwrite block `index`'s ciphertext without rehashing it.
    ///
    /// Exists to exercise tamper detection; the ledger is invalid afterwards.
    pub fn corrupt_block(&self, index: u64, ciphertext: &str) -> LedgerResult<()> {
        let mut blocks = self.blocks.write().map_err(|e| LedgerError::StatePoisoned {
            reason: format!("block list lock poisoned: {}", e),
        })?;
        let len = blocks.len() as u64;
        let slot = usize::try_from(index)
            .ok()
            .and_then(|i| blocks.get_mut(i))
            .ok_or(LedgerError::IndexOutOfRange { index, len })?;
        *slot = slot.tampered(ciphertext);

        warn!(ledger_id = %self.id, index, "block ciphertext overwritten (fault injection)");
        Ok(())
    }

    // ── Internals ────────────────────────────────────────────────────────────

    fn directory(&self) -> Option<Arc<dyn Directory>> {
        self.directory
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn read_blocks(&self) -> RwLockReadGuard<'_, Vec<Block>> {
        self.blocks.read().unwrap_or_else(PoisonError::into_inner)
    }
}

fn lookup(blocks: &[Block], index: u64) -> LedgerResult<&Block> {
    usize::try_from(index)
        .ok()
        .and_then(|i| blocks.get(i))
        .ok_or(LedgerError::IndexOutOfRange {
            index,
            len: blocks.len() as u64,
        })
}

/// Resolve the key for a block authored by `org_id`.
///
/// The shared key always wins; the author's own key is the fallback. An
/// empty key counts as unresolved.
fn resolve_key(directory: &dyn Directory, org_id: &str) -> LedgerResult<KeyMaterial> {
    let usable = |id: &str| directory.get_key(id).filter(|key| !key.is_empty());
    usable(SHARED_KEY_ID)
        .or_else(|| usable(org_id))
        .ok_or_else(|| LedgerError::NoKeyAvailable {
            key_ids: vec![SHARED_KEY_ID.to_string(), org_id.to_string()],
        })
}

/// Keys the genesis block may be sealed under, most preferred first.
fn genesis_keys(directory: Option<&dyn Directory>) -> Vec<KeyMaterial> {
    let mut keys: Vec<KeyMaterial> = directory
        .map(|d| {
            [SHARED_KEY_ID, SYSTEM_ORG_ID]
                .iter()
                .filter_map(|id| d.get_key(id))
                .filter(|key| !key.is_empty())
                .collect()
        })
        .unwrap_or_default();
    keys.push(KeyMaterial::new(DEFAULT_GENESIS_SECRET));
    keys
}

fn create_genesis_block(directory: Option<&dyn Directory>) -> LedgerResult<Block> {
    let keys = genesis_keys(directory);
    let key = keys.first().ok_or(LedgerError::MissingKey)?;
    let envelope = medledger_crypto::encrypt(GENESIS_MESSAGE, key)?.to_string();
    Ok(Block::new(0, envelope, Block::GENESIS_PREVIOUS_HASH, SYSTEM_ORG_ID))
}

/// Open the genesis block with whichever candidate key seals it.
///
/// Trying every candidate keeps genesis readable after a detached ledger
/// gains a directory.
fn open_genesis(block: &Block, directory: Option<&dyn Directory>) -> Disclosure {
    genesis_keys(directory)
        .iter()
        .find_map(|key| medledger_crypto::decrypt(block.ciphertext(), key).ok())
        .map(|content| Disclosure::System { content })
        .unwrap_or_else(|| {
            Disclosure::Withheld(Redaction::Corrupted {
                detail: "genesis block could not be opened with any candidate key".to_string(),
            })
        })
}

// ── Tests ────────────────────────────────────────────────────────────────────
