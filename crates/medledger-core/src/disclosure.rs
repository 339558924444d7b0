//! Viewer-scoped decryption of block payloads.
//!
//! A block is opened with the resolved key, parsed as a `HealthMessage`,
//! then filtered for the viewer:
//!
//!   viewer is sender/recipient → Visible
//!   unknown viewer            → Withheld(UnknownOrg)  (type only)
//!   any other member          → Withheld(Hidden)      (type only)
//!
//! A party to the message sees it even when it is not a directory member,
//! since `add_block` accepts any recipient.
//!
//! Decrypt and parse failures become `Withheld(Corrupted)` so one damaged
//! block never aborts a read across the chain.

use tracing::debug;

use medledger_chain::Block;
use medledger_contracts::{
    error::{LedgerError, LedgerResult},
    message::HealthMessage,
    org::KeyMaterial,
    view::{Disclosure, Redaction},
};

use crate::traits::Directory;

/// Decrypt and parse the message stored in `block`.
pub fn open_message(block: &Block, key: &KeyMaterial) -> LedgerResult<HealthMessage> {
    let plaintext = medledger_crypto::decrypt(block.ciphertext(), key)?;
    serde_json::from_str(&plaintext).map_err(|e| LedgerError::Serialization {
        reason: format!("block payload is not a message: {}", e),
    })
}

/// Open `block` and apply viewer-scoped redaction.
pub fn disclose(
    block: &Block,
    key: &KeyMaterial,
    viewer: &str,
    directory: &dyn Directory,
) -> Disclosure {
    match open_message(block, key) {
        Ok(message) => redact(message, viewer, directory),
        Err(e) => {
            debug!(
                index = block.index(),
                added_by = %block.added_by(),
                error = %e,
                "block payload could not be opened"
            );
            Disclosure::Withheld(Redaction::Corrupted {
                detail: e.to_string(),
            })
        }
    }
}

/// Decide what `viewer` may see of an already-decrypted message.
pub fn redact(message: HealthMessage, viewer: &str, directory: &dyn Directory) -> Disclosure {
    if message.involves(viewer) {
        Disclosure::Visible(message)
    } else if !directory.is_member(viewer) {
        Disclosure::Withheld(Redaction::UnknownOrg {
            message_type: message.kind,
        })
    } else {
        Disclosure::Withheld(Redaction::Hidden {
            message_type: message.kind,
        })
    }
}
