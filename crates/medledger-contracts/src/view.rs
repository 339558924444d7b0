//! Viewer-scoped read models.
//!
//! Reading the chain never hands out raw plaintext. Every payload is wrapped
//! in a `Disclosure`, which tells the caller either what the viewer may see
//! or why it was withheld. "Not yours to read" and "this block is corrupt"
//! are distinct variants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{message::HealthMessage, org::LedgerId};

/// Marker shown in place of content the viewer is not entitled to.
pub const REDACTION_MARKER: &str = "[Encrypted]";

/// Marker shown in place of content that could not be recovered.
pub const UNDECRYPTABLE_MARKER: &str = "[Decryption Failed]";

/// Why a block's content was withheld from a viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Redaction {
    /// The viewer is a known organization but neither sender nor recipient.
    Hidden { message_type: String },
    /// The viewer is not a member of the consortium.
    UnknownOrg { message_type: String },
    /// The ciphertext failed to decrypt or the plaintext failed to parse.
    Corrupted { detail: String },
    /// No key could be resolved to open the block.
    KeyUnavailable,
}

/// What a particular viewer gets to see of one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "payload", rename_all = "snake_case")]
pub enum Disclosure {
    /// The genesis system message. Never redacted.
    System { content: String },
    /// The full message; the viewer is its sender or recipient.
    Visible(HealthMessage),
    /// Content withheld.
    Withheld(Redaction),
}

impl Disclosure {
    /// The message type the viewer is allowed to know, if any.
    pub fn message_type(&self) -> Option<&str> {
        match self {
            Disclosure::System { .. } => Some("GENESIS"),
            Disclosure::Visible(message) => Some(message.kind.as_str()),
            Disclosure::Withheld(Redaction::Hidden { message_type })
            | Disclosure::Withheld(Redaction::UnknownOrg { message_type }) => {
                Some(message_type.as_str())
            }
            Disclosure::Withheld(_) => None,
        }
    }

    /// The text a display layer should show for this block.
    pub fn display_content(&self) -> &str {
        match self {
            Disclosure::System { content } => content.as_str(),
            Disclosure::Visible(message) => message.content.as_str(),
            Disclosure::Withheld(Redaction::Hidden { .. })
            | Disclosure::Withheld(Redaction::UnknownOrg { .. }) => REDACTION_MARKER,
            Disclosure::Withheld(Redaction::Corrupted { .. })
            | Disclosure::Withheld(Redaction::KeyUnavailable) => UNDECRYPTABLE_MARKER,
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, Disclosure::System { .. } | Disclosure::Visible(_))
    }

    pub fn is_corrupted(&self) -> bool {
        matches!(self, Disclosure::Withheld(Redaction::Corrupted { .. }))
    }
}

/// Metadata returned to the caller after a successful append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSummary {
    pub index: u64,
    pub added_by: String,
    pub timestamp: DateTime<Utc>,
    pub hash: String,
}

/// One block as exported for a viewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainEntry {
    pub index: u64,
    pub added_by: String,
    pub timestamp: DateTime<Utc>,
    pub hash: String,
    pub previous_hash: String,
    pub payload: Disclosure,
}

impl ChainEntry {
    /// First 12 hex characters of the block hash, for compact display.
    pub fn short_hash(&self) -> &str {
        self.hash.get(..12).unwrap_or(&self.hash)
    }
}

/// A consistent snapshot of the whole chain as seen by one viewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainView {
    pub ledger_id: LedgerId,
    pub viewer: String,
    /// Result of the integrity check over the same snapshot as `entries`.
    pub valid: bool,
    /// Index of the first block that failed the integrity check.
    pub first_invalid: Option<u64>,
    pub entries: Vec<ChainEntry>,
}
