//! Error types for the MedLedger append, read, and codec paths.
//!
//! Every fallible operation in the workspace returns `LedgerResult<T>`.
//! Variants carry identifiers and reasons only. Key material and message
//! plaintext never appear in an error.

use thiserror::Error;

/// The unified error type for the MedLedger crates.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The claimed organization is not in the validator set.
    ///
    /// The append is refused and the chain is left unchanged.
    #[error("organization '{org_id}' is not an authorized validator")]
    Unauthorized { org_id: String },

    /// The ledger has no organization directory attached.
    #[error("no organization directory is attached to the ledger")]
    DirectoryNotConfigured,

    /// None of the candidate key identifiers resolved to key material.
    #[error("no key available for any of [{}]", key_ids.join(", "))]
    NoKeyAvailable { key_ids: Vec<String> },

    /// The codec was called with an empty secret.
    #[error("encryption key is missing or empty")]
    MissingKey,

    /// The codec was asked to decrypt an empty envelope.
    #[error("ciphertext is missing or empty")]
    MissingCiphertext,

    /// The codec was asked to encrypt an empty plaintext.
    #[error("plaintext is missing or empty")]
    MissingPlaintext,

    /// Authentication failed or the recovered bytes were not valid text.
    #[error("decryption failed: {reason}")]
    Decryption { reason: String },

    /// The envelope string does not have the `iv:ciphertext` shape.
    #[error("malformed envelope: {reason}")]
    MalformedEnvelope { reason: String },

    /// The cipher refused to seal the payload.
    #[error("encryption failed: {reason}")]
    EncryptionFailed { reason: String },

    /// The requested block does not exist.
    #[error("block index {index} is out of range (chain length {len})")]
    IndexOutOfRange { index: u64, len: u64 },

    /// A required message field was absent or blank.
    #[error("required field '{field}' is missing")]
    MissingField { field: String },

    /// A message named a sender or recipient the directory does not know.
    #[error("unknown organization '{org_id}'")]
    UnknownOrg { org_id: String },

    /// A message could not be encoded to its canonical JSON form.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },

    /// Directory configuration is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// An internal lock was poisoned by a panicking writer.
    #[error("ledger state poisoned: {reason}")]
    StatePoisoned { reason: String },
}

/// Convenience alias used throughout the MedLedger crates.
pub type LedgerResult<T> = Result<T, LedgerError>;
